use fake::Dummy;
use serde::{Deserialize, Serialize};

/// One ranked trend returned by the matching service.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct TrendMatch {
    pub rank: u32,
    pub trend_id: String,
    pub trend_name: String,
    pub category: String,
    pub value: f64,
    pub popularity: f64,
    /// Between 0 and 1.
    pub match_score: f64,
    #[serde(default)]
    pub colors: Vec<String>, // hex codes
}

impl TrendMatch {
    pub fn match_percent(&self) -> u32 {
        (self.match_score * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Product picked up by the scraping pipeline.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub name: String,
    pub image_url: Option<String>,
    pub price: String,
    pub product_url: Option<String>,
}

/// Body of a scrape response.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ScrapeReport {
    #[serde(default)]
    pub new_products: Vec<ScrapedProduct>,
}
