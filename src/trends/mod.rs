mod client;
mod error;
mod resource;

pub use error::TrendError;
pub use resource::{ScrapedProduct, TrendMatch};

use client::Client;
use log::*;
use resource::ScrapeReport;

const MATCH_FALLBACK: &str = "Failed to fetch trend data.";
const SCRAPE_FALLBACK: &str = "Failed to start scraping pipeline.";

/// Responsible for asynchronous interaction with the trend matching and
/// scraping service.
///
pub struct Trends {
    client: Client,
}

impl Trends {
    /// Returns a new instance for the service at `base_url`.
    ///
    pub fn new(base_url: &str) -> Trends {
        debug!("Initializing trend service client for {}...", base_url);
        Trends {
            client: Client::new(base_url),
        }
    }

    /// Returns the trends matching the weaver's skills, best rank first.
    ///
    pub async fn matches(&self, weaver_id: &str) -> Result<Vec<TrendMatch>, TrendError> {
        debug!("Requesting trend matches for weaver {}...", weaver_id);
        let mut matches: Vec<TrendMatch> = self
            .client
            .get(&format!("match/{}", weaver_id), &[], MATCH_FALLBACK)
            .await?;
        matches.sort_by_key(|m| m.rank);
        debug!("Received {} trend matches.", matches.len());
        Ok(matches)
    }

    /// Runs the scraping pipeline and returns the newly found products.
    ///
    pub async fn scrape(&self, products_per_site: u32) -> Result<Vec<ScrapedProduct>, TrendError> {
        debug!(
            "Starting scraping pipeline ({} products per site)...",
            products_per_site
        );
        let report: ScrapeReport = self
            .client
            .post(
                "scrape",
                &[("products_per_site", products_per_site.to_string())],
                SCRAPE_FALLBACK,
            )
            .await?;
        debug!("Scraper returned {} new products.", report.new_products.len());
        Ok(report.new_products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn matches_success_sorted_by_rank() -> Result<(), TrendError> {
        let weaver_id: String = Faker.fake();
        let trends: [TrendMatch; 2] = [Faker.fake(), Faker.fake()];

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path(format!("/match/{}", weaver_id));
                then.status(200).json_body(json!([
                    {
                        "rank": 2,
                        "trend_id": trends[1].trend_id,
                        "trend_name": trends[1].trend_name,
                        "category": trends[1].category,
                        "value": 1200.0,
                        "popularity": 0.4,
                        "match_score": 0.61,
                    },
                    {
                        "rank": 1,
                        "trend_id": trends[0].trend_id,
                        "trend_name": trends[0].trend_name,
                        "category": trends[0].category,
                        "value": 2500.0,
                        "popularity": 0.9,
                        "match_score": 0.87,
                        "colors": ["#800080", "#FFD700"],
                    }
                ]));
            })
            .await;

        let trends_client = Trends::new(&server.base_url());
        let matches = trends_client.matches(&weaver_id).await?;
        mock.assert_async().await;
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].rank, 1);
        assert_eq!(matches[0].trend_id, trends[0].trend_id);
        assert_eq!(matches[0].colors.len(), 2);
        assert!(matches[1].colors.is_empty());
        assert_eq!(matches[0].match_percent(), 87);
        Ok(())
    }

    #[tokio::test]
    async fn matches_error_uses_detail() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/match/W404");
                then.status(404)
                    .json_body(json!({ "detail": "Weaver W404 not found" }));
            })
            .await;

        let trends_client = Trends::new(&server.base_url());
        let error = trends_client.matches("W404").await.unwrap_err();
        mock.assert_async().await;
        match error {
            TrendError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Weaver W404 not found");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn matches_error_without_detail_uses_fallback() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/match/W003");
                then.status(500).body("Internal Server Error");
            })
            .await;

        let trends_client = Trends::new(&server.base_url());
        let error = trends_client.matches("W003").await.unwrap_err();
        mock.assert_async().await;
        assert_eq!(error.user_message(), MATCH_FALLBACK);
    }

    #[tokio::test]
    async fn scrape_success() -> Result<(), TrendError> {
        let products: [ScrapedProduct; 2] = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/scrape")
                    .query_param("products_per_site", "10");
                then.status(200).json_body(json!({
                    "new_products": [
                        {
                            "name": products[0].name,
                            "image_url": null,
                            "price": products[0].price,
                            "product_url": "https://example.com/p/1",
                        },
                        {
                            "name": products[1].name,
                            "image_url": "https://example.com/i/2.jpg",
                            "price": products[1].price,
                            "product_url": null,
                        }
                    ]
                }));
            })
            .await;

        let trends_client = Trends::new(&format!("{}/", server.base_url()));
        let scraped = trends_client.scrape(10).await?;
        mock.assert_async().await;
        assert_eq!(scraped.len(), 2);
        assert_eq!(scraped[0].name, products[0].name);
        assert_eq!(scraped[0].image_url, None);
        assert_eq!(scraped[1].product_url, None);
        Ok(())
    }

    #[tokio::test]
    async fn scrape_without_products_is_empty() -> Result<(), TrendError> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/scrape");
                then.status(200).json_body(json!({ "status": "ok" }));
            })
            .await;

        let trends_client = Trends::new(&server.base_url());
        assert!(trends_client.scrape(3).await?.is_empty());
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn scrape_error_uses_fallback() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/scrape");
                then.status(503).json_body(json!({}));
            })
            .await;

        let trends_client = Trends::new(&server.base_url());
        let error = trends_client.scrape(10).await.unwrap_err();
        mock.assert_async().await;
        assert!(matches!(error, TrendError::Api { status: 503, .. }));
        assert_eq!(error.user_message(), SCRAPE_FALLBACK);
    }
}
