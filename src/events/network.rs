use crate::state::State;
use crate::trends::Trends;
use crate::error::AppResult;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    MatchTrends { weaver_id: String },
    Scrape { products_per_site: u32 },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    trends: &'a Trends,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, trends: &'a Trends) -> Self {
        Handler { state, trends }
    }

    /// Handle network events by type. A service failure is stored in state
    /// as the panel's error message before it is returned.
    ///
    pub async fn handle(&mut self, event: Event) -> AppResult<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::MatchTrends { weaver_id } => self.match_trends(&weaver_id).await,
            Event::Scrape { products_per_site } => self.scrape(products_per_site).await,
        }
    }

    /// Update state with trend matches for the weaver.
    ///
    async fn match_trends(&mut self, weaver_id: &str) -> AppResult<()> {
        info!("Fetching trend matches for weaver {}...", weaver_id);
        let result = self.trends.matches(weaver_id).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(matches) => {
                info!("Loaded {} trend matches.", matches.len());
                state.set_trend_matches(Ok(matches));
                Ok(())
            }
            Err(e) => {
                state.set_trend_matches(Err(e.user_message()));
                Err(e.into())
            }
        }
    }

    /// Update state with the products found by the scraping pipeline.
    ///
    async fn scrape(&mut self, products_per_site: u32) -> AppResult<()> {
        info!("Starting scraping pipeline ({} products per site)...", products_per_site);
        let result = self.trends.scrape(products_per_site).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(products) => {
                info!("Scraper returned {} new products.", products.len());
                state.set_scrape_result(Ok(products));
                Ok(())
            }
            Err(e) => {
                state.set_scrape_result(Err(e.user_message()));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::trends::TrendError;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn match_trends_stores_results() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/match/W003");
                then.status(200).json_body(json!([{
                    "rank": 1,
                    "trend_id": "T9",
                    "trend_name": "Jewel tones",
                    "category": "Color",
                    "value": 0.8,
                    "popularity": 91.0,
                    "match_score": 0.72,
                    "colors": ["#6B2D5C"]
                }]));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let trends = Trends::new(&server.base_url());
        let mut handler = Handler::new(&state, &trends);
        handler
            .handle(Event::MatchTrends {
                weaver_id: "W003".to_string(),
            })
            .await
            .unwrap();
        mock.assert_async().await;
        let state = state.lock().await;
        assert_eq!(state.get_trend_matches().len(), 1);
        assert_eq!(state.get_trend_matches()[0].trend_name, "Jewel tones");
        assert!(!state.is_matching());
    }

    #[tokio::test]
    async fn scrape_failure_sets_panel_error() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/scrape");
                then.status(503).body("unavailable");
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let trends = Trends::new(&server.base_url());
        let mut handler = Handler::new(&state, &trends);
        let result = handler
            .handle(Event::Scrape {
                products_per_site: 10,
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Trends(TrendError::Api { status: 503, .. }))
        ));
        let state = state.lock().await;
        assert_eq!(
            state.get_scrape_error(),
            Some("Failed to start scraping pipeline.")
        );
        assert!(state.get_scraped_products().is_empty());
    }
}
