//! SearchImpl implementation for Geocodr

use async_trait::async_trait;
use mapapp::{DomainError, ResultItem, SearchError, SearchImpl};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::GeocodrClient;
use crate::config::{GeocodrOptions, SearchConfiguration};
use crate::query::SearchParams;

/// Default provider name used when registering with the host
pub const PROVIDER_NAME: &str = "search-geocodr";

/// Geocodr address search implementing the host's SearchImpl trait
///
/// Every `search` subscribes to the cancellation signal when it starts;
/// `abort` bumps the signal and so cancels every search still in flight.
pub struct Geocodr {
    name: String,
    config: SearchConfiguration,
    client: GeocodrClient,
    cancel: watch::Sender<u64>,
}

impl Geocodr {
    /// Canonical default options
    pub fn get_default_options() -> GeocodrOptions {
        GeocodrOptions::defaults()
    }

    /// Create a provider from `options` merged over the defaults
    pub fn new(options: &GeocodrOptions) -> Result<Self, DomainError> {
        let config = SearchConfiguration::from_options(options)?;
        let client = GeocodrClient::new(config.url.clone());
        Ok(Self::with_client(config, client))
    }

    /// Create a provider around an existing client
    pub fn with_client(config: SearchConfiguration, client: GeocodrClient) -> Self {
        let (cancel, _) = watch::channel(0);
        Self {
            name: PROVIDER_NAME.to_string(),
            config,
            client,
            cancel,
        }
    }

    /// Override the provider name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &SearchConfiguration {
        &self.config
    }

    /// Configuration reduced to what differs from the defaults
    pub fn to_config(&self) -> GeocodrOptions {
        self.config.to_options()
    }

    /// Parameters a search for `query` would send
    pub fn params(&self, query: &str) -> SearchParams {
        SearchParams::new(query, &self.config)
    }
}

#[async_trait]
impl SearchImpl for Geocodr {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError> {
        let mut cancelled = self.cancel.subscribe();
        let params = self.params(query);

        let outcome = tokio::select! {
            biased;
            _ = cancelled.changed() => {
                debug!(provider = %self.name, query = %query, "Geocodr search cancelled");
                return Err(SearchError::Cancelled);
            }
            response = self.client.query(&params) => response,
        };
        let response = outcome
            .inspect_err(|e| warn!(provider = %self.name, error = %e, "Geocodr search failed"))?;

        let items = response.into_result_items();
        debug!(provider = %self.name, results = %items.len(), "Geocodr search finished");
        Ok(items)
    }

    fn abort(&self) {
        self.cancel.send_modify(|generation| *generation = generation.wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockGeocodr;
    use mapapp::{Extent, Projection};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn provider_for(server: &MockGeocodr, options: GeocodrOptions) -> Geocodr {
        let options = GeocodrOptions {
            url: Some(server.url()),
            ..options
        };
        Geocodr::new(&options).unwrap()
    }

    #[test]
    fn test_default_options_serialize_to_empty_config() {
        let provider = Geocodr::new(&Geocodr::get_default_options()).unwrap();
        assert!(provider.to_config().is_empty());
        assert_eq!(serde_json::to_value(provider.to_config()).unwrap(), json!({}));
    }

    #[test]
    fn test_single_override_serializes_alone() {
        let overrides = [
            ("url", json!("https://geocodr.example.org/query")),
            ("city", json!("Rostock")),
            ("state", json!("MV")),
            ("countrycode", json!("pl")),
            ("key", json!("0123456789abcdef0123456789abcdef")),
            ("limit", json!(5)),
            ("type", json!("reverse")),
            ("class", json!("parcel")),
            ("out_epsg", json!("25833")),
        ];

        for (field, value) in overrides {
            let options: GeocodrOptions =
                serde_json::from_value(json!({ field: value.clone() })).unwrap();
            let provider = Geocodr::new(&options).unwrap();
            assert_eq!(
                serde_json::to_value(provider.to_config()).unwrap(),
                json!({ field: value }),
                "field {}",
                field
            );
        }
    }

    #[test]
    fn test_extent_serializes_canonically() {
        let options: GeocodrOptions = serde_json::from_value(json!({
            "extent": { "coordinates": [12.3, 54.25, 11.9, 54.0] }
        }))
        .unwrap();
        let provider = Geocodr::new(&options).unwrap();
        let config = serde_json::to_value(provider.to_config()).unwrap();

        assert_eq!(
            config,
            json!({
                "extent": {
                    "type": "Extent",
                    "coordinates": [11.9, 54.0, 12.3, 54.25],
                    "projection": { "epsg": "EPSG:4326" }
                }
            })
        );

        let rebuilt = Geocodr::new(&provider.to_config()).unwrap();
        assert_eq!(rebuilt.config(), provider.config());
    }

    #[test]
    fn test_invalid_options_rejected() {
        assert!(Geocodr::new(&GeocodrOptions::default().with_limit(0)).is_err());

        let options: GeocodrOptions = serde_json::from_value(json!({
            "extent": { "coordinates": [1, 2], "projection": { "epsg": 4326 } }
        }))
        .unwrap();
        assert!(Geocodr::new(&options).is_err());
    }

    #[test]
    fn test_abort_without_search() {
        let provider = Geocodr::new(&GeocodrOptions::default()).unwrap();
        provider.abort();
        provider.abort();
    }

    #[tokio::test]
    async fn test_search_maps_features() {
        let server = MockGeocodr::start(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [12.13, 54.09] },
                "properties": {
                    "_title_": "Hauptstr. 1",
                    "suchklasse": "Straße",
                    "objektgruppe": "Adressen"
                }
            }]
        }))
        .await;
        let provider = provider_for(&server, GeocodrOptions::default());

        let items = provider.search("Hauptstr. 1").await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Hauptstr. 1");
        assert_eq!(items[0].attribute("suchklasse"), Some(&json!("Straße")));
        assert_eq!(items[0].info_view.subtitle(), Some("Adressen"));
    }

    #[tokio::test]
    async fn test_search_sends_query_parameters() {
        let server = MockGeocodr::start(json!({ "features": [] })).await;
        let provider = provider_for(
            &server,
            GeocodrOptions::default()
                .with_city("Rostock")
                .with_state("MV")
                .with_limit(5),
        );

        let items = provider.search("Hauptstr. 1").await.unwrap();
        assert!(items.is_empty());

        let query = server.last_query().expect("request received");
        assert_eq!(query.get("query").map(String::as_str), Some("Hauptstr. 1,Rostock,MV"));
        assert_eq!(query.get("countrycodes").map(String::as_str), Some("de"));
        assert_eq!(query.get("format").map(String::as_str), Some("json"));
        assert_eq!(query.get("polygon_geojson").map(String::as_str), Some("1"));
        assert_eq!(query.get("addressdetails").map(String::as_str), Some("1"));
        assert_eq!(query.get("limit").map(String::as_str), Some("5"));
        assert!(query.get("viewbox").is_none());
        assert!(query.get("bounded").is_none());
    }

    #[tokio::test]
    async fn test_search_with_extent_is_bounded() {
        let server = MockGeocodr::start(json!({ "features": [] })).await;
        let extent = Extent::new([11.9, 54.0, 12.3, 54.25], Projection::Wgs84).unwrap();
        let provider = provider_for(
            &server,
            GeocodrOptions::default().with_extent(extent.to_options()),
        );

        provider.search("Markt").await.unwrap();

        let query = server.last_query().expect("request received");
        assert_eq!(query.get("bounded").map(String::as_str), Some("1"));
        assert_eq!(
            query.get("viewbox").map(String::as_str),
            Some("11.9,54,12.3,54.25")
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockGeocodr::start_raw("<html>maintenance</html>").await;
        let provider = provider_for(&server, GeocodrOptions::default());

        let err = provider.search("Markt").await.unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_missing_features_is_malformed() {
        let server = MockGeocodr::start(json!({ "error": null })).await;
        let provider = provider_for(&server, GeocodrOptions::default());

        let err = provider.search("Markt").await.unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let options = GeocodrOptions {
            url: Some("http://127.0.0.1:9/query".to_string()),
            key: Some("0123456789abcdef0123456789abcdef".to_string()),
            ..Default::default()
        };
        let provider = Geocodr::new(&options).unwrap();

        let err = provider.search("Markt").await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)), "{:?}", err);
        assert!(!err.is_cancelled());
        assert!(!err.to_string().contains("0123456789abcdef"), "{}", err);
    }

    #[tokio::test]
    async fn test_abort_cancels_in_flight_search() {
        let server = MockGeocodr::start(json!({ "features": [] }))
            .await
            .with_delay(Duration::from_secs(10));
        let provider = Arc::new(provider_for(&server, GeocodrOptions::default()));

        let searching = {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { provider.search("Hauptstr").await })
        };
        server.wait_for_requests(1).await;
        provider.abort();

        let result = tokio::time::timeout(Duration::from_secs(5), searching)
            .await
            .expect("search finished after abort")
            .unwrap();
        assert!(matches!(result, Err(SearchError::Cancelled)));
    }

    #[tokio::test]
    async fn test_abort_cancels_all_overlapping_searches() {
        let server = MockGeocodr::start(json!({ "features": [] }))
            .await
            .with_delay(Duration::from_secs(10));
        let provider = Arc::new(provider_for(&server, GeocodrOptions::default()));

        let searches: Vec<_> = ["Haupt", "Hauptstr"]
            .into_iter()
            .map(|query| {
                let provider = Arc::clone(&provider);
                tokio::spawn(async move { provider.search(query).await })
            })
            .collect();
        server.wait_for_requests(2).await;
        provider.abort();

        for search in searches {
            let result = tokio::time::timeout(Duration::from_secs(5), search)
                .await
                .expect("search finished after abort")
                .unwrap();
            assert!(result.unwrap_err().is_cancelled());
        }
    }

    #[tokio::test]
    async fn test_search_after_abort_succeeds() {
        let server = MockGeocodr::start(json!({
            "features": [{ "properties": { "_title_": "Markt 1" } }]
        }))
        .await;
        let provider = provider_for(&server, GeocodrOptions::default());

        provider.abort();
        let items = provider.search("Markt").await.unwrap();
        assert_eq!(items[0].title, "Markt 1");

        provider.abort();
        let items = provider.search("Markt").await.unwrap();
        assert_eq!(items.len(), 1);
    }
}
