//! Geocodr HTTP client

use mapapp::SearchError;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::query::SearchParams;
use crate::result::GeocodrResponse;

/// Thin wrapper around the Geocodr query endpoint
#[derive(Debug, Clone)]
pub struct GeocodrClient {
    http: Client,
    base_url: Url,
}

impl GeocodrClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// GET the endpoint with `params` and parse the body
    pub async fn query(&self, params: &SearchParams) -> Result<GeocodrResponse, SearchError> {
        let url = params.apply_to(&self.base_url);
        debug!(
            endpoint = %self.base_url,
            query = ?params.get("query"),
            "Sending Geocodr request"
        );

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!(status = %status, "Geocodr request failed");
            return Err(map_http_error(status, body));
        }

        let body = response
            .bytes()
            .await
            .map_err(transport_error)?;

        serde_json::from_slice(&body).map_err(|err| SearchError::MalformedResponse(err.to_string()))
    }
}

/// The request URL carries the access key and stays out of the message
fn transport_error(err: reqwest::Error) -> SearchError {
    SearchError::Transport(err.without_url().to_string())
}

fn map_http_error(status: StatusCode, body: String) -> SearchError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message").or(Some(err)))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    SearchError::Status {
        status: status.as_u16(),
        message,
    }
}
