use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, StoreApiError};

/// Blocking GET transport. The underlying client lives for one request.
pub struct HttpClient {
    timeout: Option<Duration>,
}

pub struct ResponseData {
    pub status: u16,
    pub body: String,
}

impl HttpClient {
    /// `None` leaves requests without any total timeout.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Issues one GET and returns the body as UTF-8 text whatever the status.
    pub fn get(&self, url: &str) -> Result<ResponseData> {
        let retrieval = |source: reqwest::Error| StoreApiError::Retrieval {
            url: url.to_string(),
            source,
        };

        // reqwest's blocking client defaults to a 30s timeout unless told otherwise.
        let client = Client::builder()
            .user_agent("store-api-cli")
            .timeout(self.timeout)
            .build()
            .map_err(retrieval)?;

        debug!(%url, "fetching");
        let resp = client.get(url).send().map_err(retrieval)?;
        let status = resp.status();
        let body = resp.text().map_err(retrieval)?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "store returned non-success status");
        } else {
            debug!(%url, status = status.as_u16(), bytes = body.len(), "fetched");
        }

        Ok(ResponseData {
            status: status.as_u16(),
            body,
        })
    }
}

/// Store REST API version addressed by [`store_api_url`].
pub const STORE_REST_API_VERSION: &str = "v0.13";

/// Rewrites the store base URL into the store REST API lookup URL for `api_id`.
///
/// Every `store` substring is replaced and the identifier is appended unencoded.
pub fn store_api_url(store_url: &str, api_id: &str) -> String {
    let apis = format!("api/am/store/{STORE_REST_API_VERSION}/apis/");
    format!("{}{}", store_url.replace("store", &apis), api_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn store_api_url_rewrites_store_segment() {
        assert_eq!(
            store_api_url("https://localhost:9443/store", "0c1f-42"),
            "https://localhost:9443/api/am/store/v0.13/apis/0c1f-42"
        );
    }

    #[test]
    fn store_api_url_does_not_encode_identifier() {
        assert_eq!(
            store_api_url("http://h/store/", "a b?c"),
            "http://h/api/am/store/v0.13/apis//a b?c"
        );
    }

    #[test]
    fn get_returns_error_body_without_failing() {
        let server = MockServer::start();
        let missing = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("<html>not found</html>");
        });

        let client = HttpClient::new(None);
        let resp = client.get(&server.url("/missing")).expect("response");

        missing.assert();
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, "<html>not found</html>");
    }

    #[test]
    fn get_reports_transport_failure_as_retrieval_error() {
        let client = HttpClient::new(Some(Duration::from_secs(2)));
        let err = client
            .get("http://127.0.0.1:1/unreachable")
            .err()
            .expect("connection refused");
        assert!(matches!(
            err,
            StoreApiError::Retrieval { ref url, .. } if url.ends_with("/unreachable")
        ));
    }

    #[test]
    fn get_without_timeout_outlasts_reqwest_default() {
        let server = MockServer::start();
        let slow = server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_secs(32))
                .body("late");
        });

        let client = HttpClient::new(None);
        assert_eq!(client.timeout(), None);
        let resp = client.get(&server.url("/slow")).expect("no timeout applies");

        slow.assert();
        assert_eq!(resp.body, "late");
    }

    #[test]
    fn get_honours_configured_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(3)).body("late");
        });

        let client = HttpClient::new(Some(Duration::from_millis(500)));
        let err = client.get(&server.url("/slow")).err().expect("timed out");
        match err {
            StoreApiError::Retrieval { source, .. } => assert!(source.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
