//! REST client for the Upstox market-quote endpoint

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::{parse_quotes, QuoteBatch, QuoteSource};
use crate::error::{AlertError, Result};

/// Batch quote client authenticated with a pre-obtained access token
pub struct UpstoxClient {
    client: Client,
    url: String,
    access_token: Option<String>,
}

impl UpstoxClient {
    /// Create a new client; `client` carries the request timeout
    pub fn new(client: Client, url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            access_token,
        }
    }
}

#[async_trait]
impl QuoteSource for UpstoxClient {
    async fn fetch(&self, symbols: &[String]) -> Result<QuoteBatch> {
        let Some(token) = self.access_token.as_deref() else {
            warn!("UPSTOX_ACCESS_TOKEN not set, skipping quote request");
            return Ok(QuoteBatch::default());
        };

        let keys = symbols.join(",");
        debug!(url = %self.url, instrument_key = %keys, "Fetching quotes");

        let response = self
            .client
            .get(&self.url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .query(&[("instrument_key", keys.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AlertError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let batch = parse_quotes(&body)?;

        debug!(status = %status, entries = batch.len(), "Quotes received");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode as HttpStatus};
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v2/market-quote/quotes", addr)
    }

    fn http() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    fn symbols() -> Vec<String> {
        vec!["NSE_INDEX|Nifty 50".to_string(), "NSE_INDEX|Nifty Bank".to_string()]
    }

    #[tokio::test]
    async fn test_fetch_sends_token_and_joined_keys() {
        let app = Router::new().route(
            "/v2/market-quote/quotes",
            get(
                |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                    let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
                    if auth != Some("Bearer secret")
                        || params.get("instrument_key").map(String::as_str)
                            != Some("NSE_INDEX|Nifty 50,NSE_INDEX|Nifty Bank")
                    {
                        return (HttpStatus::BAD_REQUEST, String::new());
                    }
                    (
                        HttpStatus::OK,
                        r#"{"status":"success","data":{"NSE_INDEX:Nifty 50":{"last_price":22510.5}}}"#
                            .to_string(),
                    )
                },
            ),
        );
        let url = serve(app).await;

        let client = UpstoxClient::new(http(), url, Some("secret".to_string()));
        let batch = assert_ok!(client.fetch(&symbols()).await);
        assert_eq!(batch.len(), 1);
        assert!(batch.get("NSE_INDEX|Nifty 50").is_some());
    }

    #[tokio::test]
    async fn test_fetch_maps_401_to_unauthorized() {
        let app = Router::new().route(
            "/v2/market-quote/quotes",
            get(|| async { (HttpStatus::UNAUTHORIZED, r#"{"status":"error"}"#) }),
        );
        let url = serve(app).await;

        let client = UpstoxClient::new(http(), url, Some("expired".to_string()));
        let err = assert_err!(client.fetch(&symbols()).await);
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_api_error() {
        let app = Router::new().route(
            "/v2/market-quote/quotes",
            get(|| async { (HttpStatus::BAD_REQUEST, r#"{"status":"error","errors":[]}"#) }),
        );
        let url = serve(app).await;

        let client = UpstoxClient::new(http(), url, Some("secret".to_string()));
        let err = client.fetch(&symbols()).await.unwrap_err();
        assert!(matches!(err, AlertError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_fetch_without_token_skips_request() {
        // Nothing listens here; a request would fail
        let client = UpstoxClient::new(http(), "http://127.0.0.1:9/quotes", None);
        let batch = assert_ok!(client.fetch(&symbols()).await);
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_connection_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpstoxClient::new(
            http(),
            format!("http://{}/quotes", addr),
            Some("secret".to_string()),
        );
        let err = client.fetch(&symbols()).await.unwrap_err();
        assert!(matches!(err, AlertError::Request(_)));
    }
}
