// HTTP sample source - GET of the static charging resource
use crate::application::sample_source::{FetchError, SampleSource};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSampleSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSampleSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SampleSource for HttpSampleSource {
    async fn fetch(&self) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
                url: self.url.clone(),
            });
        }

        // Read the body first so a bad document is reported as a parse failure
        let body = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), self.url);

        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::net::SocketAddr;

    async fn spawn_server() -> SocketAddr {
        let router = Router::new()
            .route(
                "/backend-response.json",
                get(|| async {
                    Json(json!({
                        "chargingStates": [
                            {"date": "2024-01-01T08:00:00Z", "chargingLevel": 20, "internalEventId": 1}
                        ]
                    }))
                }),
            )
            .route("/broken.json", get(|| async { "{ definitely not json" }))
            .route(
                "/unavailable.json",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn source(addr: SocketAddr, path: &str) -> HttpSampleSource {
        HttpSampleSource::new(format!("http://{}{}", addr, path), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let addr = spawn_server().await;
        let payload = source(addr, "/backend-response.json").fetch().await.unwrap();
        assert_eq!(payload["chargingStates"][0]["chargingLevel"], 20);
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status() {
        let addr = spawn_server().await;

        let err = source(addr, "/unavailable.json").fetch().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status, .. } if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        ));

        let err = source(addr, "/nowhere.json").fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let addr = spawn_server().await;
        let err = source(addr, "/broken.json").fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source(addr, "/backend-response.json").fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
