// Sample source trait - where charging payloads come from
use async_trait::async_trait;
use std::path::PathBuf;

pub const CHARGING_STATES_FIELD: &str = "chargingStates";

/// Failures at the fetch boundary. Every variant surfaces as the error UI state.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch the current payload, expected to look like `{ "chargingStates": [...] }`.
    ///
    /// Shape is not checked here; any well-formed JSON document is returned.
    async fn fetch(&self) -> Result<serde_json::Value, FetchError>;

    /// Human-readable location, used in logs
    fn describe(&self) -> String;
}
