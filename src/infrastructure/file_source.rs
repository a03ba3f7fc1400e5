// File sample source - reads the charging resource from disk
use crate::application::sample_source::{FetchError, SampleSource};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSampleSource {
    path: PathBuf,
}

impl FileSampleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SampleSource for FileSampleSource {
    async fn fetch(&self) -> Result<serde_json::Value, FetchError> {
        let body = tokio::fs::read(&self.path).await.map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
