use anyhow::ensure;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub public_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            public_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceSettings {
    pub url: String,
    /// Read this file instead of fetching `url`
    pub file: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080/backend-response.json".to_string(),
            file: None,
            timeout_secs: 10,
        }
    }
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PollSettings {
    pub interval_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self { interval_secs: 3 }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub stroke: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: "Battery Charging Visualization".to_string(),
            width: 960,
            height: 450,
            stroke: "#8884d8".to_string(),
        }
    }
}

// Smallest plot that still leaves room for axes and margins
const MIN_CHART_WIDTH: u32 = 200;
const MIN_CHART_HEIGHT: u32 = 150;

impl AppConfig {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.poll.interval_secs > 0, "poll.interval_secs must be positive");
        ensure!(self.source.timeout_secs > 0, "source.timeout_secs must be positive");
        ensure!(
            self.chart.width >= MIN_CHART_WIDTH && self.chart.height >= MIN_CHART_HEIGHT,
            "chart must be at least {}x{}, got {}x{}",
            MIN_CHART_WIDTH,
            MIN_CHART_HEIGHT,
            self.chart.width,
            self.chart.height
        );
        Ok(())
    }
}

/// Load `config/dashboard.*` (optional), then `DASHBOARD__*` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(File::with_name("config/dashboard").required(false))
        .add_source(
            Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

    build_app_config(builder)
}

fn build_app_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let settings: AppConfig = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
