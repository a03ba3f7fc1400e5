// UI data state - outcome of the latest fetch cycle
use super::sample::SampleCollection;

pub const LOADING_MESSAGE: &str = "Loading charging data...";
pub const ERROR_MESSAGE: &str = "Failed to load charging data. Please try again later.";
pub const EMPTY_MESSAGE: &str = "No charging data available.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Loading,
    Error,
    Empty,
    Ready(SampleCollection),
}

impl UiState {
    pub fn status(&self) -> &'static str {
        match self {
            UiState::Loading => "loading",
            UiState::Error => "error",
            UiState::Empty => "empty",
            UiState::Ready(_) => "ready",
        }
    }

    /// Plain-text message shown instead of the chart. `None` when ready.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            UiState::Loading => Some(LOADING_MESSAGE),
            UiState::Error => Some(ERROR_MESSAGE),
            UiState::Empty => Some(EMPTY_MESSAGE),
            UiState::Ready(_) => None,
        }
    }

    pub fn samples(&self) -> Option<&SampleCollection> {
        match self {
            UiState::Ready(samples) => Some(samples),
            _ => None,
        }
    }
}
