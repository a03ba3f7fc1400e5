// Presentation adapter - fetch outcomes to UI state, samples to chart values
use crate::application::sample_source::{FetchError, CHARGING_STATES_FIELD};
use crate::domain::chart::{ChartModel, ChartPoint, Tooltip};
use crate::domain::sample::{normalize, Sample, SampleCollection};
use crate::domain::time_format::{format_instant, parse_timestamp, TimeFormatError};
use crate::domain::transition::classify_in;
use crate::domain::ui_state::UiState;
use serde_json::Value;

/// Reasons a single `chargingStates` entry is dropped
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("entry is not an object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not an integer")]
    NotAnInteger(&'static str),

    #[error("field `date` is not a string")]
    DateNotAString,

    #[error(transparent)]
    InvalidDate(#[from] TimeFormatError),

    #[error("charging level {0} is outside 0..=100")]
    LevelOutOfRange(i64),
}

pub fn present(fetch_result: Result<Value, FetchError>) -> UiState {
    match fetch_result {
        Ok(payload) => present_payload(&payload),
        Err(e) => {
            tracing::warn!("Failed to load charging data: {}", e);
            UiState::Error
        }
    }
}

/// Validate a parsed payload and normalize its samples.
pub fn present_payload(payload: &Value) -> UiState {
    let Some(entries) = payload.get(CHARGING_STATES_FIELD).and_then(Value::as_array) else {
        tracing::warn!("Payload has no `{}` array", CHARGING_STATES_FIELD);
        return UiState::Empty;
    };

    let samples = parse_samples(entries);
    if samples.is_empty() {
        return UiState::Empty;
    }

    tracing::debug!("Parsed {} of {} charging states", samples.len(), entries.len());
    UiState::Ready(normalize(&samples))
}

fn parse_samples(entries: &[Value]) -> Vec<Sample> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match parse_sample(entry) {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::warn!(index, "Dropping charging state: {}", e);
                None
            }
        })
        .collect()
}

fn parse_sample(entry: &Value) -> Result<Sample, EntryError> {
    let object = entry.as_object().ok_or(EntryError::NotAnObject)?;

    let date = object
        .get("date")
        .ok_or(EntryError::MissingField("date"))?
        .as_str()
        .ok_or(EntryError::DateNotAString)?;
    let date = parse_timestamp(date)?;

    let level = integer_field(object, "chargingLevel")?;
    let level = u8::try_from(level)
        .ok()
        .filter(|l| *l <= 100)
        .ok_or(EntryError::LevelOutOfRange(level))?;

    let internal_event_id = integer_field(object, "internalEventId")?;

    Ok(Sample::new(date, level, internal_event_id))
}

fn integer_field(
    object: &serde_json::Map<String, Value>,
    name: &'static str,
) -> Result<i64, EntryError> {
    let value = object.get(name).ok_or(EntryError::MissingField(name))?;

    // 35.0 is as good as 35
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or(EntryError::NotAnInteger(name))
}

/// Tooltip for a hovered sample: its own time and level, labelled against
/// the sample preceding its timestamp in `collection`.
pub fn tooltip_for(collection: &SampleCollection, hovered: &Sample) -> Tooltip {
    Tooltip::new(
        format_instant(hovered.date),
        hovered.charging_level,
        classify_in(collection, hovered),
    )
}

pub fn build_chart(title: &str, collection: &SampleCollection) -> ChartModel {
    let points = collection
        .iter()
        .map(|sample| ChartPoint {
            date: sample.date,
            level: sample.charging_level,
            internal_event_id: sample.internal_event_id,
            tick_label: format_instant(sample.date),
            tooltip: tooltip_for(collection, sample),
        })
        .collect();

    ChartModel::new(title.to_string(), points)
}
