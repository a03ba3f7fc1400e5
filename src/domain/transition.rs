// Transition label derived from two adjacent samples
use super::sample::{Sample, SampleCollection};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionLabel {
    Charging,
    Discharging,
    Stable,
}

impl TransitionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionLabel::Charging => "Charging",
            TransitionLabel::Discharging => "Discharging",
            TransitionLabel::Stable => "Stable",
        }
    }
}

impl fmt::Display for TransitionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare a sample against the one before it.
///
/// Without a previous sample there is nothing to compare against, so the
/// reading counts as `Stable`.
pub fn classify(current: &Sample, previous: Option<&Sample>) -> TransitionLabel {
    let Some(previous) = previous else {
        return TransitionLabel::Stable;
    };

    match current.charging_level.cmp(&previous.charging_level) {
        Ordering::Greater => TransitionLabel::Charging,
        Ordering::Less => TransitionLabel::Discharging,
        Ordering::Equal => TransitionLabel::Stable,
    }
}

/// Classify `current` against its chronological predecessor in `collection`.
pub fn classify_in(collection: &SampleCollection, current: &Sample) -> TransitionLabel {
    classify(current, collection.previous_of(current.date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::normalize;
    use chrono::{TimeZone, Utc};

    fn level(charging_level: u8) -> Sample {
        Sample::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), charging_level, 0)
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&level(70), Some(&level(50))), TransitionLabel::Charging);
        assert_eq!(classify(&level(30), Some(&level(50))), TransitionLabel::Discharging);
        assert_eq!(classify(&level(40), Some(&level(40))), TransitionLabel::Stable);
        assert_eq!(classify(&level(90), None), TransitionLabel::Stable);
    }

    #[test]
    fn test_classify_in_uses_chronological_predecessor() {
        let at = |hour, lvl, id| Sample::new(Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(), lvl, id);
        // arrival order puts the 10:00 reading before the 09:00 one
        let sorted = normalize(&[at(10, 60, 3), at(8, 20, 1), at(9, 80, 2)]);

        let labels: Vec<TransitionLabel> = sorted.iter().map(|s| classify_in(&sorted, s)).collect();
        assert_eq!(
            labels,
            vec![TransitionLabel::Stable, TransitionLabel::Charging, TransitionLabel::Discharging]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TransitionLabel::Discharging.to_string(), "Discharging");
    }
}
