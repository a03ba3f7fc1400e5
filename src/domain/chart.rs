// Chart domain models - renderable values derived from samples
use super::transition::TransitionLabel;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The charging-level axis always spans the full percentage range.
pub const LEVEL_AXIS_DOMAIN: [u8; 2] = [0, 100];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub time: String,
    pub level: u8,
    pub label: TransitionLabel,
}

impl Tooltip {
    pub fn new(time: String, level: u8, label: TransitionLabel) -> Self {
        Self { time, level, label }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Time: {}", self.time),
            format!("Charging Level: {}%", self.level),
            self.label.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: DateTime<Utc>,
    pub level: u8,
    pub internal_event_id: i64,
    pub tick_label: String,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub title: String,
    pub y_domain: [u8; 2],
    pub points: Vec<ChartPoint>,
}

impl ChartModel {
    pub fn new(title: String, points: Vec<ChartPoint>) -> Self {
        Self {
            title,
            y_domain: LEVEL_AXIS_DOMAIN,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_lines() {
        let tooltip = Tooltip::new("09:00".to_string(), 35, TransitionLabel::Charging);
        assert_eq!(
            tooltip.lines(),
            [
                "Time: 09:00".to_string(),
                "Charging Level: 35%".to_string(),
                "Charging".to_string()
            ]
        );
    }

    #[test]
    fn test_chart_domain_is_fixed() {
        let chart = ChartModel::new("Battery".to_string(), Vec::new());
        assert_eq!(chart.y_domain, [0, 100]);
    }
}
