// HTML page and JSON view built from a poll snapshot
use crate::application::poller::{PollPhase, PollSnapshot};
use crate::application::presenter::build_chart;
use crate::domain::chart::ChartModel;
use crate::domain::ui_state::UiState;
use crate::infrastructure::svg_chart::{escape, render_svg};
use crate::presentation::app_state::AppState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

const STYLESHEET: &str = "body{font-family:sans-serif;margin:2rem}\
.battery-charging-visualization{max-width:100%}\
.loading,.error{padding:1rem;font-size:1.1rem}\
.error{color:#b00020}\
.status{color:#666;font-size:.85rem}";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStateView {
    pub status: &'static str,
    pub message: Option<&'static str>,
    pub refreshing: bool,
    pub updated_at: Option<DateTime<Utc>>,
    pub cycle: u64,
    pub chart: Option<ChartModel>,
}

impl ChartStateView {
    pub fn from_snapshot(snapshot: &PollSnapshot, title: &str) -> Self {
        Self {
            status: snapshot.state.status(),
            message: snapshot.state.message(),
            refreshing: snapshot.phase == PollPhase::Fetching,
            updated_at: snapshot.updated_at,
            cycle: snapshot.cycle,
            chart: snapshot.state.samples().map(|samples| build_chart(title, samples)),
        }
    }
}

pub fn render_page(snapshot: &PollSnapshot, state: &AppState) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"{}\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        state.refresh_secs,
        escape(&state.title),
        STYLESHEET
    );

    match &snapshot.state {
        UiState::Ready(samples) => {
            let chart = build_chart(&state.title, samples);
            let _ = write!(
                html,
                "<div class=\"battery-charging-visualization\">\n<h1>{}</h1>\n{}</div>\n",
                escape(&chart.title),
                render_svg(&chart, &state.style)
            );
        }
        UiState::Loading => {
            let _ = writeln!(html, "<div class=\"loading\">{}</div>", escape(message(&snapshot.state)));
        }
        UiState::Error | UiState::Empty => {
            let _ = writeln!(html, "<div class=\"error\">{}</div>", escape(message(&snapshot.state)));
        }
    }

    if let Some(updated_at) = snapshot.updated_at {
        let _ = writeln!(
            html,
            "<p class=\"status\">Last updated {} UTC</p>",
            updated_at.format("%H:%M:%S")
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn message(state: &UiState) -> &'static str {
    state.message().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::presenter::present;
    use crate::application::sample_source::FetchError;
    use crate::infrastructure::svg_chart::ChartStyle;
    use crate::domain::ui_state::{EMPTY_MESSAGE, ERROR_MESSAGE, LOADING_MESSAGE};
    use serde_json::json;
    use tokio::sync::watch;

    fn app_state() -> AppState {
        let (_tx, rx) = watch::channel(PollSnapshot::default());
        AppState {
            snapshots: rx,
            title: "Battery Charging Visualization".to_string(),
            style: ChartStyle {
                width: 960,
                height: 450,
                stroke: "#8884d8".to_string(),
            },
            refresh_secs: 3,
        }
    }

    fn snapshot(state: UiState) -> PollSnapshot {
        PollSnapshot {
            state,
            cycle: 1,
            updated_at: Some(Utc::now()),
            ..PollSnapshot::default()
        }
    }

    fn ready() -> UiState {
        present(Ok(json!({
            "chargingStates": [
                {"date": "2024-01-01T08:00:00Z", "chargingLevel": 20, "internalEventId": 1},
                {"date": "2024-01-01T09:00:00Z", "chargingLevel": 35, "internalEventId": 2}
            ]
        })))
    }

    #[test]
    fn test_page_ready_renders_chart() {
        let html = render_page(&snapshot(ready()), &app_state());
        assert!(html.contains("<h1>Battery Charging Visualization</h1>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Charging Level: 35%"));
        assert!(html.contains("content=\"3\""));
    }

    #[test]
    fn test_page_error_renders_no_chart() {
        let err = FetchError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            url: "http://localhost/backend-response.json".to_string(),
        };
        let html = render_page(&snapshot(present(Err(err))), &app_state());

        assert!(html.contains(&format!("<div class=\"error\">{}</div>", ERROR_MESSAGE)));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_page_loading_and_empty() {
        let loading = render_page(&PollSnapshot::default(), &app_state());
        assert!(loading.contains(LOADING_MESSAGE));
        assert!(!loading.contains("Last updated"));

        let empty = render_page(&snapshot(UiState::Empty), &app_state());
        assert!(empty.contains(EMPTY_MESSAGE));
        assert!(!empty.contains("<svg"));
    }

    #[test]
    fn test_view_for_ready_and_error() {
        let view = ChartStateView::from_snapshot(&snapshot(ready()), "Battery");
        assert_eq!(view.status, "ready");
        assert!(view.message.is_none());
        assert_eq!(view.chart.as_ref().map(|c| c.points.len()), Some(2));

        let view = ChartStateView::from_snapshot(&snapshot(UiState::Error), "Battery");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], ERROR_MESSAGE);
        assert!(json["chart"].is_null());
        assert_eq!(json["refreshing"], false);
    }
}
