// Application state for HTTP handlers
use crate::application::poller::PollSnapshot;
use crate::infrastructure::svg_chart::ChartStyle;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub snapshots: watch::Receiver<PollSnapshot>,
    pub title: String,
    pub style: ChartStyle,
    pub refresh_secs: u64,
}

impl AppState {
    pub fn snapshot(&self) -> PollSnapshot {
        self.snapshots.borrow().clone()
    }
}
