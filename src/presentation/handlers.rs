// HTTP request handlers
use crate::presentation::app_state::AppState;
use crate::presentation::page::{render_page, ChartStateView};
use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Chart page, or the loading/error/empty message
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let snapshot = state.snapshot();
    Html(render_page(&snapshot, &state))
}

/// Same model as the page, as JSON
pub async fn chart_state(State(state): State<Arc<AppState>>) -> Json<ChartStateView> {
    let snapshot = state.snapshot();
    Json(ChartStateView::from_snapshot(&snapshot, &state.title))
}
