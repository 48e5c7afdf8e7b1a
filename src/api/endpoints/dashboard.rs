//! Dashboard endpoints.

use axum::extract::State;
use axum::Json;

use crate::api::types::ApiContext;
use crate::dashboard::{DashboardData, DashboardSummary};

/// `GET /api/dashboard`: stat cards, recent logs and upcoming doses.
pub async fn overview(State(ctx): State<ApiContext>) -> Json<DashboardData> {
    Json(ctx.core.dashboard())
}

/// `GET /api/dashboard/summary`: stat cards only.
pub async fn summary(State(ctx): State<ApiContext>) -> Json<DashboardSummary> {
    Json(ctx.core.dashboard_summary())
}
