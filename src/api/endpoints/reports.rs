//! Adherence report endpoint.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiQuery};
use crate::reports::AdherenceReport;

#[derive(Deserialize)]
pub struct ReportQuery {
    /// Narrow the per-patient section to one patient name.
    pub patient: Option<String>,
}

/// `GET /api/reports/adherence`
pub async fn adherence(
    State(ctx): State<ApiContext>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<Json<AdherenceReport>, ApiError> {
    let report = ctx.core.adherence_report(query.patient.as_deref())?;
    Ok(Json(report))
}
