//! Patient roster endpoints.
//!
//! - `GET /api/patients?query=`: filtered roster
//! - `POST /api/patients`: register from the form draft
//! - `GET /api/patients/:id`: one patient
//! - `DELETE /api/patients/:id`: remove
//! - `GET /api/patients/:id/logs`: that patient's medication logs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{parse_patient_id, ApiContext, ApiJson, ApiQuery};
use crate::models::{MedicationLog, Patient, PatientDraft};

#[derive(Deserialize)]
pub struct PatientListQuery {
    pub query: Option<String>,
}

#[derive(Serialize)]
pub struct PatientsResponse {
    pub patients: Vec<Patient>,
    pub total: usize,
}

/// `GET /api/patients`
pub async fn list(
    State(ctx): State<ApiContext>,
    ApiQuery(query): ApiQuery<PatientListQuery>,
) -> Result<Json<PatientsResponse>, ApiError> {
    let patients = ctx
        .core
        .search_patients(query.query.as_deref().unwrap_or(""))?;

    Ok(Json(PatientsResponse {
        total: patients.len(),
        patients,
    }))
}

/// `POST /api/patients`
pub async fn create(
    State(ctx): State<ApiContext>,
    ApiJson(draft): ApiJson<PatientDraft>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = ctx.core.register_patient(&draft)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// `GET /api/patients/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_patient_id(&id)?;
    Ok(Json(ctx.core.get_patient(id)?))
}

/// `DELETE /api/patients/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_patient_id(&id)?;
    Ok(Json(ctx.core.remove_patient(id)?))
}

/// `GET /api/patients/:id/logs`
pub async fn logs(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MedicationLog>>, ApiError> {
    let id = parse_patient_id(&id)?;
    Ok(Json(ctx.core.patient_logs(id)?))
}
