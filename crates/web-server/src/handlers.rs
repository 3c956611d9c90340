use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use core_types::{
    deserialize_timestamp, Installation, InstallationDraft, ProductionReportDraft, ReportWindow,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query string of the wattage sum: `?timestamp=<date-time>&duration=<minutes>`.
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub duration: i32,
}

/// # POST /installations
/// Registers a new, active installation and returns its id.
pub async fn create_installation(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(draft), _): WithRejection<Json<InstallationDraft>, AppError>,
) -> Result<Json<i32>, AppError> {
    let new_installation = draft.validate()?;
    let id = state.store.create_installation(&new_installation).await?;
    tracing::info!(installation_id = id, "Installation created.");
    Ok(Json(id))
}

/// # GET /installations/:id
pub async fn get_installation(
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Installation>, AppError> {
    let installation = state.store.get_installation(id).await?;
    Ok(Json(installation))
}

/// # POST /installations/:id/deactivate
/// Idempotent: deactivating an inactive installation succeeds.
pub async fn deactivate_installation(
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Installation>, AppError> {
    let installation = state.store.deactivate_installation(id).await?;
    tracing::info!(installation_id = id, "Installation deactivated.");
    Ok(Json(installation))
}

/// # POST /installations/:id/reports
/// Stores a reading stamped with the current minute and returns the parent installation.
pub async fn submit_production_report(
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    State(state): State<Arc<AppState>>,
    WithRejection(Json(draft), _): WithRejection<Json<ProductionReportDraft>, AppError>,
) -> Result<Json<Installation>, AppError> {
    let report = draft.into_report(Utc::now());
    let installation = state.store.add_production_report(id, &report).await?;
    tracing::info!(installation_id = id, timestamp = %report.timestamp, "Production report stored.");
    Ok(Json(installation))
}

/// # GET /installations/:id/reports?timestamp=..&duration=..
/// Sums produced wattage over `[timestamp, timestamp + duration minutes]`.
pub async fn sum_produced_wattage(
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): WithRejection<Query<WindowQuery>, AppError>,
) -> Result<Json<f64>, AppError> {
    let window = ReportWindow::new(query.timestamp, query.duration)?;
    let sum = state.store.sum_produced_wattage(id, &window).await?;
    Ok(Json(sum))
}
