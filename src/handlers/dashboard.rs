// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::dashboard::ResumenDashboard};

// GET /api/dashboard/resumen
#[utoipa::path(
    get,
    path = "/api/dashboard/resumen",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores generales: obras por estado, ausencias de hoy y asignaciones pendientes", body = ResumenDashboard)
    )
)]
pub async fn resumen(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let resumen = app_state.dashboard_service.resumen().await?;
    Ok((StatusCode::OK, Json(resumen)))
}
