// src/handlers/asignaciones.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::asignacion::{AsignacionConTrabajador, AsignacionCreada, ObraTrabajador},
};

// ---
// Payload: CrearAsignacion
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearAsignacionPayload {
    pub trabajador_id: Uuid,

    #[schema(example = "2024-08-05")]
    pub fecha_inicio: NaiveDate,

    // Sin fecha de fin = asignación de un solo día.
    pub fecha_fin: Option<NaiveDate>,

    pub notas: Option<String>,
}

impl CrearAsignacionPayload {
    fn validar_consistencia(&self) -> Result<(), ValidationError> {
        if let Some(fin) = self.fecha_fin {
            if fin < self.fecha_inicio {
                let mut err = ValidationError::new("rango_fechas");
                err.message =
                    Some("La fecha de fin no puede ser anterior a la de inicio.".into());
                return Err(err);
            }
        }
        Ok(())
    }
}

// POST /api/obras/{id}/trabajadores
#[utoipa::path(
    post,
    path = "/api/obras/{id}/trabajadores",
    tag = "Asignaciones",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    request_body = CrearAsignacionPayload,
    responses(
        (status = 201, description = "Asignación creada; puede incluir advertencia de solape con otras obras", body = AsignacionCreada),
        (status = 404, description = "Obra o trabajador no encontrado"),
        (status = 409, description = "El trabajador tiene una ausencia bloqueante en ese periodo")
    )
)]
pub async fn crear_asignacion(
    State(app_state): State<AppState>,
    Path(obra_id): Path<Uuid>,
    Json(payload): Json<CrearAsignacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validar_consistencia().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("fechaFin", e);
        AppError::ValidationError(errors)
    })?;

    let resultado = app_state
        .asignacion_service
        .crear_asignacion(
            &app_state.db_pool,
            obra_id,
            payload.trabajador_id,
            payload.fecha_inicio,
            payload.fecha_fin,
            payload.notas.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(resultado)))
}

// GET /api/obras/{id}/trabajadores
#[utoipa::path(
    get,
    path = "/api/obras/{id}/trabajadores",
    tag = "Asignaciones",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    responses(
        (status = 200, description = "Asignaciones de la obra con el nombre de cada trabajador", body = [AsignacionConTrabajador]),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn listar_asignaciones_obra(
    State(app_state): State<AppState>,
    Path(obra_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let asignaciones = app_state.asignacion_service.listar_por_obra(obra_id).await?;
    Ok((StatusCode::OK, Json(asignaciones)))
}

// ---
// Payload: ActualizarAsignacion (parche campo a campo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarAsignacionPayload {
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub notas: Option<String>,
}

impl ActualizarAsignacionPayload {
    fn validar_consistencia(&self) -> Result<(), ValidationError> {
        if let (Some(inicio), Some(fin)) = (self.fecha_inicio, self.fecha_fin) {
            if fin < inicio {
                let mut err = ValidationError::new("rango_fechas");
                err.message =
                    Some("La fecha de fin no puede ser anterior a la de inicio.".into());
                return Err(err);
            }
        }
        Ok(())
    }
}

// PUT /api/asignaciones/{id}
#[utoipa::path(
    put,
    path = "/api/asignaciones/{id}",
    tag = "Asignaciones",
    params(("id" = Uuid, Path, description = "ID de la asignación")),
    request_body = ActualizarAsignacionPayload,
    responses(
        (status = 200, description = "Asignación actualizada; un cambio de fechas re-evalúa los conflictos", body = AsignacionCreada),
        (status = 404, description = "Asignación no encontrada"),
        (status = 409, description = "Las nuevas fechas chocan con una ausencia bloqueante")
    )
)]
pub async fn actualizar_asignacion(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarAsignacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validar_consistencia().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("fechaFin", e);
        AppError::ValidationError(errors)
    })?;

    let resultado = app_state
        .asignacion_service
        .actualizar_asignacion(
            &app_state.db_pool,
            id,
            payload.fecha_inicio,
            payload.fecha_fin,
            payload.notas.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(resultado)))
}

// POST /api/asignaciones/{id}/confirmar
#[utoipa::path(
    post,
    path = "/api/asignaciones/{id}/confirmar",
    tag = "Asignaciones",
    params(("id" = Uuid, Path, description = "ID de la asignación")),
    responses(
        (status = 200, description = "Asignación confirmada manualmente", body = ObraTrabajador),
        (status = 404, description = "Asignación no encontrada")
    )
)]
pub async fn confirmar_asignacion(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let asignacion = app_state.asignacion_service.confirmar_asignacion(id).await?;
    Ok((StatusCode::OK, Json(asignacion)))
}

// DELETE /api/asignaciones/{id}
#[utoipa::path(
    delete,
    path = "/api/asignaciones/{id}",
    tag = "Asignaciones",
    params(("id" = Uuid, Path, description = "ID de la asignación")),
    responses(
        (status = 204, description = "Asignación eliminada"),
        (status = 404, description = "Asignación no encontrada")
    )
)]
pub async fn eliminar_asignacion(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.asignacion_service.eliminar_asignacion(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn rango_invertido_no_pasa_la_consistencia() {
        let payload = CrearAsignacionPayload {
            trabajador_id: Uuid::new_v4(),
            fecha_inicio: fecha("2024-08-10"),
            fecha_fin: Some(fecha("2024-08-05")),
            notas: None,
        };
        assert!(payload.validar_consistencia().is_err());
    }

    #[test]
    fn sin_fecha_fin_es_valido() {
        // Un solo día: el servicio resuelve el fin al inicio.
        let payload = CrearAsignacionPayload {
            trabajador_id: Uuid::new_v4(),
            fecha_inicio: fecha("2024-08-10"),
            fecha_fin: None,
            notas: None,
        };
        assert!(payload.validar_consistencia().is_ok());
    }

    #[test]
    fn parche_solo_de_notas_es_valido() {
        let payload = ActualizarAsignacionPayload {
            fecha_inicio: None,
            fecha_fin: None,
            notas: Some("Cambio de turno".to_string()),
        };
        assert!(payload.validar_consistencia().is_ok());
    }
}
