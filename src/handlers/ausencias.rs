// src/handlers/ausencias.rs

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
    models::trabajador::{AusenciaActualizada, AusenciaCreada, TipoAusencia, TrabajadorAusencia},
};

// ---
// Payload: CrearAusencia
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearAusenciaPayload {
    pub tipo: TipoAusencia,

    #[schema(example = "2024-08-01")]
    pub fecha_inicio: NaiveDate,

    // Sin fecha de fin = ausencia abierta (p. ej. una baja sin alta).
    pub fecha_fin: Option<NaiveDate>,

    pub notas: Option<String>,
}

impl CrearAusenciaPayload {
    // Coherencia entre campos que `validator` no cubre por sí solo.
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

// POST /api/trabajadores/{id}/ausencias
#[utoipa::path(
    post,
    path = "/api/trabajadores/{id}/ausencias",
    tag = "Ausencias",
    params(("id" = Uuid, Path, description = "ID del trabajador")),
    request_body = CrearAusenciaPayload,
    responses(
        (status = 201, description = "Ausencia creada; si era una baja, incluye las asignaciones marcadas como pendientes", body = AusenciaCreada),
        (status = 404, description = "Trabajador no encontrado"),
        (status = 409, description = "Ausencia bloqueante que pisa asignaciones existentes")
    )
)]
pub async fn crear_ausencia(
    State(app_state): State<AppState>,
    Path(trabajador_id): Path<Uuid>,
    Json(payload): Json<CrearAusenciaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validar_consistencia().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("fechaFin", e);
        AppError::ValidationError(errors)
    })?;

    let resultado = app_state
        .trabajador_service
        .crear_ausencia(
            &app_state.db_pool,
            trabajador_id,
            payload.tipo,
            payload.fecha_inicio,
            payload.fecha_fin,
            payload.notas.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(resultado)))
}

// GET /api/trabajadores/{id}/ausencias
#[utoipa::path(
    get,
    path = "/api/trabajadores/{id}/ausencias",
    tag = "Ausencias",
    params(("id" = Uuid, Path, description = "ID del trabajador")),
    responses(
        (status = 200, description = "Ausencias del trabajador", body = [TrabajadorAusencia]),
        (status = 404, description = "Trabajador no encontrado")
    )
)]
pub async fn listar_ausencias(
    State(app_state): State<AppState>,
    Path(trabajador_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let ausencias = app_state
        .trabajador_service
        .listar_ausencias(trabajador_id)
        .await?;
    Ok((StatusCode::OK, Json(ausencias)))
}

// ---
// Payload: ActualizarAusencia (parche campo a campo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarAusenciaPayload {
    pub tipo: Option<TipoAusencia>,
    pub fecha_inicio: Option<NaiveDate>,
    // Poner fecha de fin a una baja abierta es el "alta": dispara la
    // auto-confirmación en bloque de las asignaciones pendientes.
    pub fecha_fin: Option<NaiveDate>,
    pub notas: Option<String>,
}

impl ActualizarAusenciaPayload {
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

// PUT /api/ausencias/{id}
#[utoipa::path(
    put,
    path = "/api/ausencias/{id}",
    tag = "Ausencias",
    params(("id" = Uuid, Path, description = "ID de la ausencia")),
    request_body = ActualizarAusenciaPayload,
    responses(
        (status = 200, description = "Ausencia actualizada; informa de las asignaciones auto-confirmadas por el alta", body = AusenciaActualizada),
        (status = 404, description = "Ausencia no encontrada")
    )
)]
pub async fn actualizar_ausencia(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarAusenciaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validar_consistencia().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("fechaFin", e);
        AppError::ValidationError(errors)
    })?;

    let resultado = app_state
        .trabajador_service
        .actualizar_ausencia(
            &app_state.db_pool,
            id,
            payload.tipo,
            payload.fecha_inicio,
            payload.fecha_fin,
            payload.notas.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(resultado)))
}

// DELETE /api/ausencias/{id}
#[utoipa::path(
    delete,
    path = "/api/ausencias/{id}",
    tag = "Ausencias",
    params(("id" = Uuid, Path, description = "ID de la ausencia")),
    responses(
        (status = 204, description = "Ausencia eliminada"),
        (status = 404, description = "Ausencia no encontrada")
    )
)]
pub async fn eliminar_ausencia(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.trabajador_service.eliminar_ausencia(id).await?;
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
        let payload = CrearAusenciaPayload {
            tipo: TipoAusencia::Vacaciones,
            fecha_inicio: fecha("2024-08-15"),
            fecha_fin: Some(fecha("2024-08-01")),
            notas: None,
        };
        assert!(payload.validar_consistencia().is_err());
    }

    #[test]
    fn ausencia_abierta_es_valida() {
        let payload = CrearAusenciaPayload {
            tipo: TipoAusencia::BajaEnfermedad,
            fecha_inicio: fecha("2024-08-01"),
            fecha_fin: None,
            notas: None,
        };
        assert!(payload.validar_consistencia().is_ok());
    }

    #[test]
    fn mismo_dia_es_valido() {
        let payload = CrearAusenciaPayload {
            tipo: TipoAusencia::Permiso,
            fecha_inicio: fecha("2024-08-01"),
            fecha_fin: Some(fecha("2024-08-01")),
            notas: None,
        };
        assert!(payload.validar_consistencia().is_ok());
    }
}
