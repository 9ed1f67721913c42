// src/handlers/trabajadores.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::asignacion::AsignacionConObra,
    models::trabajador::Trabajador,
};

// ---
// Payload: CrearTrabajador
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearTrabajadorPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    #[schema(example = "María")]
    pub nombre: String,

    #[validate(length(min = 1, message = "Los apellidos son obligatorios."))]
    #[schema(example = "García López")]
    pub apellidos: String,

    pub telefono: Option<String>,
    pub puesto: Option<String>,

    #[serde(default)]
    pub es_encargado: bool,
}

// POST /api/trabajadores
#[utoipa::path(
    post,
    path = "/api/trabajadores",
    tag = "Trabajadores",
    request_body = CrearTrabajadorPayload,
    responses(
        (status = 201, description = "Trabajador creado", body = Trabajador)
    )
)]
pub async fn crear_trabajador(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearTrabajadorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let trabajador = app_state
        .trabajador_service
        .crear_trabajador(
            &payload.nombre,
            &payload.apellidos,
            payload.telefono.as_deref(),
            payload.puesto.as_deref(),
            payload.es_encargado,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(trabajador)))
}

// GET /api/trabajadores
#[utoipa::path(
    get,
    path = "/api/trabajadores",
    tag = "Trabajadores",
    responses(
        (status = 200, description = "Listado de trabajadores", body = [Trabajador])
    )
)]
pub async fn listar_trabajadores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let trabajadores = app_state.trabajador_service.listar_trabajadores().await?;
    Ok((StatusCode::OK, Json(trabajadores)))
}

// GET /api/trabajadores/{id}
#[utoipa::path(
    get,
    path = "/api/trabajadores/{id}",
    tag = "Trabajadores",
    params(("id" = Uuid, Path, description = "ID del trabajador")),
    responses(
        (status = 200, description = "Trabajador", body = Trabajador),
        (status = 404, description = "Trabajador no encontrado")
    )
)]
pub async fn obtener_trabajador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let trabajador = app_state
        .trabajador_service
        .obtener_trabajador(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(trabajador)))
}

// ---
// Payload: ActualizarTrabajador (parche campo a campo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarTrabajadorPayload {
    #[validate(length(min = 1, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    #[validate(length(min = 1, message = "Los apellidos no pueden estar vacíos."))]
    pub apellidos: Option<String>,
    pub telefono: Option<String>,
    pub puesto: Option<String>,
    pub es_encargado: Option<bool>,
}

// PUT /api/trabajadores/{id}
#[utoipa::path(
    put,
    path = "/api/trabajadores/{id}",
    tag = "Trabajadores",
    params(("id" = Uuid, Path, description = "ID del trabajador")),
    request_body = ActualizarTrabajadorPayload,
    responses(
        (status = 200, description = "Trabajador actualizado", body = Trabajador),
        (status = 404, description = "Trabajador no encontrado")
    )
)]
pub async fn actualizar_trabajador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarTrabajadorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let trabajador = app_state
        .trabajador_service
        .actualizar_trabajador(
            id,
            payload.nombre.as_deref(),
            payload.apellidos.as_deref(),
            payload.telefono.as_deref(),
            payload.puesto.as_deref(),
            payload.es_encargado,
        )
        .await?;

    Ok((StatusCode::OK, Json(trabajador)))
}

// DELETE /api/trabajadores/{id}
#[utoipa::path(
    delete,
    path = "/api/trabajadores/{id}",
    tag = "Trabajadores",
    params(("id" = Uuid, Path, description = "ID del trabajador")),
    responses(
        (status = 204, description = "Trabajador eliminado (ausencias y asignaciones en cascada)"),
        (status = 404, description = "Trabajador no encontrado")
    )
)]
pub async fn eliminar_trabajador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.trabajador_service.eliminar_trabajador(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/trabajadores/{id}/asignaciones
#[utoipa::path(
    get,
    path = "/api/trabajadores/{id}/asignaciones",
    tag = "Trabajadores",
    params(("id" = Uuid, Path, description = "ID del trabajador")),
    responses(
        (status = 200, description = "Asignaciones del trabajador con el nombre de cada obra", body = [AsignacionConObra]),
        (status = 404, description = "Trabajador no encontrado")
    )
)]
pub async fn listar_asignaciones_trabajador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let asignaciones = app_state.asignacion_service.listar_por_trabajador(id).await?;
    Ok((StatusCode::OK, Json(asignaciones)))
}
