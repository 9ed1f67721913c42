// src/handlers/tareas.rs

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
    models::tarea::{EstadoTarea, Tarea},
};

// ---
// Payload: CrearTarea
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearTareaPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    #[schema(example = "Levantar tabiques planta 2")]
    pub nombre: String,

    pub descripcion: Option<String>,

    // Si no se indica, la tarea nace pendiente.
    #[serde(default = "estado_por_defecto")]
    pub estado: EstadoTarea,
}

fn estado_por_defecto() -> EstadoTarea {
    EstadoTarea::Pendiente
}

// POST /api/obras/{id}/tareas
#[utoipa::path(
    post,
    path = "/api/obras/{id}/tareas",
    tag = "Tareas",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    request_body = CrearTareaPayload,
    responses(
        (status = 201, description = "Tarea creada", body = Tarea),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn crear_tarea(
    State(app_state): State<AppState>,
    Path(obra_id): Path<Uuid>,
    Json(payload): Json<CrearTareaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tarea = app_state
        .obra_service
        .crear_tarea(
            obra_id,
            &payload.nombre,
            payload.descripcion.as_deref(),
            payload.estado,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(tarea)))
}

// GET /api/obras/{id}/tareas
#[utoipa::path(
    get,
    path = "/api/obras/{id}/tareas",
    tag = "Tareas",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    responses(
        (status = 200, description = "Tareas de la obra", body = [Tarea]),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn listar_tareas(
    State(app_state): State<AppState>,
    Path(obra_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tareas = app_state.obra_service.listar_tareas(obra_id).await?;
    Ok((StatusCode::OK, Json(tareas)))
}

// ---
// Payload: ActualizarTarea (parche campo a campo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarTareaPayload {
    #[validate(length(min = 1, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<EstadoTarea>,
}

// PUT /api/tareas/{id}
#[utoipa::path(
    put,
    path = "/api/tareas/{id}",
    tag = "Tareas",
    params(("id" = Uuid, Path, description = "ID de la tarea")),
    request_body = ActualizarTareaPayload,
    responses(
        (status = 200, description = "Tarea actualizada", body = Tarea),
        (status = 404, description = "Tarea no encontrada")
    )
)]
pub async fn actualizar_tarea(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarTareaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tarea = app_state
        .obra_service
        .actualizar_tarea(
            id,
            payload.nombre.as_deref(),
            payload.descripcion.as_deref(),
            payload.estado,
        )
        .await?;

    Ok((StatusCode::OK, Json(tarea)))
}

// DELETE /api/tareas/{id}
#[utoipa::path(
    delete,
    path = "/api/tareas/{id}",
    tag = "Tareas",
    params(("id" = Uuid, Path, description = "ID de la tarea")),
    responses(
        (status = 204, description = "Tarea eliminada"),
        (status = 404, description = "Tarea no encontrada")
    )
)]
pub async fn eliminar_tarea(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.obra_service.eliminar_tarea(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
