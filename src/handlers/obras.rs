// src/handlers/obras.rs

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
    models::obra::{ObraConEstado, ObraDetalle},
};

// ---
// Payload: CrearObra
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearObraPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    #[schema(example = "Reforma Plaza Mayor")]
    pub nombre: String,

    pub direccion: Option<String>,
    pub descripcion: Option<String>,
}

// POST /api/obras
#[utoipa::path(
    post,
    path = "/api/obras",
    tag = "Obras",
    request_body = CrearObraPayload,
    responses(
        (status = 201, description = "Obra creada", body = ObraConEstado)
    )
)]
pub async fn crear_obra(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearObraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let obra = app_state
        .obra_service
        .crear_obra(
            &payload.nombre,
            payload.direccion.as_deref(),
            payload.descripcion.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(obra)))
}

// GET /api/obras
#[utoipa::path(
    get,
    path = "/api/obras",
    tag = "Obras",
    responses(
        (status = 200, description = "Listado de obras con su estado derivado", body = [ObraConEstado])
    )
)]
pub async fn listar_obras(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let obras = app_state.obra_service.listar_obras().await?;
    Ok((StatusCode::OK, Json(obras)))
}

// GET /api/obras/{id}
#[utoipa::path(
    get,
    path = "/api/obras/{id}",
    tag = "Obras",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    responses(
        (status = 200, description = "Detalle de la obra con estado y tareas", body = ObraDetalle),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn obtener_obra(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalle = app_state
        .obra_service
        .obtener_obra(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(detalle)))
}

// ---
// Payload: ActualizarObra (parche campo a campo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarObraPayload {
    #[validate(length(min = 1, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub descripcion: Option<String>,
}

// PUT /api/obras/{id}
#[utoipa::path(
    put,
    path = "/api/obras/{id}",
    tag = "Obras",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    request_body = ActualizarObraPayload,
    responses(
        (status = 200, description = "Obra actualizada", body = ObraConEstado),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn actualizar_obra(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarObraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let obra = app_state
        .obra_service
        .actualizar_obra(
            id,
            payload.nombre.as_deref(),
            payload.direccion.as_deref(),
            payload.descripcion.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(obra)))
}

// DELETE /api/obras/{id}
#[utoipa::path(
    delete,
    path = "/api/obras/{id}",
    tag = "Obras",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    responses(
        (status = 204, description = "Obra eliminada (tareas y asignaciones en cascada)"),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn eliminar_obra(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.obra_service.eliminar_obra(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/obras/{id}/cerrar
#[utoipa::path(
    post,
    path = "/api/obras/{id}/cerrar",
    tag = "Obras",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    responses(
        (status = 200, description = "Obra cerrada; estado fijado a FINALIZADA", body = ObraConEstado),
        (status = 404, description = "Obra no encontrada"),
        (status = 409, description = "La obra no está lista para cerrar")
    )
)]
pub async fn cerrar_obra(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let obra = app_state
        .obra_service
        .cerrar_obra(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(obra)))
}
