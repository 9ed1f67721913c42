// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Obra no encontrada")]
    ObraNoEncontrada,

    #[error("Tarea no encontrada")]
    TareaNoEncontrada,

    #[error("Trabajador no encontrado")]
    TrabajadorNoEncontrado,

    #[error("Ausencia no encontrada")]
    AusenciaNoEncontrada,

    #[error("Asignación no encontrada")]
    AsignacionNoEncontrada,

    // Solape con una ausencia bloqueante (o viceversa). El mensaje nombra
    // la entidad en conflicto y llega tal cual al cliente.
    #[error("{0}")]
    ConflictoDisponibilidad(String),

    #[error("{0}")]
    ObraNoCerrable(String),

    // Variante para errores de base de datos (sqlx)
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devuelve todos los detalles de la validación, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos no son válidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::ObraNoEncontrada => (StatusCode::NOT_FOUND, "Obra no encontrada.".to_string()),
            AppError::TareaNoEncontrada => (StatusCode::NOT_FOUND, "Tarea no encontrada.".to_string()),
            AppError::TrabajadorNoEncontrado => {
                (StatusCode::NOT_FOUND, "Trabajador no encontrado.".to_string())
            }
            AppError::AusenciaNoEncontrada => {
                (StatusCode::NOT_FOUND, "Ausencia no encontrada.".to_string())
            }
            AppError::AsignacionNoEncontrada => {
                (StatusCode::NOT_FOUND, "Asignación no encontrada.".to_string())
            }

            // Conflictos de negocio: el cliente debe cambiar los datos y reenviar.
            AppError::ConflictoDisponibilidad(msg) => (StatusCode::CONFLICT, msg),
            AppError::ObraNoCerrable(msg) => (StatusCode::CONFLICT, msg),

            // Todo lo demás (DatabaseError, InternalServerError) acaba en 500.
            // El detalle queda en el log; al cliente solo le llega un genérico.
            ref e => {
                tracing::error!("Error interno del servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ha ocurrido un error inesperado.".to_string(),
                )
            }
        };

        // Respuesta estándar para errores simples con un único mensaje.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
