// src/models/tarea.rs

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estado_tarea", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum EstadoTarea {
    Pendiente,
    EnCurso,
    Hecha,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tarea {
    pub id: Uuid,
    pub obra_id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub estado: EstadoTarea,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
