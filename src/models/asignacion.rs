// src/models/asignacion.rs

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Asignación trabajador <-> obra (tabla obra_trabajadores) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObraTrabajador {
    pub id: Uuid,
    pub obra_id: Uuid,
    pub trabajador_id: Uuid,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub notas: Option<String>,
    pub pendiente_confirmacion: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Variantes con el nombre de la entidad relacionada (JOIN) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AsignacionConObra {
    pub id: Uuid,
    pub obra_id: Uuid,
    pub obra_nombre: String,
    pub trabajador_id: Uuid,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub notas: Option<String>,
    pub pendiente_confirmacion: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AsignacionConTrabajador {
    pub id: Uuid,
    pub obra_id: Uuid,
    pub trabajador_id: Uuid,
    pub trabajador_nombre: String,
    pub trabajador_apellidos: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub notas: Option<String>,
    pub pendiente_confirmacion: bool,
}

// --- Respuestas ---

/// Resultado de crear (o re-evaluar) una asignación. La advertencia avisa
/// de solapes con otras obras; no impide la creación.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AsignacionCreada {
    pub asignacion: ObraTrabajador,
    pub advertencia: Option<String>,
}
