// src/models/trabajador.rs

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::asignacion::AsignacionConObra;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trabajador {
    pub id: Uuid,
    pub nombre: String,
    pub apellidos: String,
    pub telefono: Option<String>,
    pub puesto: Option<String>,
    // Marca al encargado que usa el portal público (fuera de este backend).
    pub es_encargado: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Tipos de ausencia ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_ausencia", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum TipoAusencia {
    Vacaciones,
    BajaEnfermedad,
    BajaAccidente,
    Permiso,
    Otro,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrabajadorAusencia {
    pub id: Uuid,
    pub trabajador_id: Uuid,
    pub tipo: TipoAusencia,
    pub fecha_inicio: NaiveDate,
    // NULL = ausencia abierta (sin fecha de fin conocida)
    pub fecha_fin: Option<NaiveDate>,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Respuestas ---

/// Resultado de crear una ausencia: si era una baja, las asignaciones
/// vigentes o futuras del trabajador quedan pendientes de confirmación
/// y se devuelven aquí a título informativo.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AusenciaCreada {
    pub ausencia: TrabajadorAusencia,
    pub asignaciones_afectadas: Vec<AsignacionConObra>,
}

/// Resultado de actualizar una ausencia. `asignaciones_confirmadas` cuenta
/// las asignaciones auto-confirmadas por el alta (cierre de una baja abierta).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AusenciaActualizada {
    pub ausencia: TrabajadorAusencia,
    pub asignaciones_confirmadas: u64,
}
