// src/models/obra.rs

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::tarea::Tarea;

// --- Obra (fila de la tabla) ---
// El estado NO se persiste: se deriva de las tareas en cada lectura.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Obra {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: Option<String>,
    pub descripcion: Option<String>,
    pub cerrada_manualmente: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Estado derivado ---
// FINALIZADA solo se alcanza mediante el cierre manual explícito.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoObra {
    SinIniciar,
    EnCurso,
    ListaParaCerrar,
    Finalizada,
}

// --- Conteo agregado de tareas de una obra ---
// Entrada de la derivación de estado; las pendientes son total - hechas - en_curso.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct ConteoTareas {
    pub total: i64,
    pub hechas: i64,
    pub en_curso: i64,
}

// Fila del conteo agrupado por obra (listados y dashboard).
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ConteoTareasObra {
    pub obra_id: Uuid,
    pub total: i64,
    pub hechas: i64,
    pub en_curso: i64,
}

impl ConteoTareasObra {
    pub fn conteo(&self) -> ConteoTareas {
        ConteoTareas {
            total: self.total,
            hechas: self.hechas,
            en_curso: self.en_curso,
        }
    }
}

// --- Respuestas ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObraConEstado {
    #[serde(flatten)]
    pub obra: Obra,
    pub estado: EstadoObra,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObraDetalle {
    #[serde(flatten)]
    pub obra: Obra,
    pub estado: EstadoObra,
    pub tareas: Vec<Tarea>,
}
