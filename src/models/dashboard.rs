// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumenObras {
    pub sin_iniciar: i64,
    pub en_curso: i64,
    pub listas_para_cerrar: i64,
    pub finalizadas: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumenDashboard {
    pub obras: ResumenObras,
    pub trabajadores_total: i64,
    pub trabajadores_ausentes_hoy: i64,
    pub asignaciones_pendientes: i64,
}
