// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{ResumenDashboard, ResumenObras},
    models::obra::{ConteoTareas, EstadoObra},
    services::disponibilidad::derivar_estado,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn resumen(&self) -> Result<ResumenDashboard, AppError> {
        let filas = self.repo.obras_para_resumen().await?;

        let mut obras = ResumenObras::default();
        for fila in &filas {
            let conteo = ConteoTareas {
                total: fila.total,
                hechas: fila.hechas,
                en_curso: fila.en_curso,
            };
            match derivar_estado(fila.cerrada_manualmente, &conteo) {
                EstadoObra::SinIniciar => obras.sin_iniciar += 1,
                EstadoObra::EnCurso => obras.en_curso += 1,
                EstadoObra::ListaParaCerrar => obras.listas_para_cerrar += 1,
                EstadoObra::Finalizada => obras.finalizadas += 1,
            }
        }

        Ok(ResumenDashboard {
            obras,
            trabajadores_total: self.repo.contar_trabajadores().await?,
            trabajadores_ausentes_hoy: self.repo.contar_ausentes_hoy().await?,
            asignaciones_pendientes: self.repo.contar_asignaciones_pendientes().await?,
        })
    }
}
