// src/db/dashboard_repo.rs

use sqlx::{FromRow, PgPool};

use crate::common::error::AppError;

/// Fila agregada por obra para el resumen: el estado se deriva en el
/// servicio a partir de estos conteos.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ObraParaResumen {
    pub cerrada_manualmente: bool,
    pub total: i64,
    pub hechas: i64,
    pub en_curso: i64,
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn obras_para_resumen(&self) -> Result<Vec<ObraParaResumen>, AppError> {
        let filas = sqlx::query_as::<_, ObraParaResumen>(
            r#"
            SELECT
                o.cerrada_manualmente,
                COUNT(t.id) AS total,
                COUNT(t.id) FILTER (WHERE t.estado = 'HECHA') AS hechas,
                COUNT(t.id) FILTER (WHERE t.estado = 'EN_CURSO') AS en_curso
            FROM obras o
            LEFT JOIN tareas t ON t.obra_id = o.id
            GROUP BY o.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    pub async fn contar_trabajadores(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trabajadores")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Trabajadores con alguna ausencia activa hoy (de cualquier tipo).
    pub async fn contar_ausentes_hoy(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT trabajador_id)
            FROM trabajador_ausencias
            WHERE fecha_inicio <= CURRENT_DATE
              AND (fecha_fin IS NULL OR fecha_fin >= CURRENT_DATE)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn contar_asignaciones_pendientes(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM obra_trabajadores WHERE pendiente_confirmacion = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
