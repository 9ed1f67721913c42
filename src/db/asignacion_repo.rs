// src/db/asignacion_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::asignacion::{AsignacionConObra, AsignacionConTrabajador, ObraTrabajador},
};

#[derive(Clone)]
pub struct AsignacionRepository {
    pool: PgPool,
}

impl AsignacionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear_asignacion<'e, E>(
        &self,
        executor: E,
        obra_id: Uuid,
        trabajador_id: Uuid,
        fecha_inicio: NaiveDate,
        fecha_fin: Option<NaiveDate>,
        notas: Option<&str>,
        pendiente_confirmacion: bool,
    ) -> Result<ObraTrabajador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asignacion = sqlx::query_as::<_, ObraTrabajador>(
            r#"
            INSERT INTO obra_trabajadores
                (obra_id, trabajador_id, fecha_inicio, fecha_fin, notas, pendiente_confirmacion)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(obra_id)
        .bind(trabajador_id)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(notas)
        .bind(pendiente_confirmacion)
        .fetch_one(executor)
        .await?;

        Ok(asignacion)
    }

    pub async fn obtener_asignacion<'e, E>(
        &self,
        executor: E,
        asignacion_id: Uuid,
    ) -> Result<Option<ObraTrabajador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asignacion =
            sqlx::query_as::<_, ObraTrabajador>("SELECT * FROM obra_trabajadores WHERE id = $1")
                .bind(asignacion_id)
                .fetch_optional(executor)
                .await?;
        Ok(asignacion)
    }

    pub async fn listar_por_obra(
        &self,
        obra_id: Uuid,
    ) -> Result<Vec<AsignacionConTrabajador>, AppError> {
        let asignaciones = sqlx::query_as::<_, AsignacionConTrabajador>(
            r#"
            SELECT
                ot.id, ot.obra_id, ot.trabajador_id,
                t.nombre AS trabajador_nombre, t.apellidos AS trabajador_apellidos,
                ot.fecha_inicio, ot.fecha_fin, ot.notas, ot.pendiente_confirmacion
            FROM obra_trabajadores ot
            JOIN trabajadores t ON t.id = ot.trabajador_id
            WHERE ot.obra_id = $1
            ORDER BY ot.fecha_inicio ASC
            "#,
        )
        .bind(obra_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(asignaciones)
    }

    pub async fn listar_por_trabajador(
        &self,
        trabajador_id: Uuid,
    ) -> Result<Vec<AsignacionConObra>, AppError> {
        let asignaciones = sqlx::query_as::<_, AsignacionConObra>(
            r#"
            SELECT
                ot.id, ot.obra_id, o.nombre AS obra_nombre, ot.trabajador_id,
                ot.fecha_inicio, ot.fecha_fin, ot.notas, ot.pendiente_confirmacion
            FROM obra_trabajadores ot
            JOIN obras o ON o.id = ot.obra_id
            WHERE ot.trabajador_id = $1
            ORDER BY ot.fecha_inicio ASC
            "#,
        )
        .bind(trabajador_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(asignaciones)
    }

    /// Asignaciones del trabajador con el nombre de la obra, para el cruce
    /// de solapes dentro de una transacción.
    pub async fn asignaciones_de_trabajador<'e, E>(
        &self,
        executor: E,
        trabajador_id: Uuid,
    ) -> Result<Vec<AsignacionConObra>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asignaciones = sqlx::query_as::<_, AsignacionConObra>(
            r#"
            SELECT
                ot.id, ot.obra_id, o.nombre AS obra_nombre, ot.trabajador_id,
                ot.fecha_inicio, ot.fecha_fin, ot.notas, ot.pendiente_confirmacion
            FROM obra_trabajadores ot
            JOIN obras o ON o.id = ot.obra_id
            WHERE ot.trabajador_id = $1
            "#,
        )
        .bind(trabajador_id)
        .fetch_all(executor)
        .await?;
        Ok(asignaciones)
    }

    /// Asignaciones del trabajador en OTRAS obras (y, si se pasa, excluyendo
    /// una asignación concreta: la que se está re-evaluando).
    pub async fn asignaciones_otras_obras<'e, E>(
        &self,
        executor: E,
        trabajador_id: Uuid,
        obra_excluida: Uuid,
        asignacion_excluida: Option<Uuid>,
    ) -> Result<Vec<AsignacionConObra>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asignaciones = sqlx::query_as::<_, AsignacionConObra>(
            r#"
            SELECT
                ot.id, ot.obra_id, o.nombre AS obra_nombre, ot.trabajador_id,
                ot.fecha_inicio, ot.fecha_fin, ot.notas, ot.pendiente_confirmacion
            FROM obra_trabajadores ot
            JOIN obras o ON o.id = ot.obra_id
            WHERE ot.trabajador_id = $1
              AND ot.obra_id <> $2
              AND ($3::uuid IS NULL OR ot.id <> $3)
            "#,
        )
        .bind(trabajador_id)
        .bind(obra_excluida)
        .bind(asignacion_excluida)
        .fetch_all(executor)
        .await?;
        Ok(asignaciones)
    }

    pub async fn actualizar_asignacion<'e, E>(
        &self,
        executor: E,
        asignacion_id: Uuid,
        fecha_inicio: Option<NaiveDate>,
        fecha_fin: Option<NaiveDate>,
        notas: Option<&str>,
        pendiente_confirmacion: Option<bool>,
    ) -> Result<Option<ObraTrabajador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asignacion = sqlx::query_as::<_, ObraTrabajador>(
            r#"
            UPDATE obra_trabajadores SET
                fecha_inicio = COALESCE($2, fecha_inicio),
                fecha_fin = COALESCE($3, fecha_fin),
                notas = COALESCE($4, notas),
                pendiente_confirmacion = COALESCE($5, pendiente_confirmacion),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(asignacion_id)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(notas)
        .bind(pendiente_confirmacion)
        .fetch_optional(executor)
        .await?;

        Ok(asignacion)
    }

    /// Marca como pendientes de confirmación las asignaciones indicadas
    /// (afectadas por una baja recién registrada).
    pub async fn marcar_pendientes<'e, E>(
        &self,
        executor: E,
        asignacion_ids: &[Uuid],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            r#"
            UPDATE obra_trabajadores SET pendiente_confirmacion = TRUE, updated_at = now()
            WHERE id = ANY($1)
            "#,
        )
        .bind(asignacion_ids)
        .execute(executor)
        .await?;

        Ok(resultado.rows_affected())
    }

    /// Alta de una baja: auto-confirma en bloque TODAS las asignaciones
    /// pendientes del trabajador, sin re-comprobar fechas.
    pub async fn confirmar_pendientes_de_trabajador<'e, E>(
        &self,
        executor: E,
        trabajador_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            r#"
            UPDATE obra_trabajadores SET pendiente_confirmacion = FALSE, updated_at = now()
            WHERE trabajador_id = $1 AND pendiente_confirmacion = TRUE
            "#,
        )
        .bind(trabajador_id)
        .execute(executor)
        .await?;

        Ok(resultado.rows_affected())
    }

    /// Confirmación manual de una asignación concreta.
    pub async fn confirmar_asignacion(
        &self,
        asignacion_id: Uuid,
    ) -> Result<Option<ObraTrabajador>, AppError> {
        let asignacion = sqlx::query_as::<_, ObraTrabajador>(
            r#"
            UPDATE obra_trabajadores SET pendiente_confirmacion = FALSE, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(asignacion_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asignacion)
    }

    pub async fn eliminar_asignacion(&self, asignacion_id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM obra_trabajadores WHERE id = $1")
            .bind(asignacion_id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
