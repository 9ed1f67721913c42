// src/db/trabajador_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::trabajador::{TipoAusencia, Trabajador, TrabajadorAusencia},
};

#[derive(Clone)]
pub struct TrabajadorRepository {
    pool: PgPool,
}

impl TrabajadorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Trabajadores
    // ---

    pub async fn crear_trabajador(
        &self,
        nombre: &str,
        apellidos: &str,
        telefono: Option<&str>,
        puesto: Option<&str>,
        es_encargado: bool,
    ) -> Result<Trabajador, AppError> {
        let trabajador = sqlx::query_as::<_, Trabajador>(
            r#"
            INSERT INTO trabajadores (nombre, apellidos, telefono, puesto, es_encargado)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(apellidos)
        .bind(telefono)
        .bind(puesto)
        .bind(es_encargado)
        .fetch_one(&self.pool)
        .await?;

        Ok(trabajador)
    }

    pub async fn listar_trabajadores(&self) -> Result<Vec<Trabajador>, AppError> {
        let trabajadores = sqlx::query_as::<_, Trabajador>(
            "SELECT * FROM trabajadores ORDER BY apellidos ASC, nombre ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(trabajadores)
    }

    pub async fn obtener_trabajador<'e, E>(
        &self,
        executor: E,
        trabajador_id: Uuid,
    ) -> Result<Option<Trabajador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let trabajador =
            sqlx::query_as::<_, Trabajador>("SELECT * FROM trabajadores WHERE id = $1")
                .bind(trabajador_id)
                .fetch_optional(executor)
                .await?;
        Ok(trabajador)
    }

    pub async fn existe_trabajador(&self, trabajador_id: Uuid) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM trabajadores WHERE id = $1)",
        )
        .bind(trabajador_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }

    pub async fn actualizar_trabajador(
        &self,
        trabajador_id: Uuid,
        nombre: Option<&str>,
        apellidos: Option<&str>,
        telefono: Option<&str>,
        puesto: Option<&str>,
        es_encargado: Option<bool>,
    ) -> Result<Option<Trabajador>, AppError> {
        let trabajador = sqlx::query_as::<_, Trabajador>(
            r#"
            UPDATE trabajadores SET
                nombre = COALESCE($2, nombre),
                apellidos = COALESCE($3, apellidos),
                telefono = COALESCE($4, telefono),
                puesto = COALESCE($5, puesto),
                es_encargado = COALESCE($6, es_encargado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(trabajador_id)
        .bind(nombre)
        .bind(apellidos)
        .bind(telefono)
        .bind(puesto)
        .bind(es_encargado)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trabajador)
    }

    /// El borrado arrastra ausencias y asignaciones (ON DELETE CASCADE).
    pub async fn eliminar_trabajador(&self, trabajador_id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM trabajadores WHERE id = $1")
            .bind(trabajador_id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    // ---
    // Ausencias
    // ---

    pub async fn crear_ausencia<'e, E>(
        &self,
        executor: E,
        trabajador_id: Uuid,
        tipo: TipoAusencia,
        fecha_inicio: NaiveDate,
        fecha_fin: Option<NaiveDate>,
        notas: Option<&str>,
    ) -> Result<TrabajadorAusencia, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ausencia = sqlx::query_as::<_, TrabajadorAusencia>(
            r#"
            INSERT INTO trabajador_ausencias (trabajador_id, tipo, fecha_inicio, fecha_fin, notas)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(trabajador_id)
        .bind(tipo)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(notas)
        .fetch_one(executor)
        .await?;

        Ok(ausencia)
    }

    pub async fn listar_ausencias(
        &self,
        trabajador_id: Uuid,
    ) -> Result<Vec<TrabajadorAusencia>, AppError> {
        let ausencias = sqlx::query_as::<_, TrabajadorAusencia>(
            "SELECT * FROM trabajador_ausencias WHERE trabajador_id = $1 ORDER BY fecha_inicio DESC",
        )
        .bind(trabajador_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ausencias)
    }

    /// Todas las ausencias del trabajador, para el cruce de solapes dentro
    /// de la transacción de una nueva asignación.
    pub async fn ausencias_de_trabajador<'e, E>(
        &self,
        executor: E,
        trabajador_id: Uuid,
    ) -> Result<Vec<TrabajadorAusencia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ausencias = sqlx::query_as::<_, TrabajadorAusencia>(
            "SELECT * FROM trabajador_ausencias WHERE trabajador_id = $1",
        )
        .bind(trabajador_id)
        .fetch_all(executor)
        .await?;
        Ok(ausencias)
    }

    pub async fn obtener_ausencia<'e, E>(
        &self,
        executor: E,
        ausencia_id: Uuid,
    ) -> Result<Option<TrabajadorAusencia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ausencia = sqlx::query_as::<_, TrabajadorAusencia>(
            "SELECT * FROM trabajador_ausencias WHERE id = $1",
        )
        .bind(ausencia_id)
        .fetch_optional(executor)
        .await?;
        Ok(ausencia)
    }

    pub async fn actualizar_ausencia<'e, E>(
        &self,
        executor: E,
        ausencia_id: Uuid,
        tipo: Option<TipoAusencia>,
        fecha_inicio: Option<NaiveDate>,
        fecha_fin: Option<NaiveDate>,
        notas: Option<&str>,
    ) -> Result<Option<TrabajadorAusencia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ausencia = sqlx::query_as::<_, TrabajadorAusencia>(
            r#"
            UPDATE trabajador_ausencias SET
                tipo = COALESCE($2, tipo),
                fecha_inicio = COALESCE($3, fecha_inicio),
                fecha_fin = COALESCE($4, fecha_fin),
                notas = COALESCE($5, notas),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(ausencia_id)
        .bind(tipo)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(notas)
        .fetch_optional(executor)
        .await?;

        Ok(ausencia)
    }

    pub async fn eliminar_ausencia(&self, ausencia_id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM trabajador_ausencias WHERE id = $1")
            .bind(ausencia_id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
