// src/db/obra_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::obra::{ConteoTareas, ConteoTareasObra, Obra},
    models::tarea::{EstadoTarea, Tarea},
};

#[derive(Clone)]
pub struct ObraRepository {
    pool: PgPool,
}

impl ObraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Obras
    // ---

    pub async fn crear_obra(
        &self,
        nombre: &str,
        direccion: Option<&str>,
        descripcion: Option<&str>,
    ) -> Result<Obra, AppError> {
        let obra = sqlx::query_as::<_, Obra>(
            r#"
            INSERT INTO obras (nombre, direccion, descripcion)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(direccion)
        .bind(descripcion)
        .fetch_one(&self.pool)
        .await?;

        Ok(obra)
    }

    pub async fn listar_obras(&self) -> Result<Vec<Obra>, AppError> {
        let obras = sqlx::query_as::<_, Obra>("SELECT * FROM obras ORDER BY nombre ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(obras)
    }

    pub async fn obtener_obra<'e, E>(
        &self,
        executor: E,
        obra_id: Uuid,
    ) -> Result<Option<Obra>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let obra = sqlx::query_as::<_, Obra>("SELECT * FROM obras WHERE id = $1")
            .bind(obra_id)
            .fetch_optional(executor)
            .await?;
        Ok(obra)
    }

    pub async fn existe_obra(&self, obra_id: Uuid) -> Result<bool, AppError> {
        let existe =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM obras WHERE id = $1)")
                .bind(obra_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(existe)
    }

    /// Parche campo a campo: un valor ausente deja la columna como estaba.
    pub async fn actualizar_obra(
        &self,
        obra_id: Uuid,
        nombre: Option<&str>,
        direccion: Option<&str>,
        descripcion: Option<&str>,
    ) -> Result<Option<Obra>, AppError> {
        let obra = sqlx::query_as::<_, Obra>(
            r#"
            UPDATE obras SET
                nombre = COALESCE($2, nombre),
                direccion = COALESCE($3, direccion),
                descripcion = COALESCE($4, descripcion),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(obra_id)
        .bind(nombre)
        .bind(direccion)
        .bind(descripcion)
        .fetch_optional(&self.pool)
        .await?;

        Ok(obra)
    }

    pub async fn eliminar_obra(&self, obra_id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM obras WHERE id = $1")
            .bind(obra_id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    /// Fija el cierre manual. El estado derivado pasa a FINALIZADA y ya no
    /// vuelve a calcularse a partir de las tareas.
    pub async fn marcar_cerrada<'e, E>(
        &self,
        executor: E,
        obra_id: Uuid,
    ) -> Result<Option<Obra>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let obra = sqlx::query_as::<_, Obra>(
            r#"
            UPDATE obras SET cerrada_manualmente = TRUE, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(obra_id)
        .fetch_optional(executor)
        .await?;

        Ok(obra)
    }

    // ---
    // Conteos de tareas (entrada de la derivación de estado)
    // ---

    pub async fn contar_tareas<'e, E>(
        &self,
        executor: E,
        obra_id: Uuid,
    ) -> Result<ConteoTareas, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let conteo = sqlx::query_as::<_, ConteoTareas>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE estado = 'HECHA') AS hechas,
                COUNT(*) FILTER (WHERE estado = 'EN_CURSO') AS en_curso
            FROM tareas
            WHERE obra_id = $1
            "#,
        )
        .bind(obra_id)
        .fetch_one(executor)
        .await?;

        Ok(conteo)
    }

    /// Conteos de todas las obras de una vez, para los listados y el dashboard.
    pub async fn contar_tareas_por_obra(&self) -> Result<Vec<ConteoTareasObra>, AppError> {
        let conteos = sqlx::query_as::<_, ConteoTareasObra>(
            r#"
            SELECT
                obra_id,
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE estado = 'HECHA') AS hechas,
                COUNT(*) FILTER (WHERE estado = 'EN_CURSO') AS en_curso
            FROM tareas
            GROUP BY obra_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(conteos)
    }

    // ---
    // Tareas
    // ---

    pub async fn crear_tarea(
        &self,
        obra_id: Uuid,
        nombre: &str,
        descripcion: Option<&str>,
        estado: EstadoTarea,
    ) -> Result<Tarea, AppError> {
        let tarea = sqlx::query_as::<_, Tarea>(
            r#"
            INSERT INTO tareas (obra_id, nombre, descripcion, estado)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(obra_id)
        .bind(nombre)
        .bind(descripcion)
        .bind(estado)
        .fetch_one(&self.pool)
        .await?;

        Ok(tarea)
    }

    pub async fn listar_tareas(&self, obra_id: Uuid) -> Result<Vec<Tarea>, AppError> {
        let tareas = sqlx::query_as::<_, Tarea>(
            "SELECT * FROM tareas WHERE obra_id = $1 ORDER BY created_at ASC",
        )
        .bind(obra_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tareas)
    }

    pub async fn actualizar_tarea(
        &self,
        tarea_id: Uuid,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        estado: Option<EstadoTarea>,
    ) -> Result<Option<Tarea>, AppError> {
        let tarea = sqlx::query_as::<_, Tarea>(
            r#"
            UPDATE tareas SET
                nombre = COALESCE($2, nombre),
                descripcion = COALESCE($3, descripcion),
                estado = COALESCE($4, estado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(tarea_id)
        .bind(nombre)
        .bind(descripcion)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tarea)
    }

    pub async fn eliminar_tarea(&self, tarea_id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM tareas WHERE id = $1")
            .bind(tarea_id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
