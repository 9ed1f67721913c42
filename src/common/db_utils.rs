// src/common/db_utils.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;

// ---
// Bloqueo consultivo por trabajador
// ---
/// Toma un advisory lock transaccional sobre el trabajador. Serializa las
/// mutaciones concurrentes (comprobar-y-escribir) sobre el mismo trabajador;
/// se libera solo al cerrar la transacción.
pub(crate) async fn bloquear_trabajador<'e, E>(
    executor: E,
    trabajador_id: Uuid,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(trabajador_id.to_string())
        .execute(executor)
        .await?;

    Ok(())
}
