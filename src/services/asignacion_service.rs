// src/services/asignacion_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::db_utils::bloquear_trabajador,
    common::error::AppError,
    db::{AsignacionRepository, ObraRepository, TrabajadorRepository},
    models::asignacion::{
        AsignacionConObra, AsignacionConTrabajador, AsignacionCreada, ObraTrabajador,
    },
    services::disponibilidad::evaluar_asignacion,
};

#[derive(Clone)]
pub struct AsignacionService {
    asignacion_repo: AsignacionRepository,
    obra_repo: ObraRepository,
    trabajador_repo: TrabajadorRepository,
}

impl AsignacionService {
    pub fn new(
        asignacion_repo: AsignacionRepository,
        obra_repo: ObraRepository,
        trabajador_repo: TrabajadorRepository,
    ) -> Self {
        Self {
            asignacion_repo,
            obra_repo,
            trabajador_repo,
        }
    }

    /// Crea una asignación aplicando las reglas de disponibilidad:
    /// ausencia bloqueante → rechazo; baja → se crea pendiente de
    /// confirmación; solape con otras obras → advertencia no fatal.
    pub async fn crear_asignacion<'e, E>(
        &self,
        executor: E,
        obra_id: Uuid,
        trabajador_id: Uuid,
        fecha_inicio: NaiveDate,
        fecha_fin: Option<NaiveDate>,
        notas: Option<&str>,
    ) -> Result<AsignacionCreada, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.obra_repo
            .obtener_obra(&mut *tx, obra_id)
            .await?
            .ok_or(AppError::ObraNoEncontrada)?;
        self.trabajador_repo
            .obtener_trabajador(&mut *tx, trabajador_id)
            .await?
            .ok_or(AppError::TrabajadorNoEncontrado)?;

        // Serializa el comprobar-y-escribir por trabajador: dos peticiones
        // simultáneas sobre el mismo trabajador ya no pueden colarse ambas.
        bloquear_trabajador(&mut *tx, trabajador_id).await?;

        // Sin fecha de fin: asignación de un solo día.
        let fecha_fin = fecha_fin.unwrap_or(fecha_inicio);

        let ausencias = self
            .trabajador_repo
            .ausencias_de_trabajador(&mut *tx, trabajador_id)
            .await?;
        let otras = self
            .asignacion_repo
            .asignaciones_otras_obras(&mut *tx, trabajador_id, obra_id, None)
            .await?;

        let evaluacion = evaluar_asignacion(&ausencias, &otras, fecha_inicio, fecha_fin)?;

        let asignacion = self
            .asignacion_repo
            .crear_asignacion(
                &mut *tx,
                obra_id,
                trabajador_id,
                fecha_inicio,
                Some(fecha_fin),
                notas,
                evaluacion.pendiente_confirmacion,
            )
            .await?;

        tx.commit().await?;

        Ok(AsignacionCreada {
            asignacion,
            advertencia: evaluacion.advertencia,
        })
    }

    /// Parche de una asignación. Un cambio de fechas re-ejecuta la
    /// evaluación completa (excluyendo esta misma asignación del cruce).
    pub async fn actualizar_asignacion<'e, E>(
        &self,
        executor: E,
        asignacion_id: Uuid,
        fecha_inicio: Option<NaiveDate>,
        fecha_fin: Option<NaiveDate>,
        notas: Option<&str>,
    ) -> Result<AsignacionCreada, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let actual = self
            .asignacion_repo
            .obtener_asignacion(&mut *tx, asignacion_id)
            .await?
            .ok_or(AppError::AsignacionNoEncontrada)?;

        bloquear_trabajador(&mut *tx, actual.trabajador_id).await?;

        let cambia_fechas = fecha_inicio.is_some() || fecha_fin.is_some();

        let (pendiente, advertencia) = if cambia_fechas {
            let nuevo_inicio = fecha_inicio.unwrap_or(actual.fecha_inicio);
            let nuevo_fin = fecha_fin
                .or(actual.fecha_fin)
                .unwrap_or(nuevo_inicio);

            // El payload solo puede validar el rango cuando llegan ambas
            // fechas; aquí se comprueba contra los valores ya fusionados.
            if nuevo_fin < nuevo_inicio {
                return Err(rango_invertido());
            }

            let ausencias = self
                .trabajador_repo
                .ausencias_de_trabajador(&mut *tx, actual.trabajador_id)
                .await?;
            let otras = self
                .asignacion_repo
                .asignaciones_otras_obras(
                    &mut *tx,
                    actual.trabajador_id,
                    actual.obra_id,
                    Some(asignacion_id),
                )
                .await?;

            let evaluacion = evaluar_asignacion(&ausencias, &otras, nuevo_inicio, nuevo_fin)?;
            (Some(evaluacion.pendiente_confirmacion), evaluacion.advertencia)
        } else {
            (None, None)
        };

        let asignacion = self
            .asignacion_repo
            .actualizar_asignacion(&mut *tx, asignacion_id, fecha_inicio, fecha_fin, notas, pendiente)
            .await?
            .ok_or(AppError::AsignacionNoEncontrada)?;

        tx.commit().await?;

        Ok(AsignacionCreada {
            asignacion,
            advertencia,
        })
    }

    pub async fn listar_por_obra(
        &self,
        obra_id: Uuid,
    ) -> Result<Vec<AsignacionConTrabajador>, AppError> {
        if !self.obra_repo.existe_obra(obra_id).await? {
            return Err(AppError::ObraNoEncontrada);
        }
        self.asignacion_repo.listar_por_obra(obra_id).await
    }

    pub async fn listar_por_trabajador(
        &self,
        trabajador_id: Uuid,
    ) -> Result<Vec<AsignacionConObra>, AppError> {
        if !self.trabajador_repo.existe_trabajador(trabajador_id).await? {
            return Err(AppError::TrabajadorNoEncontrado);
        }
        self.asignacion_repo.listar_por_trabajador(trabajador_id).await
    }

    pub async fn confirmar_asignacion(
        &self,
        asignacion_id: Uuid,
    ) -> Result<ObraTrabajador, AppError> {
        self.asignacion_repo
            .confirmar_asignacion(asignacion_id)
            .await?
            .ok_or(AppError::AsignacionNoEncontrada)
    }

    pub async fn eliminar_asignacion(&self, asignacion_id: Uuid) -> Result<(), AppError> {
        if !self.asignacion_repo.eliminar_asignacion(asignacion_id).await? {
            return Err(AppError::AsignacionNoEncontrada);
        }
        Ok(())
    }
}

fn rango_invertido() -> AppError {
    let mut err = validator::ValidationError::new("rango_fechas");
    err.message = Some("La fecha de fin no puede ser anterior a la de inicio.".into());
    let mut errors = validator::ValidationErrors::new();
    errors.add("fechaFin", err);
    AppError::ValidationError(errors)
}
