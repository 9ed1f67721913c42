// src/services/trabajador_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::db_utils::bloquear_trabajador,
    common::error::AppError,
    db::{AsignacionRepository, TrabajadorRepository},
    models::trabajador::{
        AusenciaActualizada, AusenciaCreada, TipoAusencia, Trabajador, TrabajadorAusencia,
    },
    services::disponibilidad::{es_alta, evaluar_ausencia},
};

#[derive(Clone)]
pub struct TrabajadorService {
    trabajador_repo: TrabajadorRepository,
    asignacion_repo: AsignacionRepository,
}

impl TrabajadorService {
    pub fn new(
        trabajador_repo: TrabajadorRepository,
        asignacion_repo: AsignacionRepository,
    ) -> Self {
        Self {
            trabajador_repo,
            asignacion_repo,
        }
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
        self.trabajador_repo
            .crear_trabajador(nombre, apellidos, telefono, puesto, es_encargado)
            .await
    }

    pub async fn listar_trabajadores(&self) -> Result<Vec<Trabajador>, AppError> {
        self.trabajador_repo.listar_trabajadores().await
    }

    pub async fn obtener_trabajador<'e, E>(
        &self,
        executor: E,
        trabajador_id: Uuid,
    ) -> Result<Trabajador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.trabajador_repo
            .obtener_trabajador(executor, trabajador_id)
            .await?
            .ok_or(AppError::TrabajadorNoEncontrado)
    }

    pub async fn actualizar_trabajador(
        &self,
        trabajador_id: Uuid,
        nombre: Option<&str>,
        apellidos: Option<&str>,
        telefono: Option<&str>,
        puesto: Option<&str>,
        es_encargado: Option<bool>,
    ) -> Result<Trabajador, AppError> {
        self.trabajador_repo
            .actualizar_trabajador(trabajador_id, nombre, apellidos, telefono, puesto, es_encargado)
            .await?
            .ok_or(AppError::TrabajadorNoEncontrado)
    }

    pub async fn eliminar_trabajador(&self, trabajador_id: Uuid) -> Result<(), AppError> {
        if !self.trabajador_repo.eliminar_trabajador(trabajador_id).await? {
            return Err(AppError::TrabajadorNoEncontrado);
        }
        Ok(())
    }

    // ---
    // Ausencias
    // ---

    /// Registra una ausencia aplicando la regla simétrica de conflictos:
    /// una bloqueante que pisa asignaciones se rechaza; una baja marca como
    /// pendientes las asignaciones vigentes o futuras y las devuelve.
    pub async fn crear_ausencia<'e, E>(
        &self,
        executor: E,
        trabajador_id: Uuid,
        tipo: TipoAusencia,
        fecha_inicio: NaiveDate,
        fecha_fin: Option<NaiveDate>,
        notas: Option<&str>,
    ) -> Result<AusenciaCreada, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.trabajador_repo
            .obtener_trabajador(&mut *tx, trabajador_id)
            .await?
            .ok_or(AppError::TrabajadorNoEncontrado)?;

        // Serializa el comprobar-y-escribir frente a otras mutaciones
        // concurrentes sobre el mismo trabajador.
        bloquear_trabajador(&mut *tx, trabajador_id).await?;

        let asignaciones = self
            .asignacion_repo
            .asignaciones_de_trabajador(&mut *tx, trabajador_id)
            .await?;

        let afectadas = evaluar_ausencia(tipo, &asignaciones, fecha_inicio, fecha_fin)?;

        let ausencia = self
            .trabajador_repo
            .crear_ausencia(&mut *tx, trabajador_id, tipo, fecha_inicio, fecha_fin, notas)
            .await?;

        let asignaciones_afectadas = if afectadas.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<Uuid> = afectadas.iter().map(|a| a.id).collect();
            self.asignacion_repo.marcar_pendientes(&mut *tx, &ids).await?;
            afectadas
                .into_iter()
                .map(|mut a| {
                    a.pendiente_confirmacion = true;
                    a
                })
                .collect()
        };

        tx.commit().await?;

        Ok(AusenciaCreada {
            ausencia,
            asignaciones_afectadas,
        })
    }

    pub async fn listar_ausencias(
        &self,
        trabajador_id: Uuid,
    ) -> Result<Vec<TrabajadorAusencia>, AppError> {
        if !self.trabajador_repo.existe_trabajador(trabajador_id).await? {
            return Err(AppError::TrabajadorNoEncontrado);
        }
        self.trabajador_repo.listar_ausencias(trabajador_id).await
    }

    /// Parche de una ausencia. Si el cambio cierra una baja que estaba
    /// abierta (el "alta"), TODAS las asignaciones pendientes del trabajador
    /// se auto-confirman en bloque, sin re-comprobar fechas.
    pub async fn actualizar_ausencia<'e, E>(
        &self,
        executor: E,
        ausencia_id: Uuid,
        tipo: Option<TipoAusencia>,
        fecha_inicio: Option<NaiveDate>,
        fecha_fin: Option<NaiveDate>,
        notas: Option<&str>,
    ) -> Result<AusenciaActualizada, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let actual = self
            .trabajador_repo
            .obtener_ausencia(&mut *tx, ausencia_id)
            .await?
            .ok_or(AppError::AusenciaNoEncontrada)?;

        bloquear_trabajador(&mut *tx, actual.trabajador_id).await?;

        // Comprueba el rango contra los valores ya fusionados (el payload
        // solo puede validarlo cuando llegan ambas fechas).
        let inicio_final = fecha_inicio.unwrap_or(actual.fecha_inicio);
        if let Some(fin_final) = fecha_fin.or(actual.fecha_fin) {
            if fin_final < inicio_final {
                let mut err = validator::ValidationError::new("rango_fechas");
                err.message =
                    Some("La fecha de fin no puede ser anterior a la de inicio.".into());
                let mut errors = validator::ValidationErrors::new();
                errors.add("fechaFin", err);
                return Err(AppError::ValidationError(errors));
            }
        }

        let alta = es_alta(actual.tipo, actual.fecha_fin, fecha_fin);

        let ausencia = self
            .trabajador_repo
            .actualizar_ausencia(&mut *tx, ausencia_id, tipo, fecha_inicio, fecha_fin, notas)
            .await?
            .ok_or(AppError::AusenciaNoEncontrada)?;

        let asignaciones_confirmadas = if alta {
            self.asignacion_repo
                .confirmar_pendientes_de_trabajador(&mut *tx, actual.trabajador_id)
                .await?
        } else {
            0
        };

        tx.commit().await?;

        if asignaciones_confirmadas > 0 {
            tracing::info!(
                trabajador_id = %actual.trabajador_id,
                asignaciones_confirmadas,
                "Alta registrada: asignaciones pendientes auto-confirmadas"
            );
        }

        Ok(AusenciaActualizada {
            ausencia,
            asignaciones_confirmadas,
        })
    }

    pub async fn eliminar_ausencia(&self, ausencia_id: Uuid) -> Result<(), AppError> {
        if !self.trabajador_repo.eliminar_ausencia(ausencia_id).await? {
            return Err(AppError::AusenciaNoEncontrada);
        }
        Ok(())
    }
}
