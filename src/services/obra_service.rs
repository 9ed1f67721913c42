// src/services/obra_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ObraRepository,
    models::obra::{ConteoTareas, EstadoObra, Obra, ObraConEstado, ObraDetalle},
    models::tarea::{EstadoTarea, Tarea},
    services::disponibilidad::{derivar_estado, derivar_estado_de_tareas},
};

#[derive(Clone)]
pub struct ObraService {
    repo: ObraRepository,
}

impl ObraService {
    pub fn new(repo: ObraRepository) -> Self {
        Self { repo }
    }

    // ---
    // Obras
    // ---

    pub async fn crear_obra(
        &self,
        nombre: &str,
        direccion: Option<&str>,
        descripcion: Option<&str>,
    ) -> Result<ObraConEstado, AppError> {
        let obra = self.repo.crear_obra(nombre, direccion, descripcion).await?;
        // Recién creada: sin tareas todavía.
        Ok(con_estado(obra, &ConteoTareas::default()))
    }

    /// Listado con el estado derivado de cada obra, resuelto con una sola
    /// consulta agregada de tareas.
    pub async fn listar_obras(&self) -> Result<Vec<ObraConEstado>, AppError> {
        let obras = self.repo.listar_obras().await?;
        let conteos = self.repo.contar_tareas_por_obra().await?;

        let por_obra: std::collections::HashMap<Uuid, ConteoTareas> =
            conteos.iter().map(|c| (c.obra_id, c.conteo())).collect();

        Ok(obras
            .into_iter()
            .map(|obra| {
                let conteo = por_obra.get(&obra.id).copied().unwrap_or_default();
                con_estado(obra, &conteo)
            })
            .collect())
    }

    pub async fn obtener_obra<'e, E>(
        &self,
        executor: E,
        obra_id: Uuid,
    ) -> Result<ObraDetalle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let obra = self
            .repo
            .obtener_obra(executor, obra_id)
            .await?
            .ok_or(AppError::ObraNoEncontrada)?;
        let tareas = self.repo.listar_tareas(obra_id).await?;
        let estado = derivar_estado_de_tareas(obra.cerrada_manualmente, &tareas);

        Ok(ObraDetalle { obra, estado, tareas })
    }

    pub async fn actualizar_obra(
        &self,
        obra_id: Uuid,
        nombre: Option<&str>,
        direccion: Option<&str>,
        descripcion: Option<&str>,
    ) -> Result<ObraConEstado, AppError> {
        let obra = self
            .repo
            .actualizar_obra(obra_id, nombre, direccion, descripcion)
            .await?
            .ok_or(AppError::ObraNoEncontrada)?;
        let tareas = self.repo.listar_tareas(obra_id).await?;
        let estado = derivar_estado_de_tareas(obra.cerrada_manualmente, &tareas);

        Ok(ObraConEstado { obra, estado })
    }

    pub async fn eliminar_obra(&self, obra_id: Uuid) -> Result<(), AppError> {
        if !self.repo.eliminar_obra(obra_id).await? {
            return Err(AppError::ObraNoEncontrada);
        }
        Ok(())
    }

    /// Cierre manual. Solo se acepta con el estado derivado en
    /// LISTA_PARA_CERRAR; una vez cerrada no hay vuelta atrás.
    pub async fn cerrar_obra<'e, E>(&self, executor: E, obra_id: Uuid) -> Result<ObraConEstado, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let obra = self
            .repo
            .obtener_obra(&mut *tx, obra_id)
            .await?
            .ok_or(AppError::ObraNoEncontrada)?;

        let conteo = self.repo.contar_tareas(&mut *tx, obra_id).await?;
        let estado_actual = derivar_estado(obra.cerrada_manualmente, &conteo);

        match estado_actual {
            EstadoObra::Finalizada => {
                return Err(AppError::ObraNoCerrable(
                    "La obra ya está finalizada.".to_string(),
                ));
            }
            EstadoObra::ListaParaCerrar => {}
            _ => {
                return Err(AppError::ObraNoCerrable(
                    "La obra no está lista para cerrar: tiene tareas sin terminar.".to_string(),
                ));
            }
        }

        let obra = self
            .repo
            .marcar_cerrada(&mut *tx, obra_id)
            .await?
            .ok_or(AppError::ObraNoEncontrada)?;

        tx.commit().await?;

        Ok(ObraConEstado {
            obra,
            estado: EstadoObra::Finalizada,
        })
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
        if !self.repo.existe_obra(obra_id).await? {
            return Err(AppError::ObraNoEncontrada);
        }
        self.repo.crear_tarea(obra_id, nombre, descripcion, estado).await
    }

    pub async fn listar_tareas(&self, obra_id: Uuid) -> Result<Vec<Tarea>, AppError> {
        if !self.repo.existe_obra(obra_id).await? {
            return Err(AppError::ObraNoEncontrada);
        }
        self.repo.listar_tareas(obra_id).await
    }

    pub async fn actualizar_tarea(
        &self,
        tarea_id: Uuid,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        estado: Option<EstadoTarea>,
    ) -> Result<Tarea, AppError> {
        self.repo
            .actualizar_tarea(tarea_id, nombre, descripcion, estado)
            .await?
            .ok_or(AppError::TareaNoEncontrada)
    }

    pub async fn eliminar_tarea(&self, tarea_id: Uuid) -> Result<(), AppError> {
        if !self.repo.eliminar_tarea(tarea_id).await? {
            return Err(AppError::TareaNoEncontrada);
        }
        Ok(())
    }
}

fn con_estado(obra: Obra, conteo: &ConteoTareas) -> ObraConEstado {
    let estado = derivar_estado(obra.cerrada_manualmente, conteo);
    ObraConEstado { obra, estado }
}
