// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Obras ---
        handlers::obras::crear_obra,
        handlers::obras::listar_obras,
        handlers::obras::obtener_obra,
        handlers::obras::actualizar_obra,
        handlers::obras::eliminar_obra,
        handlers::obras::cerrar_obra,

        // --- Tareas ---
        handlers::tareas::crear_tarea,
        handlers::tareas::listar_tareas,
        handlers::tareas::actualizar_tarea,
        handlers::tareas::eliminar_tarea,

        // --- Trabajadores ---
        handlers::trabajadores::crear_trabajador,
        handlers::trabajadores::listar_trabajadores,
        handlers::trabajadores::obtener_trabajador,
        handlers::trabajadores::actualizar_trabajador,
        handlers::trabajadores::eliminar_trabajador,
        handlers::trabajadores::listar_asignaciones_trabajador,

        // --- Ausencias ---
        handlers::ausencias::crear_ausencia,
        handlers::ausencias::listar_ausencias,
        handlers::ausencias::actualizar_ausencia,
        handlers::ausencias::eliminar_ausencia,

        // --- Asignaciones ---
        handlers::asignaciones::crear_asignacion,
        handlers::asignaciones::listar_asignaciones_obra,
        handlers::asignaciones::actualizar_asignacion,
        handlers::asignaciones::confirmar_asignacion,
        handlers::asignaciones::eliminar_asignacion,

        // --- Dashboard ---
        handlers::dashboard::resumen,
    ),
    components(
        schemas(
            // --- Obras ---
            models::obra::Obra,
            models::obra::EstadoObra,
            models::obra::ObraConEstado,
            models::obra::ObraDetalle,
            handlers::obras::CrearObraPayload,
            handlers::obras::ActualizarObraPayload,

            // --- Tareas ---
            models::tarea::Tarea,
            models::tarea::EstadoTarea,
            handlers::tareas::CrearTareaPayload,
            handlers::tareas::ActualizarTareaPayload,

            // --- Trabajadores ---
            models::trabajador::Trabajador,
            models::trabajador::TipoAusencia,
            models::trabajador::TrabajadorAusencia,
            models::trabajador::AusenciaCreada,
            models::trabajador::AusenciaActualizada,
            handlers::trabajadores::CrearTrabajadorPayload,
            handlers::trabajadores::ActualizarTrabajadorPayload,
            handlers::ausencias::CrearAusenciaPayload,
            handlers::ausencias::ActualizarAusenciaPayload,

            // --- Asignaciones ---
            models::asignacion::ObraTrabajador,
            models::asignacion::AsignacionConObra,
            models::asignacion::AsignacionConTrabajador,
            models::asignacion::AsignacionCreada,
            handlers::asignaciones::CrearAsignacionPayload,
            handlers::asignaciones::ActualizarAsignacionPayload,

            // --- Dashboard ---
            models::dashboard::ResumenObras,
            models::dashboard::ResumenDashboard,
        )
    ),
    tags(
        (name = "Obras", description = "Gestión de obras y su estado derivado"),
        (name = "Tareas", description = "Tareas de cada obra"),
        (name = "Trabajadores", description = "Plantilla de trabajadores"),
        (name = "Ausencias", description = "Vacaciones, bajas y permisos"),
        (name = "Asignaciones", description = "Asignación de trabajadores a obras con control de conflictos"),
        (name = "Dashboard", description = "Indicadores generales")
    )
)]
pub struct ApiDoc;
