pub mod obras;
pub mod tareas;
pub mod trabajadores;
pub mod ausencias;
pub mod asignaciones;
pub mod dashboard;
