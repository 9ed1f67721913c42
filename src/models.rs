pub mod obra;
pub mod tarea;
pub mod trabajador;
pub mod asignacion;
pub mod dashboard;
