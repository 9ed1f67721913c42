pub mod disponibilidad;
pub mod obra_service;
pub use obra_service::ObraService;
pub mod trabajador_service;
pub use trabajador_service::TrabajadorService;
pub mod asignacion_service;
pub use asignacion_service::AsignacionService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
