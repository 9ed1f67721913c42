pub mod obra_repo;
pub use obra_repo::ObraRepository;
pub mod trabajador_repo;
pub use trabajador_repo::TrabajadorRepository;
pub mod asignacion_repo;
pub use asignacion_repo::AsignacionRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
