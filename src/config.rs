// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{AsignacionRepository, DashboardRepository, ObraRepository, TrabajadorRepository},
    services::{AsignacionService, DashboardService, ObraService, TrabajadorService},
};

// El estado compartido, accesible desde toda la aplicación.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub obra_service: ObraService,
    pub trabajador_service: TrabajadorService,
    pub asignacion_service: AsignacionService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");

        // Conecta a la base de datos, con '?' para propagar errores
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida con éxito!");

        // --- Monta el grafo de dependencias ---
        let obra_repo = ObraRepository::new(db_pool.clone());
        let trabajador_repo = TrabajadorRepository::new(db_pool.clone());
        let asignacion_repo = AsignacionRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let obra_service = ObraService::new(obra_repo.clone());
        let trabajador_service =
            TrabajadorService::new(trabajador_repo.clone(), asignacion_repo.clone());
        let asignacion_service =
            AsignacionService::new(asignacion_repo, obra_repo, trabajador_repo);
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            obra_service,
            trabajador_service,
            asignacion_service,
            dashboard_service,
        })
    }
}
