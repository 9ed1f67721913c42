// src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa el logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien aquí: si la configuración falla, la aplicación
    // no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación.");

    // Ejecuta las migraciones de SQLx al arrancar
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallo al ejecutar las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas con éxito!");

    // Obras: CRUD, cierre manual, tareas y asignaciones anidadas
    let obras_routes = Router::new()
        .route("/", post(handlers::obras::crear_obra).get(handlers::obras::listar_obras))
        .route(
            "/{id}",
            get(handlers::obras::obtener_obra)
                .put(handlers::obras::actualizar_obra)
                .delete(handlers::obras::eliminar_obra),
        )
        .route("/{id}/cerrar", post(handlers::obras::cerrar_obra))
        .route(
            "/{id}/tareas",
            post(handlers::tareas::crear_tarea).get(handlers::tareas::listar_tareas),
        )
        .route(
            "/{id}/trabajadores",
            post(handlers::asignaciones::crear_asignacion)
                .get(handlers::asignaciones::listar_asignaciones_obra),
        );

    let tareas_routes = Router::new().route(
        "/{id}",
        put(handlers::tareas::actualizar_tarea).delete(handlers::tareas::eliminar_tarea),
    );

    let trabajadores_routes = Router::new()
        .route(
            "/",
            post(handlers::trabajadores::crear_trabajador)
                .get(handlers::trabajadores::listar_trabajadores),
        )
        .route(
            "/{id}",
            get(handlers::trabajadores::obtener_trabajador)
                .put(handlers::trabajadores::actualizar_trabajador)
                .delete(handlers::trabajadores::eliminar_trabajador),
        )
        .route(
            "/{id}/ausencias",
            post(handlers::ausencias::crear_ausencia).get(handlers::ausencias::listar_ausencias),
        )
        .route(
            "/{id}/asignaciones",
            get(handlers::trabajadores::listar_asignaciones_trabajador),
        );

    let ausencias_routes = Router::new().route(
        "/{id}",
        put(handlers::ausencias::actualizar_ausencia)
            .delete(handlers::ausencias::eliminar_ausencia),
    );

    let asignaciones_routes = Router::new()
        .route(
            "/{id}",
            put(handlers::asignaciones::actualizar_asignacion)
                .delete(handlers::asignaciones::eliminar_asignacion),
        )
        .route(
            "/{id}/confirmar",
            post(handlers::asignaciones::confirmar_asignacion),
        );

    let dashboard_routes = Router::new().route("/resumen", get(handlers::dashboard::resumen));

    // Combina todo en el router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/obras", obras_routes)
        .nest("/api/tareas", tareas_routes)
        .nest("/api/trabajadores", trabajadores_routes)
        .nest("/api/ausencias", ausencias_routes)
        .nest("/api/asignaciones", asignaciones_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Arranca el servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Fallo al iniciar el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Error en el servidor Axum");
}
