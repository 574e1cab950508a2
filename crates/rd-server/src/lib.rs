//! # rd-server
//!
//! JSON-over-HTTP surface for the delivery workflow. Handlers are thin: they
//! decode the request, resolve the acting user, call one `RdService` method,
//! and map its error category to a status code.

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use rd_config::ServerConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Header carrying the acting user's id.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Build the API router over shared state.
pub fn router(state: Arc<AppState>, cors_enabled: bool) -> Router {
    let app = Router::new()
        .route("/api/health", get(routes::health::health_check))
        // Projects
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/api/projects/:id",
            get(routes::projects::get_project).delete(routes::projects::delete_project),
        )
        .route(
            "/api/projects/:id/transition",
            post(routes::projects::transition_project),
        )
        .route(
            "/api/projects/:id/sub-projects",
            get(routes::sub_projects::list_sub_projects)
                .post(routes::sub_projects::create_sub_project),
        )
        // Sub-projects
        .route(
            "/api/sub-projects/:id",
            get(routes::sub_projects::get_sub_project),
        )
        .route(
            "/api/sub-projects/:id/transition",
            post(routes::sub_projects::transition_sub_project),
        )
        .route(
            "/api/sub-projects/:id/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/sub-projects/:id/assignments",
            get(routes::assignments::list_assignments)
                .post(routes::assignments::assign_companies),
        )
        .route(
            "/api/sub-projects/:id/assignments/:company",
            axum::routing::delete(routes::assignments::remove_assignment),
        )
        .route(
            "/api/sub-projects/:id/companies/:company/progress",
            get(routes::assignments::company_progress),
        )
        .route(
            "/api/sub-projects/:id/companies/:company/eligibility",
            get(routes::reports::eligibility),
        )
        .route(
            "/api/sub-projects/:id/reports",
            get(routes::reports::list_reports).post(routes::reports::create_report),
        )
        .route(
            "/api/sub-projects/:id/reports/:company",
            get(routes::reports::get_report),
        )
        // Tasks
        .route(
            "/api/tasks/:id",
            get(routes::tasks::get_task).patch(routes::tasks::update_task),
        )
        .route(
            "/api/tasks/:id/transition",
            post(routes::tasks::transition_task),
        )
        .route("/api/tasks/:id/dates", get(routes::schedule::list_task_dates))
        .route(
            "/api/tasks/:id/companies/:company/dates",
            put(routes::schedule::set_task_dates),
        )
        // Companies
        .route(
            "/api/companies",
            get(routes::companies::list_companies).post(routes::companies::register_company),
        )
        .route("/api/companies/:id", get(routes::companies::get_company))
        // Audit
        .route("/api/audit", get(routes::audit::query_audit))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    }
}

/// Bind and serve until the listener fails.
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound, or
/// the server stops with an I/O error.
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address {}: {e}", config.bind_address()))?;

    let app = router(state, config.cors_enabled);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, cors = config.cors_enabled, "readiness API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
