use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};

/// Create the application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Settlement
        .route("/settle", post(handlers::settle))
        .route("/calcular_ajustes", post(handlers::calcular_ajustes))
        // Event store
        .route(
            "/barbacoas",
            get(handlers::list_barbacoas).post(handlers::create_barbacoa),
        )
        .route(
            "/barbacoas/:name",
            get(handlers::get_barbacoa).delete(handlers::delete_barbacoa),
        )
        .route("/cuadrilla", get(handlers::list_roster))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
