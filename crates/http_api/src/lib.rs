mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{Router, middleware as axum_middleware, routing::post};

pub use errors::HttpError;
pub use state::{HttpState, TOKEN_HEADER, generate_api_token};

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/check_limit", post(handlers::check_limit))
        .route("/record", post(handlers::record))
        .route("/usage_overview", post(handlers::usage_overview))
        .route("/events", post(handlers::events))
        .route("/cost_estimate", post(handlers::cost_estimate))
        .route("/cost_state", post(handlers::cost_state))
        .route("/cost_gate", post(handlers::cost_gate))
        .route("/plans_get", post(handlers::plans_get))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_token,
        ))
        .route("/health", post(handlers::health));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .with_state(state)
}
