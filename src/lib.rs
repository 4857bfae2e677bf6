use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{env::Envy, errors::DefaultApiError};

pub mod app;
pub mod generations;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("apikey"),
            HeaderName::from_static("x-client-info"),
        ])
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS]);

    let rate_limit = state.envy.rate_limit_per_second();

    Router::new()
        .route("/", get(app::controller::get_root))
        .route(
            "/generate",
            post(generations::controller::generate).options(generations::controller::preflight),
        )
        // layers
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!("request failed in middleware: {}", err);
                    DefaultApiError::ServiceOverloaded.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(rate_limit, Duration::from_secs(1))),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
