//! Route tables and the assembled application router.

pub mod common;
pub mod docs;
pub mod todo;

pub use common::common_routes_with_ready;
pub use docs::{docs_routes, ApiDoc};
pub use todo::todo_routes;

use crate::config::AppConfig;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: health/readiness, OpenAPI document and the CRUD endpoints.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(docs_routes())
        .merge(todo_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(config.body_limit_bytes)),
        )
}
