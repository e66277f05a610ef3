//! HTTP service for the cinema planner.
//!
//! Serves routes and screening lookups from a [`cinebus_core::CityModel`]
//! built at startup. Queries run on the blocking pool since path finding is
//! CPU bound.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

use axum::BoxError;
use axum::Router;
use axum::error_handling::HandleErrorLayer;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerSettings, ServiceConfig};
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;

/// Router with tracing, CORS, timeout and concurrency limit layers
pub fn app(state: AppState, settings: &ServerSettings) -> Router {
    create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(HandleErrorLayer::new(handle_layer_error))
            .timeout(settings.timeout())
            .concurrency_limit(settings.concurrency_limit.max(1)),
    )
}

async fn handle_layer_error(error: BoxError) -> AppError {
    if error.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cinebus_core::{CityModel, RoutingParams, build_city_graph};
    use cinebus_core::loading::streets::{StreetNodeRecord, street_graph_from_records};
    use cinebus_core::model::TransitGraph;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn layered_app_serves_requests() {
        let streets = street_graph_from_records(
            vec![StreetNodeRecord {
                id: 1,
                lon: 2.15,
                lat: 41.38,
            }],
            Vec::new(),
        );
        let params = RoutingParams::default();
        let city = build_city_graph(&streets, &TransitGraph::new(), &params).unwrap();
        let state = AppState::new(CityModel::new(streets, city, params), Vec::new());

        let response = app(state, &ServerSettings::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
