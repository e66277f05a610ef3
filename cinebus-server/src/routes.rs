//! HTTP route handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, Timelike};
use cinebus_core::loading::parse_time_of_day;
use cinebus_core::screenings_for_film;

use crate::dto::{
    ModelSummary, RouteRequest, RouteResponse, ScreeningRequest, ScreeningResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/model", get(model_summary))
        .route("/route", post(plan_route))
        .route("/screening", post(first_screening))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn model_summary(State(state): State<AppState>) -> Json<ModelSummary> {
    let model = &state.model;
    Json(ModelSummary {
        intersections: model.intersection_count(),
        stops: model.stop_count(),
        excluded_stops: model.excluded_stop_count(),
        edges: model.city_graph.edge_count(),
        screenings: state.screenings.len(),
    })
}

/// Fastest route between two coordinates.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let from = req.from.to_point()?;
    let to = req.to.to_point()?;

    let model = Arc::clone(&state.model);
    let response = tokio::task::spawn_blocking(move || {
        let path = model.find_path(&from, &to)?;
        tracing::debug!(
            seconds = path.travel_time,
            nodes = path.nodes().len(),
            "route found"
        );
        RouteResponse::from_path(&path, &model.city_graph)
    })
    .await??;

    Ok(Json(response))
}

/// First screening of a film the traveler can still reach.
async fn first_screening(
    State(state): State<AppState>,
    Json(req): Json<ScreeningRequest>,
) -> Result<Json<ScreeningResponse>, AppError> {
    let origin = req.from.to_point()?;
    let now = match req.time.as_deref() {
        Some(time) => parse_time_of_day(time)?,
        None => Local::now().num_seconds_from_midnight(),
    };

    let candidates = screenings_for_film(&state.screenings, &req.film);
    if candidates.is_empty() {
        return Err(AppError::NotFound {
            message: format!("No screenings of '{}'", req.film),
        });
    }

    let model = Arc::clone(&state.model);
    let film = req.film;
    let response = tokio::task::spawn_blocking(move || {
        let (path, screening) = model
            .first_reachable_screening(&candidates, &origin, now)
            .ok_or_else(|| AppError::NotFound {
                message: format!("No screening of '{film}' can be reached in time"),
            })?;
        ScreeningResponse::new(screening, now, &path, &model.city_graph)
    })
    .await??;

    Ok(Json(response))
}
