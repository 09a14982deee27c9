//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::domain::{InvalidKey, Location, Metric};
use crate::planner::RouteOutcome;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir`, if given, is served under `/static`.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/locations", get(list_locations))
        .route("/api/route", get(plan_route));

    let router = match static_dir {
        Some(dir) => router.nest_service("/static", ServeDir::new(dir)),
        None => router,
    };

    router.with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Departure and arrival locations for the start/end pickers.
async fn list_locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    let graph = state.graph();

    Json(LocationsResponse {
        currency: state.currency.to_string(),
        departures: graph.departures().to_vec(),
        arrivals: graph.arrivals().to_vec(),
    })
}

/// Find the fastest or cheapest route between two locations.
async fn plan_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    // Check the key before anything else
    let metric: Metric = required(req.key.as_deref(), "key")?.parse()?;
    let start = parse_location(req.start.as_deref(), "start")?;
    let end = parse_location(req.end.as_deref(), "end")?;

    let outcome = state.routes.route(&start, &end, metric).await;

    match outcome.as_ref() {
        RouteOutcome::Found(itinerary) => {
            info!(
                %start,
                %end,
                %metric,
                legs = itinerary.len(),
                "Planned route"
            );
            Ok(Json(RouteResponse::from_itinerary(
                itinerary,
                &state.currency,
            )))
        }
        RouteOutcome::NoRoute => Err(AppError::NotFound {
            message: format!("No route from {start} to {end}"),
        }),
    }
}

/// Returns the trimmed parameter, or a bad request naming it.
fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Missing query parameter: {name}"),
        })
}

fn parse_location(value: Option<&str>, name: &str) -> Result<Location, AppError> {
    let value = required(value, name)?;
    Location::parse(value).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {name}: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<InvalidKey> for AppError {
    fn from(e: InvalidKey) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
