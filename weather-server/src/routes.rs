use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use weather_core::{WeatherError, WeatherProvider, WeatherReport};

/// Shared state for the single route: the upstream provider, read-only
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

/// Build the application router. Every response passes through a
/// permissive CORS layer so browser clients on any origin can call the
/// endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// `GET /weather?city=<name>`
///
/// Linear pipeline, terminal at each failure: validate the query, fetch
/// the raw upstream document, project it into the response payload.
async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherReport>, ApiError> {
    let city = match query.city.as_deref() {
        Some(city) if !city.is_empty() => city,
        _ => return Err(ApiError::MissingCity),
    };

    let document = state.provider.current_weather(city).await?;
    let report = WeatherReport::from_document(city, document)?;

    tracing::debug!(city, "served weather report");
    Ok(Json(report))
}

/// Request-level failures, mapped to HTTP statuses in one place.
enum ApiError {
    MissingCity,
    Weather(WeatherError),
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self::Weather(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingCity => {
                tracing::warn!("request rejected: city parameter missing or empty");
                (StatusCode::BAD_REQUEST, "City parameter is required".to_string())
            }
            Self::Weather(WeatherError::CityNotFound { message }) => {
                (StatusCode::NOT_FOUND, message)
            }
            Self::Weather(WeatherError::Transport(err)) => {
                // Log the cause server-side; the client gets a generic
                // message rather than transport internals.
                tracing::error!(error = %err, "upstream request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Network error: failed to reach the weather provider".to_string(),
                )
            }
            Self::Weather(err @ WeatherError::ShapeInvalid) => {
                tracing::error!("upstream response missing weather data");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
