use thiserror::Error;

/// Failures a weather lookup can surface. Every variant is terminal for
/// the request: there is no retry or local recovery anywhere in the
/// pipeline.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The upstream provider could not be reached at the network level
    /// (connection error, timeout, DNS failure).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream document lacks the fields required for projection.
    /// Covers a missing or empty `weather` sequence, a missing `main`
    /// object, and any other shape surprise.
    #[error("Weather information not found in the response")]
    ShapeInvalid,

    /// The upstream provider reported an application-level "city not
    /// found" error rather than weather data.
    #[error("{message}")]
    CityNotFound { message: String },
}
