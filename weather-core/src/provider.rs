use async_trait::async_trait;
use serde_json::Value;

use crate::error::WeatherError;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// A source of current weather data for a free-text city name.
///
/// Implementations issue exactly one outbound request per call, never
/// retry, and return the provider's JSON document verbatim. Shape
/// validation is deliberately the caller's job: the provider's error
/// replies (unknown city, bad key) are themselves valid JSON documents.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, city: &str) -> Result<Value, WeatherError>;
}
