use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WeatherError;

/// Simplified weather payload returned to HTTP clients. Built once per
/// request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    /// Echo of the caller's city string, byte-for-byte. Deliberately not
    /// the upstream-normalized name.
    pub city: String,
    pub weather: String,
    pub description: String,
    pub temperature: f64,
    pub humidity: u8,
}

/// Fields we actually project out of the upstream document. Everything
/// else in the (large) OpenWeatherMap response is ignored.
#[derive(Debug, Deserialize)]
struct UpstreamDocument {
    weather: Vec<UpstreamCondition>,
    main: UpstreamMain,
}

#[derive(Debug, Deserialize)]
struct UpstreamCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamMain {
    temp: f64,
    humidity: u8,
}

impl WeatherReport {
    /// Project a raw upstream document into a report for `city`.
    ///
    /// Decoding is two-stage: the document arrives as a generic
    /// `serde_json::Value` (the provider validates nothing), and this is
    /// the single fallible step that turns it into a typed result.
    /// An upstream "city not found" reply is detected before shape
    /// checking, since it is a well-formed JSON document in its own right.
    pub fn from_document(city: &str, document: Value) -> Result<Self, WeatherError> {
        if let Some(message) = city_not_found_message(&document) {
            return Err(WeatherError::CityNotFound { message });
        }

        let parsed: UpstreamDocument =
            serde_json::from_value(document).map_err(|_| WeatherError::ShapeInvalid)?;

        let condition = parsed.weather.first().ok_or(WeatherError::ShapeInvalid)?;

        Ok(Self {
            city: city.to_owned(),
            weather: condition.main.clone(),
            description: condition.description.clone(),
            temperature: parsed.main.temp,
            humidity: parsed.main.humidity,
        })
    }
}

/// OpenWeatherMap reports application-level errors through a `cod` field
/// that is a number on some paths and a string on others.
fn city_not_found_message(document: &Value) -> Option<String> {
    let not_found = match document.get("cod")? {
        Value::Number(n) => n.as_u64() == Some(404),
        Value::String(s) => s == "404",
        _ => false,
    };

    if !not_found {
        return None;
    }

    let message = document
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("city not found");

    Some(message.to_string())
}
