//! Core library for the city weather proxy.
//!
//! This crate defines:
//! - Configuration loaded from the environment at startup
//! - The upstream provider client (OpenWeatherMap)
//! - The projection from the raw upstream document into the API payload
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use model::WeatherReport;
pub use provider::{OpenWeatherProvider, WeatherProvider};
