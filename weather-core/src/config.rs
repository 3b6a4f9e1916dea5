use std::net::SocketAddr;

use anyhow::{Context, Result, anyhow};

/// Default OpenWeatherMap current-weather endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Process-wide configuration, read once at startup and passed down
/// explicitly. Request-handling code never consults the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential forwarded to the upstream provider as `appid`.
    pub api_key: String,

    /// Full URL of the upstream current-weather endpoint. Overridable via
    /// `WEATHER_API_URL`, mainly so tests can point at a local stub.
    pub api_url: String,

    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// Fails when `WEATHER_API_KEY` is unset or empty. There is
    /// deliberately no fallback key: a missing credential is a startup
    /// error, not something to paper over with a baked-in literal.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("WEATHER_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "WEATHER_API_KEY is not set.\n\
                     Hint: export an OpenWeatherMap API key before starting the server."
                )
            })?;

        let api_url = lookup("WEATHER_API_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let bind_addr = lookup("WEATHER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("Invalid WEATHER_BIND_ADDR: {bind_addr}"))?;

        Ok(Self { api_key, api_url, bind_addr })
    }
}
