use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{config::Config, error::WeatherError};

use super::WeatherProvider;

/// Bound on the single outbound call; the upstream API has no SLA and an
/// unbounded request would block the handler indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the OpenWeatherMap current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    api_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for OpenWeatherMap")?;

        Ok(Self {
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            http,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<Value, WeatherError> {
        let res = self
            .http
            .get(&self.api_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        // The status line is ignored on purpose: OpenWeatherMap pairs
        // non-2xx statuses with JSON error bodies the projection layer
        // knows how to interpret.
        let document = res.json::<Value>().await.map_err(|err| {
            if err.is_decode() {
                WeatherError::ShapeInvalid
            } else {
                WeatherError::Transport(err)
            }
        })?;

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider_for(api_url: String) -> OpenWeatherProvider {
        let config = Config {
            api_key: "test-key".to_string(),
            api_url,
            bind_addr: "127.0.0.1:0".parse().expect("valid addr"),
        };

        OpenWeatherProvider::new(&config).expect("client must build")
    }

    #[tokio::test]
    async fn forwards_city_key_and_metric_units() {
        let server = MockServer::start().await;
        let body = json!({
            "cod": 200,
            "weather": [{"main": "Clouds", "description": "scattered clouds"}],
            "main": {"temp": 15.5, "humidity": 72},
        });

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(format!("{}/data/2.5/weather", server.uri()));
        let document = provider.current_weather("London").await.expect("fetch must succeed");

        assert_eq!(document, body);
    }

    #[tokio::test]
    async fn error_status_bodies_are_returned_verbatim() {
        let server = MockServer::start().await;
        let body = json!({"cod": "404", "message": "city not found"});

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let provider = provider_for(format!("{}/data/2.5/weather", server.uri()));
        let document = provider.current_weather("Nowhereville").await.expect("body must decode");

        assert_eq!(document, body);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_transport_error() {
        // Nothing listens on port 1; the connection is refused immediately.
        let provider = provider_for("http://127.0.0.1:1/data/2.5/weather".to_string());
        let err = provider.current_weather("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_a_shape_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let provider = provider_for(format!("{}/data/2.5/weather", server.uri()));
        let err = provider.current_weather("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::ShapeInvalid));
    }
}
