use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

use crate::{
    config::Config,
    domain::utils::{current_local_time, html_to_text, normalize_icao, parse_webpage_url},
    errors::ToolError,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub country: Option<String>,
    pub temperature: f64,
    pub description: String,
    pub humidity: f64,
    pub pressure: f64,
}

/// Backing implementation for each dispatchable function. Parameters arrive already
/// checked against the function's parameter contract but not otherwise validated.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    async fn current_time(&self) -> Result<String, ToolError> {
        Ok(current_local_time())
    }

    async fn webpage_text(&self, url: &str) -> Result<String, ToolError>;

    async fn metar(&self, icao: &str) -> Result<String, ToolError>;

    async fn weather(&self, city: &str) -> Result<WeatherReport, ToolError>;
}

/// Upstream service base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub aviation_weather: String,
    pub openweather: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            aviation_weather: "https://aviationweather.gov".to_string(),
            openweather: "https://api.openweathermap.org".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoLocation {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Clone)]
pub struct HttpToolProvider {
    client: Client,
    weather_api_key: Option<String>,
    endpoints: Endpoints,
}

impl HttpToolProvider {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            weather_api_key: config.weather_api_key.clone(),
            endpoints: Endpoints::default(),
        })
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    async fn fetch_text(&self, request: reqwest::RequestBuilder) -> Result<String, reqwest::Error> {
        request.send().await?.error_for_status()?.text().await
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, reqwest::Error> {
        request.send().await?.error_for_status()?.json().await
    }

    async fn geocode(&self, city: &str, api_key: &str) -> Result<Option<GeoLocation>, ToolError> {
        let url = format!("{}/geo/1.0/direct", self.endpoints.openweather);
        let locations: Vec<GeoLocation> = self
            .fetch_json(
                self.client
                    .get(&url)
                    .query(&[("q", city), ("limit", "1"), ("appid", api_key)]),
            )
            .await
            .map_err(|err| {
                warn!(city = %city, error = %err, "geocoding request failed");
                ToolError::upstream("Failed to geocode city")
            })?;

        Ok(locations.into_iter().next())
    }

    async fn current_conditions(
        &self,
        location: &GeoLocation,
        api_key: &str,
    ) -> Result<CurrentConditions, ToolError> {
        let url = format!("{}/data/2.5/weather", self.endpoints.openweather);
        let lat = location.lat.to_string();
        let lon = location.lon.to_string();

        self.fetch_json(self.client.get(&url).query(&[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", api_key),
            ("units", "metric"),
        ]))
        .await
        .map_err(|err| {
            warn!(city = %location.name, error = %err, "weather request failed");
            ToolError::upstream("Failed to fetch weather data")
        })
    }
}

#[async_trait]
impl ToolProvider for HttpToolProvider {
    async fn webpage_text(&self, url: &str) -> Result<String, ToolError> {
        let url = parse_webpage_url(url)?;

        let html = self
            .fetch_text(self.client.get(url.clone()))
            .await
            .map_err(|err| {
                warn!(url = %url, error = %err, "webpage fetch failed");
                ToolError::upstream("Failed to fetch webpage content")
            })?;

        Ok(html_to_text(&html))
    }

    async fn metar(&self, icao: &str) -> Result<String, ToolError> {
        let icao = normalize_icao(icao)?;
        let url = format!("{}/api/data/metar", self.endpoints.aviation_weather);

        let body = self
            .fetch_text(
                self.client
                    .get(&url)
                    .query(&[("ids", icao.as_str()), ("format", "raw")]),
            )
            .await
            .map_err(|err| {
                warn!(icao = %icao, error = %err, "metar fetch failed");
                ToolError::upstream("Failed to fetch METAR data")
            })?;

        let metar = body.trim();
        if metar.is_empty() {
            return Err(ToolError::not_found(format!("No METAR data found for {icao}")));
        }

        Ok(metar.to_string())
    }

    async fn weather(&self, city: &str) -> Result<WeatherReport, ToolError> {
        let Some(api_key) = self.weather_api_key.as_deref() else {
            return Err(ToolError::config_missing("Weather API key not configured"));
        };

        let location = self
            .geocode(city, api_key)
            .await?
            .ok_or_else(|| ToolError::not_found(format!("City not found: {city}")))?;
        let conditions = self.current_conditions(&location, api_key).await?;

        Ok(WeatherReport {
            city: location.name,
            country: location.country,
            temperature: conditions.main.temp,
            description: conditions
                .weather
                .into_iter()
                .next()
                .map(|condition| condition.description)
                .unwrap_or_default(),
            humidity: conditions.main.humidity,
            pressure: conditions.main.pressure,
        })
    }
}
