use chrono::NaiveDateTime;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::{
    config::Config,
    model::{GeoPoint, WeatherReport, WeatherSnapshot},
    provider::truncate_body,
    transport::{HttpRequest, HttpTransport, ReqwestTransport},
};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Current conditions from Open-Meteo. Needs no credential.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient<T = ReqwestTransport> {
    point: GeoPoint,
    timeout: Duration,
    http: T,
}

impl OpenMeteoClient {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> OpenMeteoClient<T> {
    pub fn with_transport(config: &Config, http: T) -> Self {
        Self { point: config.weather_point, timeout: config.request_timeout(), http }
    }

    /// Never fails: any problem yields [`WeatherReport::Unavailable`].
    pub async fn current_weather(&self) -> WeatherReport {
        match self.fetch_snapshot().await {
            Ok(snapshot) => WeatherReport::Available(snapshot),
            Err(cause) => {
                warn!(%cause, "weather unavailable");
                WeatherReport::Unavailable { cause }
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<WeatherSnapshot, String> {
        let request = HttpRequest::get(FORECAST_URL, self.timeout)
            .query("latitude", self.point.latitude.to_string())
            .query("longitude", self.point.longitude.to_string())
            .query("current_weather", "true");

        let res = self.http.get(&request).await.map_err(|e| e.to_string())?;

        let parsed: OmResponse = serde_json::from_str(&res.body).map_err(|e| {
            format!(
                "Failed to parse Open-Meteo JSON (status {}): {e}: {}",
                res.status,
                truncate_body(&res.body)
            )
        })?;

        let current = parsed.current_weather;
        let observed_at = current
            .time
            .as_deref()
            .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok());

        Ok(WeatherSnapshot {
            temperature_c: current.temperature,
            wind_speed_kmh: current.windspeed,
            observed_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: OmCurrentWeather,
}
