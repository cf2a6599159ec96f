use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when a station's display name cannot be resolved.
pub const UNKNOWN_STATION: &str = "Unknown Station";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Rectangular query region, min/max latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// `lat_min,lon_min,lat_max,lon_max`, the form the bounds endpoint expects.
    pub fn to_latlng_param(&self) -> String {
        format!("{},{},{},{}", self.lat_min, self.lon_min, self.lat_max, self.lon_max)
    }
}

/// A value that was either fetched for real or replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Resolved<T> {
    Live { value: T },
    Fallback { value: T, cause: String },
}

impl<T> Resolved<T> {
    pub fn live(value: T) -> Self {
        Resolved::Live { value }
    }

    pub fn fallback(value: T, cause: impl Into<String>) -> Self {
        Resolved::Fallback { value, cause: cause.into() }
    }

    pub fn value(&self) -> &T {
        match self {
            Resolved::Live { value } | Resolved::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback { .. })
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            Resolved::Live { .. } => None,
            Resolved::Fallback { cause, .. } => Some(cause),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReading {
    /// Provider-assigned station uid, kept opaque.
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub aqi: f64,
    pub station_name: Resolved<String>,
}

impl StationReading {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn name(&self) -> &str {
        self.station_name.value()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub observed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherReport {
    Available(WeatherSnapshot),
    Unavailable { cause: String },
}

impl WeatherReport {
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            WeatherReport::Available(snapshot) => Some(snapshot),
            WeatherReport::Unavailable { .. } => None,
        }
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherReport::Available(w) => {
                write!(f, "{}°C, Wind {} km/h", w.temperature_c, w.wind_speed_kmh)
            }
            WeatherReport::Unavailable { .. } => f.write_str("Weather unavailable"),
        }
    }
}
