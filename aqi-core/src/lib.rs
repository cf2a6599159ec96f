//! Core library for the `aqi` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the air-quality, weather and SMS providers
//! - Pure helpers: haversine distance, AQI classification, histogram bins
//! - Shared domain models (station readings, alerts, weather)
//!
//! It is used by `aqi-cli`, but can also be reused by other binaries or services.

pub mod alert;
pub mod category;
pub mod config;
pub mod error;
pub mod geo;
pub mod model;
pub mod provider;
pub mod stats;
pub mod transport;

pub use alert::AlertRequest;
pub use category::{AqiCategory, classify, marker_color};
pub use config::{Config, ProviderConfig};
pub use error::{AlertError, TransportError};
pub use geo::{distance_km, nearest_station};
pub use model::{BoundingBox, GeoPoint, Resolved, StationReading, WeatherReport, WeatherSnapshot};
pub use provider::{
    ProviderId,
    fast2sms::{Fast2SmsClient, SmsDelivery, normalize_phone},
    openmeteo::OpenMeteoClient,
    waqi::WaqiClient,
};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
