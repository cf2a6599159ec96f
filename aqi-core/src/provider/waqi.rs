//! World Air Quality Index (WAQI) client: station readings inside a bounding
//! box, each enriched with a display name from the per-station feed.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{AlertError, TransportError},
    model::{BoundingBox, Resolved, StationReading, UNKNOWN_STATION},
    provider::{ProviderId, truncate_body},
    transport::{HttpRequest, HttpTransport, ReqwestTransport},
};

const BOUNDS_URL: &str = "https://api.waqi.info/map/bounds/";
const FEED_URL: &str = "https://api.waqi.info/feed";

#[derive(Debug, Clone)]
pub struct WaqiClient<T = ReqwestTransport> {
    token: Option<String>,
    timeout: Duration,
    http: T,
}

impl WaqiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> WaqiClient<T> {
    pub fn with_transport(config: &Config, http: T) -> Self {
        Self {
            token: config.provider_api_key(ProviderId::Waqi).map(str::to_owned),
            timeout: config.request_timeout(),
            http,
        }
    }

    /// All stations inside `bounds` with a numeric AQI, in provider order.
    ///
    /// Makes one bounds request plus one feed request per surviving station,
    /// strictly one after another. A failed name lookup degrades that station's
    /// name to [`UNKNOWN_STATION`] and never fails the batch.
    pub async fn fetch_stations(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<StationReading>, AlertError> {
        let token = self.token.as_deref().ok_or(AlertError::Config(ProviderId::Waqi))?;

        let request = HttpRequest::get(BOUNDS_URL, self.timeout)
            .query("latlng", bounds.to_latlng_param())
            .query("token", token);

        debug!(latlng = %bounds.to_latlng_param(), "requesting WAQI bounds");
        let res = self.http.get(&request).await?;

        let envelope: WaqiEnvelope = serde_json::from_str(&res.body).map_err(|e| {
            AlertError::Provider(format!(
                "Failed to parse WAQI bounds JSON (status {}): {e}: {}",
                res.status,
                truncate_body(&res.body),
            ))
        })?;

        if envelope.status != "ok" {
            return Err(AlertError::Provider(format!(
                "WAQI API Error: {}",
                truncate_body(&res.body)
            )));
        }

        let rows: Vec<Value> = serde_json::from_value(envelope.data)
            .map_err(|e| AlertError::Provider(format!("Unexpected WAQI bounds payload: {e}")))?;

        let total = rows.len();
        let mut readings = Vec::with_capacity(total);

        for raw in rows {
            let row: WaqiBoundsStation = match serde_json::from_value(raw) {
                Ok(row) => row,
                Err(e) => {
                    debug!(error = %e, "dropping malformed station row");
                    continue;
                }
            };
            if row.uid.is_null() {
                debug!("dropping station row without uid");
                continue;
            }
            let id = uid_string(&row.uid);
            if !(row.lat.is_finite() && row.lon.is_finite()) {
                debug!(
                    station = %id,
                    lat = row.lat,
                    lon = row.lon,
                    "dropping station without finite coordinates"
                );
                continue;
            }
            let Some(aqi) = coerce_aqi(&row.aqi) else {
                debug!(station = %id, aqi = %row.aqi, "dropping station without numeric AQI");
                continue;
            };

            let station_name = self.resolve_station_name(token, &id).await;

            readings.push(StationReading {
                id,
                latitude: row.lat,
                longitude: row.lon,
                aqi,
                station_name,
            });
        }

        info!(kept = readings.len(), total, "fetched WAQI stations");
        Ok(readings)
    }

    /// Display name for one station, or the placeholder with the failure cause.
    pub async fn resolve_station_name(&self, token: &str, uid: &str) -> Resolved<String> {
        match self.lookup_station_name(token, uid).await {
            Ok(name) => Resolved::live(name),
            Err(err) => {
                warn!(station = %uid, kind = err.kind(), error = %err, "station name lookup failed");
                Resolved::fallback(UNKNOWN_STATION.to_string(), err.to_string())
            }
        }
    }

    async fn lookup_station_name(&self, token: &str, uid: &str) -> Result<String, NameLookupError> {
        let request =
            HttpRequest::get(format!("{FEED_URL}/@{uid}/"), self.timeout).query("token", token);

        let res = self.http.get(&request).await?;

        let envelope: WaqiEnvelope = serde_json::from_str(&res.body)
            .map_err(|e| NameLookupError::Malformed(e.to_string()))?;

        if envelope.status != "ok" {
            return Err(NameLookupError::Status(truncate_body(&res.body)));
        }

        let feed: WaqiFeed = serde_json::from_value(envelope.data)
            .map_err(|e| NameLookupError::Malformed(e.to_string()))?;

        Ok(feed.city.name)
    }
}

/// Why a station name could not be resolved. Every kind folds into the
/// placeholder; the kind is kept for logging and for the fallback cause.
#[derive(Debug, Error)]
enum NameLookupError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("feed status not ok: {0}")]
    Status(String),

    #[error("malformed feed response: {0}")]
    Malformed(String),
}

impl NameLookupError {
    fn kind(&self) -> &'static str {
        match self {
            NameLookupError::Transport(TransportError::Timeout(_)) => "timeout",
            NameLookupError::Transport(TransportError::Network(_)) => "network",
            NameLookupError::Status(_) => "status",
            NameLookupError::Malformed(_) => "malformed",
        }
    }
}

/// WAQI uids are usually numbers but occasionally arrive as strings.
fn uid_string(uid: &Value) -> String {
    match uid {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// WAQI reports AQI as a number, a numeric string, or a placeholder like "-".
fn coerce_aqi(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    value.is_finite().then_some(value)
}

#[derive(Debug, Deserialize)]
struct WaqiEnvelope {
    status: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct WaqiBoundsStation {
    uid: Value,
    lat: f64,
    lon: f64,
    #[serde(default)]
    aqi: Value,
}

#[derive(Debug, Deserialize)]
struct WaqiCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaqiFeed {
    city: WaqiCity,
}
