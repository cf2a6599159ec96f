use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use crate::{
    model::{BoundingBox, GeoPoint},
    provider::ProviderId,
};

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration, read once at startup and handed to the clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub request_timeout_secs: u64,

    /// Example TOML:
    /// [providers.waqi]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,

    /// Region queried for stations.
    pub bounds: BoundingBox,

    /// Point alerts are computed against (nearest station).
    pub reference_point: GeoPoint,

    pub weather_point: GeoPoint,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            providers: HashMap::new(),
            bounds: BoundingBox { lat_min: 28.404, lon_min: 76.840, lat_max: 28.883, lon_max: 77.349 },
            reference_point: GeoPoint::new(28.63, 77.22),
            weather_point: GeoPoint::new(28.6, 77.2),
        }
    }
}

impl Config {
    /// Load config from disk (or defaults if absent), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.overlay_env_with(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Replace provider keys with non-empty values returned by `lookup` for
    /// each provider's environment variable.
    pub fn overlay_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for id in ProviderId::all() {
            if let Some(key) = lookup(id.env_var()).filter(|v| !v.trim().is_empty()) {
                self.upsert_provider_api_key(*id, key.trim().to_string());
            }
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "aqi-alert", "aqi-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });
    }

    /// Returns API key for a provider, if present and non-empty.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers
            .get(provider_id.as_str())
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.is_empty())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_delhi() {
        let cfg = Config::default();
        assert_eq!(cfg.bounds.to_latlng_param(), "28.404,76.84,28.883,77.349");
        assert_eq!(cfg.reference_point, GeoPoint::new(28.63, 77.22));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert!(!cfg.is_provider_configured(ProviderId::Waqi));
        assert!(!cfg.is_provider_configured(ProviderId::Fast2Sms));
    }

    #[test]
    fn env_overlay_sets_keys_and_ignores_blank() {
        let mut cfg = Config::default();
        cfg.overlay_env_with(|key| match key {
            "WAQI_API_TOKEN" => Some(" token-123 ".to_string()),
            "FAST2SMS_API_KEY" => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(cfg.provider_api_key(ProviderId::Waqi), Some("token-123"));
        assert_eq!(cfg.provider_api_key(ProviderId::Fast2Sms), None);
    }

    #[test]
    fn env_overrides_file_value() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::Fast2Sms, "FROM_FILE".into());
        cfg.overlay_env_with(|key| (key == "FAST2SMS_API_KEY").then(|| "FROM_ENV".to_string()));

        assert_eq!(cfg.provider_api_key(ProviderId::Fast2Sms), Some("FROM_ENV"));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::Waqi, String::new());
        assert!(!cfg.is_provider_configured(ProviderId::Waqi));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            request_timeout_secs = 5

            [providers.fast2sms]
            api_key = "SMS_KEY"
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.provider_api_key(ProviderId::Fast2Sms), Some("SMS_KEY"));
        assert_eq!(cfg.bounds, Config::default().bounds);
    }

    #[test]
    fn toml_roundtrip_preserves_points() {
        let mut cfg = Config::default();
        cfg.reference_point = GeoPoint::new(19.07, 72.87);
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.reference_point, cfg.reference_point);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load_from(std::path::Path::new("/nonexistent/aqi/config.toml")).unwrap();
        assert_eq!(cfg.request_timeout_secs, 10);
    }
}
