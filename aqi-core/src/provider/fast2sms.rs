//! Fast2SMS gateway client (Indian mobile numbers only).

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::AlertError,
    provider::{ProviderId, truncate_body},
    transport::{HttpRequest, HttpTransport, ReqwestTransport},
};

const BULK_URL: &str = "https://www.fast2sms.com/dev/bulkV2";
const COUNTRY_PREFIX: &str = "+91";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsDelivery {
    pub number: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct Fast2SmsClient<T = ReqwestTransport> {
    api_key: Option<String>,
    timeout: Duration,
    http: T,
}

impl Fast2SmsClient {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> Fast2SmsClient<T> {
    pub fn with_transport(config: &Config, http: T) -> Self {
        Self {
            api_key: config.provider_api_key(ProviderId::Fast2Sms).map(str::to_owned),
            timeout: config.request_timeout(),
            http,
        }
    }

    /// Sends `message` to `phone_number` with a single gateway request.
    ///
    /// The credential is checked before the number, and both before any
    /// network traffic. No retries.
    pub async fn send(&self, phone_number: &str, message: &str) -> Result<SmsDelivery, AlertError> {
        let api_key = self.api_key.as_deref().ok_or(AlertError::Config(ProviderId::Fast2Sms))?;
        let number = normalize_phone(phone_number)?;

        let request = HttpRequest::get(BULK_URL, self.timeout)
            .query("message", message)
            .query("language", "english")
            .query("route", "v3")
            .query("numbers", number.as_str())
            .header("authorization", api_key);

        debug!(%number, "sending SMS via Fast2SMS");
        let res = self
            .http
            .get(&request)
            .await
            .map_err(|e| AlertError::Provider(format!("Error sending SMS: {e}")))?;

        let parsed: F2sResponse = serde_json::from_str(&res.body)
            .map_err(|_| AlertError::Provider(truncate_body(&res.body)))?;

        if parsed.accepted {
            info!(%number, "SMS accepted by gateway");
            Ok(SmsDelivery { number, status: "SMS sent successfully!".to_string() })
        } else {
            Err(AlertError::Provider(truncate_body(&res.body)))
        }
    }
}

/// Strips a leading `+91`, trims whitespace, and requires exactly ten ASCII
/// digits.
pub fn normalize_phone(raw: &str) -> Result<String, AlertError> {
    let trimmed = raw.trim();
    let local = trimmed.strip_prefix(COUNTRY_PREFIX).unwrap_or(trimmed).trim();

    if local.len() == 10 && local.bytes().all(|b| b.is_ascii_digit()) {
        Ok(local.to_string())
    } else {
        Err(AlertError::InvalidNumber(raw.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct F2sResponse {
    #[serde(rename = "return", default)]
    accepted: bool,
}
