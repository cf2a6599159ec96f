use thiserror::Error;

use crate::provider::ProviderId;

/// Hard failures surfaced by the AQI and SMS clients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlertError {
    #[error(
        "No API key configured for provider '{0}'.\n\
         Hint: run `aqi configure {0}` or set {env}.",
        env = .0.env_var()
    )]
    Config(ProviderId),

    #[error("Enter valid Indian mobile number (10 digits), got '{0}'")]
    InvalidNumber(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Failure to complete a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Network(String),
}

impl From<TransportError> for AlertError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(msg) => AlertError::Timeout(msg),
            TransportError::Network(msg) => AlertError::Network(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_names_provider_and_env_var() {
        let msg = AlertError::Config(ProviderId::Fast2Sms).to_string();
        assert!(msg.contains("'fast2sms'"));
        assert!(msg.contains("FAST2SMS_API_KEY"));
    }

    #[test]
    fn transport_errors_keep_their_kind() {
        let timeout: AlertError = TransportError::Timeout("10s".into()).into();
        assert_eq!(timeout, AlertError::Timeout("10s".into()));

        let network: AlertError = TransportError::Network("refused".into()).into();
        assert_eq!(network, AlertError::Network("refused".into()));
    }
}
