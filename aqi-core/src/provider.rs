pub mod fast2sms;
pub mod openmeteo;
pub mod waqi;

/// Providers that need a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Waqi,
    Fast2Sms,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Waqi => "waqi",
            ProviderId::Fast2Sms => "fast2sms",
        }
    }

    /// Environment variable that overrides the configured key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::Waqi => "WAQI_API_TOKEN",
            ProviderId::Fast2Sms => "FAST2SMS_API_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Waqi, ProviderId::Fast2Sms]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "waqi" => Ok(ProviderId::Waqi),
            "fast2sms" => Ok(ProviderId::Fast2Sms),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: waqi, fast2sms."
            )),
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_is_case_insensitive() {
        assert_eq!(ProviderId::try_from("FAST2SMS").unwrap(), ProviderId::Fast2Sms);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("openweather").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn truncate_keeps_short_bodies_and_respects_char_boundaries() {
        assert_eq!(truncate_body("short"), "short");

        let long = "é".repeat(150);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }
}
