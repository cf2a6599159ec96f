use serde::Serialize;
use std::fmt;

/// The six AQI bands, ordered from cleanest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Inclusive upper bounds for every band except `Hazardous`.
const THRESHOLDS: [(f64, AqiCategory); 5] = [
    (50.0, AqiCategory::Good),
    (100.0, AqiCategory::Moderate),
    (150.0, AqiCategory::UnhealthyForSensitiveGroups),
    (200.0, AqiCategory::Unhealthy),
    (300.0, AqiCategory::VeryUnhealthy),
];

/// Negative values land in `Good`; NaN compares false everywhere and lands in
/// `Hazardous`.
pub fn classify(aqi: f64) -> AqiCategory {
    THRESHOLDS
        .iter()
        .find(|(upper, _)| aqi <= *upper)
        .map(|(_, category)| *category)
        .unwrap_or(AqiCategory::Hazardous)
}

impl AqiCategory {
    pub const fn all() -> &'static [AqiCategory] {
        &[
            AqiCategory::Good,
            AqiCategory::Moderate,
            AqiCategory::UnhealthyForSensitiveGroups,
            AqiCategory::Unhealthy,
            AqiCategory::VeryUnhealthy,
            AqiCategory::Hazardous,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            AqiCategory::Good => "🟢",
            AqiCategory::Moderate => "🟡",
            AqiCategory::UnhealthyForSensitiveGroups => "🟠",
            AqiCategory::Unhealthy => "🔴",
            AqiCategory::VeryUnhealthy => "🟣",
            AqiCategory::Hazardous => "⚫",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Air quality is ideal.",
            AqiCategory::Moderate => "Acceptable air quality.",
            AqiCategory::UnhealthyForSensitiveGroups => "Sensitive groups should reduce activity.",
            AqiCategory::Unhealthy => "General public should reduce outdoor activity.",
            AqiCategory::VeryUnhealthy => "Everyone may experience health effects.",
            AqiCategory::Hazardous => "Avoid going outdoors.",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type Rgb = [u8; 3];

pub const MARKER_RED: Rgb = [255, 0, 0];
pub const MARKER_ORANGE: Rgb = [255, 165, 0];
pub const MARKER_GREEN: Rgb = [0, 200, 0];

/// Map marker colour for a station: coarser than the six bands.
pub fn marker_color(aqi: f64) -> Rgb {
    if aqi > 200.0 {
        MARKER_RED
    } else if aqi > 150.0 {
        MARKER_ORANGE
    } else {
        MARKER_GREEN
    }
}
