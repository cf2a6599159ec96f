use crate::{
    category::{AqiCategory, classify},
    geo::nearest_station,
    model::{GeoPoint, StationReading},
};

/// Everything needed for exactly one alert SMS.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRequest {
    pub location_label: String,
    pub phone_number: String,
    pub nearest: StationReading,
    pub category: AqiCategory,
}

impl AlertRequest {
    /// Picks the station nearest to `reference` and classifies it.
    /// `None` when there are no readings.
    pub fn prepare(
        location_label: &str,
        phone_number: &str,
        readings: &[StationReading],
        reference: GeoPoint,
    ) -> Option<Self> {
        let nearest = nearest_station(readings, reference)?;

        Some(Self {
            location_label: location_label.trim().to_string(),
            phone_number: phone_number.to_string(),
            category: classify(nearest.aqi),
            nearest: nearest.clone(),
        })
    }

    pub fn message(&self) -> String {
        format!(
            "AQI Alert - {}\n{} AQI: {} ({})\nNearest Station: {}\nHealth Advice: {}",
            self.location_label,
            self.category.glyph(),
            self.nearest.aqi,
            self.category.label(),
            self.nearest.name(),
            self.category.advice(),
        )
    }
}
