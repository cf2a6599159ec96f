use aqi_core::{AqiCategory, Config, ProviderId, StationReading, classify, marker_color, stats};
use std::fmt::Write;

const HISTOGRAM_BINS: usize = 20;
const BAR_WIDTH: usize = 40;

pub fn station_table(readings: &[StationReading]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<40} {:>9} {:>9} {:>6}  {:<32} {}",
        "UID", "STATION", "LAT", "LON", "AQI", "CATEGORY", "MARKER"
    );

    for r in readings {
        let category = classify(r.aqi);
        let [red, green, blue] = marker_color(r.aqi);
        let name = if r.station_name.is_fallback() {
            format!("{} (?)", r.name())
        } else {
            r.name().to_string()
        };

        let _ = writeln!(
            out,
            "{:<8} {:<40} {:>9.4} {:>9.4} {:>6}  {} {:<29} #{red:02x}{green:02x}{blue:02x}",
            r.id,
            truncate(&name, 40),
            r.latitude,
            r.longitude,
            r.aqi,
            category.glyph(),
            category.label(),
        );
    }

    out
}

pub fn summary_and_histogram(readings: &[StationReading]) -> String {
    let mut out = String::new();

    let Some(summary) = stats::summarize(readings) else {
        out.push_str("No stations with a valid AQI.\n");
        return out;
    };

    let _ = writeln!(
        out,
        "{} stations, AQI min {} / mean {:.1} / max {}",
        summary.count, summary.min, summary.mean, summary.max
    );
    let _ = writeln!(out, "AQI Distribution");

    for category in AqiCategory::all() {
        let count = readings.iter().filter(|r| classify(r.aqi) == *category).count();
        if count > 0 {
            let _ = writeln!(out, "  {} {:<32} {}", category.glyph(), category.label(), count);
        }
    }

    let values: Vec<f64> = readings.iter().map(|r| r.aqi).collect();
    let bins = stats::histogram(&values, HISTOGRAM_BINS);
    let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    for bin in bins {
        let bar = "#".repeat(bin.count * BAR_WIDTH / peak);
        let _ = writeln!(out, "{:>7.1} - {:>7.1} | {:<BAR_WIDTH$} {}", bin.lower, bin.upper, bar, bin.count);
    }

    out
}

/// One line per credentialed provider, saying whether a key is available.
pub fn provider_status(config: &Config) -> String {
    let mut out = String::new();
    for id in ProviderId::all() {
        let state = if config.is_provider_configured(*id) { "configured" } else { "not set" };
        let _ = writeln!(out, "{:<10} {state}", id.as_str());
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::Resolved;

    fn reading(id: &str, aqi: f64, name: Resolved<String>) -> StationReading {
        StationReading { id: id.into(), latitude: 28.6, longitude: 77.2, aqi, station_name: name }
    }

    #[test]
    fn table_marks_fallback_names_and_colours() {
        let readings = vec![
            reading("1", 220.0, Resolved::live("Anand Vihar".into())),
            reading("2", 30.0, Resolved::fallback("Unknown Station".into(), "timeout")),
        ];

        let table = station_table(&readings);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Anand Vihar"));
        assert!(lines[1].contains("Very Unhealthy"));
        assert!(lines[1].ends_with("#ff0000"));
        assert!(lines[2].contains("Unknown Station (?)"));
        assert!(lines[2].ends_with("#00c800"));
    }

    #[test]
    fn histogram_text_has_one_line_per_bin() {
        let readings: Vec<_> = (0..50)
            .map(|i| reading(&i.to_string(), 20.0 + i as f64 * 7.0, Resolved::live(format!("s{i}"))))
            .collect();

        let text = summary_and_histogram(&readings);

        assert!(text.starts_with("50 stations"));
        assert_eq!(text.lines().filter(|l| l.contains(" | ")).count(), HISTOGRAM_BINS);
    }

    #[test]
    fn summary_counts_stations_per_category() {
        let readings = vec![
            reading("1", 40.0, Resolved::live("a".into())),
            reading("2", 45.0, Resolved::live("b".into())),
            reading("3", 310.0, Resolved::live("c".into())),
        ];

        let text = summary_and_histogram(&readings);

        assert!(text.lines().any(|l| l.contains("Good") && l.trim_end().ends_with(" 2")));
        assert!(text.lines().any(|l| l.contains("Hazardous") && l.trim_end().ends_with(" 1")));
        assert!(!text.contains("Moderate"));
    }

    #[test]
    fn provider_status_lists_every_provider() {
        let mut config = Config::default();
        config.upsert_provider_api_key(ProviderId::Waqi, "TOKEN".into());

        let status = provider_status(&config);

        assert_eq!(status, "waqi       configured\nfast2sms   not set\n");
    }

    #[test]
    fn empty_readings_say_so() {
        assert_eq!(summary_and_histogram(&[]), "No stations with a valid AQI.\n");
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long station name", 10), "a very ...");
    }
}
