use serde::Serialize;

use crate::model::StationReading;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning `[min, max]` of `values`. The maximum lands in
/// the last bin. Identical values collapse into a single bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin { lower: min, upper: max, count: values.len() }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AqiSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

pub fn summarize(readings: &[StationReading]) -> Option<AqiSummary> {
    if readings.is_empty() {
        return None;
    }

    let (min, max, sum) = readings.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), r| (min.min(r.aqi), max.max(r.aqi), sum + r.aqi),
    );

    Some(AqiSummary { count: readings.len(), min, max, mean: sum / readings.len() as f64 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resolved;

    #[test]
    fn empty_input_has_no_bins() {
        assert!(histogram(&[], 20).is_empty());
        assert!(histogram(&[1.0], 0).is_empty());
    }

    #[test]
    fn identical_values_collapse_to_one_bin() {
        let bins = histogram(&[80.0, 80.0, 80.0], 20);
        assert_eq!(bins, vec![HistogramBin { lower: 80.0, upper: 80.0, count: 3 }]);
    }

    #[test]
    fn counts_cover_every_value_and_max_lands_last() {
        let values = [0.0, 10.0, 50.0, 99.0, 100.0];
        let bins = histogram(&values, 4);

        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[2].count, 1);
        assert_eq!(bins[3].count, 2);
        assert_eq!(bins[3].upper, 100.0);
    }

    #[test]
    fn summary_of_readings() {
        let readings: Vec<StationReading> = [40.0, 160.0, 310.0]
            .iter()
            .enumerate()
            .map(|(i, aqi)| StationReading {
                id: i.to_string(),
                latitude: 0.0,
                longitude: 0.0,
                aqi: *aqi,
                station_name: Resolved::live(format!("s{i}")),
            })
            .collect();

        let summary = summarize(&readings).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 40.0);
        assert_eq!(summary.max, 310.0);
        assert!((summary.mean - 170.0).abs() < 1e-9);
        assert!(summarize(&[]).is_none());
    }
}
