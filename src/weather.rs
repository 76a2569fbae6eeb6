use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One manual daily observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    /// degrees C
    pub temperature_c: f64,
    /// mm over the day
    pub rainfall_mm: f64,
    /// mm/day
    pub eto_mm_day: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub days: usize,
    /// degrees C
    pub mean_temperature_c: f64,
    /// mm, summed over all logged days
    pub total_rainfall_mm: f64,
    /// mm/day
    pub mean_eto_mm_day: f64,
}

/// Append-only observation log. Records keep arrival order; the same date may
/// appear more than once and every entry counts.
#[derive(Debug, Default, Clone)]
pub struct WeatherLog {
    records: Vec<WeatherRecord>,
}

impl WeatherLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: WeatherRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&WeatherRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregates over everything logged so far, or `None` for an empty log.
    pub fn summary(&self) -> Option<WeatherSummary> {
        if self.records.is_empty() {
            return None;
        }
        let days = self.records.len();
        let n = days as f64;
        let mean_temperature_c = self.records.iter().map(|r| r.temperature_c).sum::<f64>() / n;
        let total_rainfall_mm = self.records.iter().map(|r| r.rainfall_mm).sum::<f64>();
        let mean_eto_mm_day = self.records.iter().map(|r| r.eto_mm_day).sum::<f64>() / n;

        Some(WeatherSummary { days, mean_temperature_c, total_rainfall_mm, mean_eto_mm_day })
    }
}
