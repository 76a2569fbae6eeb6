use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Catalog sentinel for crops the reference tables know nothing about.
pub const CUSTOM_CROP: &str = "Other / Custom Crop";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStage {
    Initial,
    Development,
    Mid,
    Late,
}

impl GrowthStage {
    /// Fixed stage order used by the water balance.
    pub const ALL: [GrowthStage; 4] =
        [GrowthStage::Initial, GrowthStage::Development, GrowthStage::Mid, GrowthStage::Late];
}

impl Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self {
            GrowthStage::Initial => "Initial",
            GrowthStage::Development => "Development",
            GrowthStage::Mid => "Mid",
            GrowthStage::Late => "Late",
        };
        f.write_str(stage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDurations {
    /// days
    pub initial: u16,
    /// days
    pub development: u16,
    /// days
    pub mid: u16,
    /// days
    pub late: u16,
}

impl StageDurations {
    pub fn days(&self, stage: GrowthStage) -> u16 {
        match stage {
            GrowthStage::Initial => self.initial,
            GrowthStage::Development => self.development,
            GrowthStage::Mid => self.mid,
            GrowthStage::Late => self.late,
        }
    }

    /// Full crop cycle length in days.
    pub fn total_days(&self) -> u32 {
        self.initial as u32 + self.development as u32 + self.mid as u32 + self.late as u32
    }
}

/// FAO tables anchor the Kc curve at three points only; Development and Late
/// sit on the linear ramps between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KcAnchors {
    pub initial: f64,
    pub mid: f64,
    pub end: f64,
}

impl KcAnchors {
    /// Effective coefficient for a stage: anchors as-is, ramp midpoints for
    /// the two stages without an anchor of their own.
    pub fn stage_average(&self, stage: GrowthStage) -> f64 {
        match stage {
            GrowthStage::Initial => self.initial,
            GrowthStage::Development => (self.initial + self.mid) / 2.0,
            GrowthStage::Mid => self.mid,
            GrowthStage::Late => (self.mid + self.end) / 2.0,
        }
    }

    /// Single blended coefficient across the whole cycle.
    pub fn mean(&self) -> f64 {
        (self.initial + self.mid + self.end) / 3.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CropData {
    Fao { durations: StageDurations, kc: KcAnchors },
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    pub data: CropData,
}

impl CropProfile {
    pub fn fao(name: &str, durations: StageDurations, kc: KcAnchors) -> Self {
        Self { name: name.to_owned(), data: CropData::Fao { durations, kc } }
    }

    pub fn custom(name: &str) -> Self {
        Self { name: name.to_owned(), data: CropData::Custom }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.data, CropData::Custom)
    }

    /// Stage tables, or `InvalidCropProfile` for crops without them.
    pub fn fao_data(&self) -> AppResult<(&StageDurations, &KcAnchors)> {
        match &self.data {
            CropData::Fao { durations, kc } => Ok((durations, kc)),
            CropData::Custom => Err(AppError::InvalidCropProfile(self.name.clone())),
        }
    }

    /// Blended coefficient for the simplified daily-use path. Crops without
    /// anchor data use a neutral 1.0 instead of failing.
    pub fn mean_kc(&self) -> f64 {
        match &self.data {
            CropData::Fao { kc, .. } => kc.mean(),
            CropData::Custom => 1.0,
        }
    }
}

/// Read-only crop reference data, built once at startup. Listing order is
/// the insertion order.
#[derive(Debug, Clone)]
pub struct CropCatalog {
    entries: Vec<CropProfile>,
}

impl CropCatalog {
    pub fn new(entries: Vec<CropProfile>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            CropProfile::fao(
                "Maize",
                StageDurations { initial: 20, development: 35, mid: 45, late: 26 },
                KcAnchors { initial: 0.3, mid: 1.2, end: 0.7 },
            ),
            CropProfile::fao(
                "Beans",
                StageDurations { initial: 15, development: 25, mid: 30, late: 10 },
                KcAnchors { initial: 0.4, mid: 1.1, end: 0.4 },
            ),
            CropProfile::fao(
                "Tomatoes",
                StageDurations { initial: 30, development: 40, mid: 60, late: 20 },
                KcAnchors { initial: 0.4, mid: 1.1, end: 0.7 },
            ),
            CropProfile::custom(CUSTOM_CROP),
        ])
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|crop| crop.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> AppResult<&CropProfile> {
        self.entries
            .iter()
            .find(|crop| crop.name == name)
            .ok_or_else(|| AppError::UnknownCrop(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
