use crate::crops::{CropProfile, GrowthStage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBalanceInput {
    pub crop: CropProfile,
    /// acres
    pub area_acres: f64,
    /// mm/day
    pub avg_daily_eto: f64,
    /// mm, spread evenly over the cycle week by week
    pub weekly_rain_mm: f64,
    /// percent, 0 < e <= 100
    pub efficiency_percent: f64,
}

/// One growth stage of the seasonal balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDemand {
    pub stage: GrowthStage,
    /// days
    pub days: u16,
    /// effective crop coefficient for the stage
    pub kc: f64,
    /// mm/day of crop water use at that coefficient
    pub daily_use_mm: f64,
    /// mm over the stage after rainfall, never negative
    pub net_mm: f64,
    /// mm over the stage after application losses
    pub gross_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBalanceResult {
    pub stages: Vec<StageDemand>,
    /// mm
    pub total_net_mm: f64,
    /// mm
    pub total_gross_mm: f64,
    /// m2
    pub area_sq_m: f64,
    /// liters over the whole cycle
    pub total_liters: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyPlanInput {
    /// liters to deliver over the window
    pub total_liters: f64,
    /// liters/hour
    pub flow_lph: f64,
    /// days available to spread the delivery over
    pub days: u32,
}

impl SupplyPlanInput {
    pub fn new(total_liters: f64, flow_lph: f64, days: u32) -> Self {
        Self { total_liters, flow_lph, days }
    }
}

/// Rainfall-adjusted plan, with the daily derivation it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainfallPlan {
    /// liters/day the crop demands before any credit
    pub daily_demand_liters: f64,
    /// liters/day credited from expected rainfall
    pub rain_credit_liters: f64,
    /// liters/day after the credit, floored at zero
    pub net_daily_liters: f64,
    /// liters/day after application losses
    pub gross_daily_liters: f64,
    pub plan: SupplyPlanResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyPlanResult {
    /// hours the supply must run each day
    pub hours_per_day: f64,
    /// hours over the whole window
    pub total_hours: f64,
    /// liters over the whole window, echoed from the input
    pub total_liters: f64,
    /// liters/day
    pub liters_per_day: f64,
    /// liters/hour the plan was computed against
    pub flow_lph: f64,
    pub days: u32,
    /// set when hours_per_day does not fit in a day
    pub exceeds_daily_window: bool,
}
