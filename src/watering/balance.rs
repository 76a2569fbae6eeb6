use super::{
    ds::{StageDemand, WaterBalanceInput, WaterBalanceResult},
    DAYS_PER_WEEK, LITERS_PER_MM_ACRE, SQ_METERS_PER_ACRE,
};
use crate::{
    crops::{CropProfile, GrowthStage},
    error::{AppError, AppResult},
};
use tracing::debug;

/// Seasonal water balance over the four growth stages.
///
/// Each stage runs at its stage-average Kc, rainfall is spread evenly across
/// the cycle, and the net requirement of a stage is floored at zero. Rain a
/// stage cannot absorb does not carry into the next one. A zero efficiency
/// passes the net demand through unscaled.
pub fn compute_water_balance(input: &WaterBalanceInput) -> AppResult<WaterBalanceResult> {
    if input.area_acres <= 0.0 {
        return Err(AppError::InvalidAcreage(input.area_acres));
    }
    let (durations, kc) = input.crop.fao_data()?;

    let efficiency = input.efficiency_percent / 100.0;
    let daily_rain = input.weekly_rain_mm / DAYS_PER_WEEK;

    let mut stages = Vec::with_capacity(GrowthStage::ALL.len());
    let mut total_net_mm = 0.0;
    let mut total_gross_mm = 0.0;
    for stage in GrowthStage::ALL {
        let days = durations.days(stage);
        let stage_kc = kc.stage_average(stage);
        let daily_use_mm = stage_kc * input.avg_daily_eto;
        let net_mm = ((daily_use_mm - daily_rain) * days as f64).max(0.0);
        let gross_mm = if efficiency > 0.0 { net_mm / efficiency } else { net_mm };
        debug!(
            "{}: {} days at Kc {:.2}, {:.2} mm/day, net {:.2} mm, gross {:.2} mm",
            stage, days, stage_kc, daily_use_mm, net_mm, gross_mm
        );
        total_net_mm += net_mm;
        total_gross_mm += gross_mm;
        stages.push(StageDemand { stage, days, kc: stage_kc, daily_use_mm, net_mm, gross_mm });
    }

    let area_sq_m = input.area_acres * SQ_METERS_PER_ACRE;
    // 1 mm of depth over 1 m2 is 1 liter
    let total_liters = total_gross_mm * area_sq_m;
    debug!(
        "Cycle total for {}: {:.2} mm gross over {:.0} m2 = {:.0} L",
        input.crop.name, total_gross_mm, area_sq_m, total_liters
    );

    Ok(WaterBalanceResult { stages, total_net_mm, total_gross_mm, area_sq_m, total_liters })
}

/// Single-coefficient shortcut: liters/day from one blended Kc and the
/// rounded 4047 L/(mm.acre) conversion. Rainfall and efficiency are layered
/// by the planner, not here. Deliberately coarser than the staged balance,
/// so the two will not agree for crops with an uneven Kc curve.
pub fn simplified_daily_use(
    crop: &CropProfile, area_acres: f64, eto_mm_day: f64,
) -> AppResult<f64> {
    if area_acres <= 0.0 {
        return Err(AppError::InvalidAcreage(area_acres));
    }
    let liters_per_day = crop.mean_kc() * eto_mm_day * LITERS_PER_MM_ACRE * area_acres;
    debug!("Daily use for {}: {:.0} L/day over {} acres", crop.name, liters_per_day, area_acres);
    Ok(liters_per_day)
}
