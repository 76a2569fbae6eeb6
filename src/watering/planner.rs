use super::{
    balance::simplified_daily_use,
    ds::{RainfallPlan, SupplyPlanInput, SupplyPlanResult},
    DAYS_PER_WEEK, LITERS_PER_MM_ACRE, MAX_DAILY_RUNTIME_HOURS,
};
use crate::{
    crops::CropProfile,
    error::{AppError, AppResult},
};
use tracing::warn;

/// Spread a total volume over a delivery window at a fixed supply rate.
///
/// Runtimes above 24 h/day are reported as-is with the flag set; the caller
/// decides whether to raise the flow or stretch the window.
pub fn plan_schedule(input: &SupplyPlanInput) -> AppResult<SupplyPlanResult> {
    if input.flow_lph <= 0.0 {
        return Err(AppError::InvalidFlowRate(input.flow_lph));
    }
    if input.days < 1 {
        return Err(AppError::InvalidDuration(input.days as i64));
    }

    let total_hours = input.total_liters / input.flow_lph;
    let hours_per_day = total_hours / input.days as f64;
    let liters_per_day = input.total_liters / input.days as f64;
    let exceeds_daily_window = hours_per_day > MAX_DAILY_RUNTIME_HOURS;
    if exceeds_daily_window {
        warn!(
            "Plan needs {:.1} h/day over {} days; a higher flow than {:.0} L/h or a longer window is required",
            hours_per_day, input.days, input.flow_lph
        );
    }

    Ok(SupplyPlanResult {
        hours_per_day,
        total_hours,
        total_liters: input.total_liters,
        liters_per_day,
        flow_lph: input.flow_lph,
        days: input.days,
        exceeds_daily_window,
    })
}

/// Shortcut-path plan: blended daily demand, minus a rainfall credit, scaled
/// by efficiency, spread over the window. Zero efficiency passes the net
/// demand through unscaled, like the staged balance.
pub fn plan_schedule_with_rainfall(
    crop: &CropProfile, area_acres: f64, eto_mm_day: f64, weekly_rain_mm: f64,
    efficiency_percent: f64, flow_lph: f64, days: u32,
) -> AppResult<RainfallPlan> {
    let daily_demand_liters = simplified_daily_use(crop, area_acres, eto_mm_day)?;
    let rain_credit_liters = (weekly_rain_mm / DAYS_PER_WEEK) * LITERS_PER_MM_ACRE * area_acres;
    let net_daily_liters = (daily_demand_liters - rain_credit_liters).max(0.0);
    let efficiency = efficiency_percent / 100.0;
    let gross_daily_liters =
        if efficiency > 0.0 { net_daily_liters / efficiency } else { net_daily_liters };

    let input = SupplyPlanInput::new(gross_daily_liters * days as f64, flow_lph, days);
    let plan = plan_schedule(&input)?;

    Ok(RainfallPlan {
        daily_demand_liters,
        rain_credit_liters,
        net_daily_liters,
        gross_daily_liters,
        plan,
    })
}
