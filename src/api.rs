use crate::{
    crops::CropProfile,
    error::{AppError, AppResult},
    farm::Plot,
    session::{AppState, BalanceEntry, Session, DEFAULT_SESSION},
    watering::{
        balance::compute_water_balance,
        ds::{RainfallPlan, SupplyPlanInput, SupplyPlanResult, WaterBalanceInput},
        planner::{plan_schedule, plan_schedule_with_rainfall},
    },
    weather::{WeatherRecord, WeatherSummary},
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const SESSION_HEADER: &str = "x-session-id";

/// Manual fallbacks when neither the request nor an active plot names them.
const FALLBACK_CROP: &str = "Maize";
const FALLBACK_ACRES: f64 = 1.0;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/crops", get(list_crops))
        .route("/crops/:name", get(get_crop))
        .route("/balance", post(compute_balance))
        .route("/balance/history", get(balance_history))
        .route("/plan", post(create_plan))
        .route("/plan/rainfall", post(create_rainfall_plan))
        .route("/plan/last", get(last_plan))
        .route("/plots", post(create_plot).get(list_plots).delete(clear_plots))
        .route("/plots/active", get(get_active_plot).delete(clear_active_plot))
        .route("/plots/:id", delete(delete_plot))
        .route("/plots/:id/activate", post(activate_plot))
        .route("/weather", post(log_weather).get(list_weather))
        .route("/weather/summary", get(weather_summary))
        .with_state(state)
}

/// Unparseable session ids fall back to the shared default session.
fn session_id(headers: &HeaderMap) -> Uuid {
    let Some(raw) = headers.get(SESSION_HEADER).and_then(|value| value.to_str().ok()) else {
        return DEFAULT_SESSION;
    };
    raw.parse().unwrap_or_else(|_| {
        warn!("Ignoring malformed {} header {:?}", SESSION_HEADER, raw);
        DEFAULT_SESSION
    })
}

/// Explicit request values win, then the active plot, then the manual
/// fallbacks.
fn resolve_plot_context(
    session: &Session, crop: Option<String>, area_acres: Option<f64>,
) -> (String, f64) {
    let active = session.plots.active();
    let crop_name = crop
        .or_else(|| active.map(|plot| plot.crop_name.clone()))
        .unwrap_or_else(|| FALLBACK_CROP.to_owned());
    let area = area_acres.or_else(|| active.map(|plot| plot.area_acres)).unwrap_or(FALLBACK_ACRES);
    (crop_name, area)
}

fn resolve_days(days: Option<i64>, default_days: u32) -> AppResult<u32> {
    let days = days.unwrap_or(default_days as i64);
    if days < 1 {
        return Err(AppError::InvalidDuration(days));
    }
    u32::try_from(days).map_err(|_| AppError::InvalidDuration(days))
}

// ---- crops ----

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CropListResponse {
    pub crops: Vec<String>,
}

pub async fn list_crops(State(state): State<Arc<AppState>>) -> Json<CropListResponse> {
    let crops = state.catalog.names().iter().map(|name| (*name).to_owned()).collect();
    Json(CropListResponse { crops })
}

pub async fn get_crop(
    State(state): State<Arc<AppState>>, Path(name): Path<String>,
) -> AppResult<Json<CropProfile>> {
    Ok(Json(state.catalog.get(&name).cloned()?))
}

// ---- water balance ----

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BalanceRequest {
    pub crop: Option<String>,
    pub area_acres: Option<f64>,
    pub avg_daily_eto: Option<f64>,
    pub weekly_rain_mm: Option<f64>,
    pub efficiency_percent: Option<f64>,
}

pub async fn compute_balance(
    State(state): State<Arc<AppState>>, headers: HeaderMap, Json(req): Json<BalanceRequest>,
) -> AppResult<Json<BalanceEntry>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;

    let (crop_name, area_acres) = resolve_plot_context(&session, req.crop, req.area_acres);
    let input = WaterBalanceInput {
        crop: state.catalog.get(&crop_name)?.clone(),
        area_acres,
        avg_daily_eto: req.avg_daily_eto.unwrap_or(session.default_eto),
        weekly_rain_mm: req.weekly_rain_mm.unwrap_or(state.defaults.rainfall_mm),
        efficiency_percent: req.efficiency_percent.unwrap_or(state.defaults.efficiency_percent),
    };
    let result = compute_water_balance(&input)?;
    info!("Balance for {} over {} acres: {:.0} L", crop_name, area_acres, result.total_liters);

    let entry = BalanceEntry {
        computed_at: state.clock.now(),
        crop_name,
        area_acres,
        result,
    };
    session.record_balance(entry.clone());
    Ok(Json(entry))
}

pub async fn balance_history(
    State(state): State<Arc<AppState>>, headers: HeaderMap,
) -> Json<Vec<BalanceEntry>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let session = session.lock().await;
    Json(session.balance_history.clone())
}

// ---- supply planning ----

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlanRequest {
    /// given directly, or derived from a crop when absent
    pub total_liters: Option<f64>,
    pub crop: Option<String>,
    pub area_acres: Option<f64>,
    pub avg_daily_eto: Option<f64>,
    pub weekly_rain_mm: Option<f64>,
    pub efficiency_percent: Option<f64>,
    pub flow_lph: Option<f64>,
    pub days: Option<i64>,
}

pub async fn create_plan(
    State(state): State<Arc<AppState>>, headers: HeaderMap, Json(req): Json<PlanRequest>,
) -> AppResult<Json<SupplyPlanResult>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;

    let days = resolve_days(req.days, state.defaults.days_to_apply)?;
    let flow_lph = req.flow_lph.unwrap_or(state.defaults.flow_lph);

    let total_liters = match req.total_liters {
        Some(liters) => liters,
        None => {
            let (crop_name, area_acres) = resolve_plot_context(&session, req.crop, req.area_acres);
            let input = WaterBalanceInput {
                crop: state.catalog.get(&crop_name)?.clone(),
                area_acres,
                avg_daily_eto: req.avg_daily_eto.unwrap_or(session.default_eto),
                weekly_rain_mm: req.weekly_rain_mm.unwrap_or(state.defaults.rainfall_mm),
                efficiency_percent: req
                    .efficiency_percent
                    .unwrap_or(state.defaults.efficiency_percent),
            };
            compute_water_balance(&input)?.total_liters
        }
    };

    let plan = plan_schedule(&SupplyPlanInput::new(total_liters, flow_lph, days))?;
    info!(
        "Plan: {:.1} h/day for {} days at {:.0} L/h",
        plan.hours_per_day, plan.days, plan.flow_lph
    );
    session.save_plan(plan);
    Ok(Json(plan))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RainfallPlanRequest {
    pub crop: Option<String>,
    pub area_acres: Option<f64>,
    pub avg_daily_eto: Option<f64>,
    pub weekly_rain_mm: Option<f64>,
    pub efficiency_percent: Option<f64>,
    pub flow_lph: Option<f64>,
    pub days: Option<i64>,
}

pub async fn create_rainfall_plan(
    State(state): State<Arc<AppState>>, headers: HeaderMap, Json(req): Json<RainfallPlanRequest>,
) -> AppResult<Json<RainfallPlan>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;

    let days = resolve_days(req.days, state.defaults.days_to_apply)?;
    let (crop_name, area_acres) = resolve_plot_context(&session, req.crop, req.area_acres);
    let crop = state.catalog.get(&crop_name)?.clone();

    let rainfall_plan = plan_schedule_with_rainfall(
        &crop,
        area_acres,
        req.avg_daily_eto.unwrap_or(session.default_eto),
        req.weekly_rain_mm.unwrap_or(state.defaults.rainfall_mm),
        req.efficiency_percent.unwrap_or(state.defaults.efficiency_percent),
        req.flow_lph.unwrap_or(state.defaults.flow_lph),
        days,
    )?;
    info!(
        "Rainfall plan for {} over {} acres: {:.1} h/day",
        crop_name, area_acres, rainfall_plan.plan.hours_per_day
    );
    session.save_plan(rainfall_plan.plan);
    Ok(Json(rainfall_plan))
}

pub async fn last_plan(
    State(state): State<Arc<AppState>>, headers: HeaderMap,
) -> Json<Option<SupplyPlanResult>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let session = session.lock().await;
    Json(session.last_plan)
}

// ---- plots ----

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlotRequest {
    pub name: String,
    pub area_acres: Option<f64>,
    pub crop: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeletePlotResponse {
    pub deleted: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ActivatePlotResponse {
    pub activated: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClearActiveResponse {
    pub cleared: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClearPlotsResponse {
    pub removed: usize,
}

pub async fn create_plot(
    State(state): State<Arc<AppState>>, headers: HeaderMap, Json(req): Json<PlotRequest>,
) -> AppResult<(StatusCode, Json<Plot>)> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;

    let plot = session.plots.create_plot(
        &req.name,
        req.area_acres.unwrap_or(FALLBACK_ACRES),
        req.crop.as_deref().unwrap_or(FALLBACK_CROP),
        &state.catalog,
        state.clock.now(),
    )?;
    info!("Registered plot {} ({} acres of {})", plot.name, plot.area_acres, plot.crop_name);
    Ok((StatusCode::CREATED, Json(plot)))
}

pub async fn list_plots(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<Vec<Plot>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let session = session.lock().await;
    Json(session.plots.list().to_vec())
}

pub async fn delete_plot(
    State(state): State<Arc<AppState>>, headers: HeaderMap, Path(id): Path<Uuid>,
) -> Json<DeletePlotResponse> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;
    let deleted = session.plots.delete(id);
    if deleted {
        info!("Deleted plot {}", id);
    }
    Json(DeletePlotResponse { deleted })
}

pub async fn activate_plot(
    State(state): State<Arc<AppState>>, headers: HeaderMap, Path(id): Path<Uuid>,
) -> Json<ActivatePlotResponse> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;
    Json(ActivatePlotResponse { activated: session.plots.set_active(id) })
}

pub async fn get_active_plot(
    State(state): State<Arc<AppState>>, headers: HeaderMap,
) -> Json<Option<Plot>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let session = session.lock().await;
    Json(session.plots.active().cloned())
}

pub async fn clear_active_plot(
    State(state): State<Arc<AppState>>, headers: HeaderMap,
) -> Json<ClearActiveResponse> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;
    Json(ClearActiveResponse { cleared: session.plots.clear_active() })
}

pub async fn clear_plots(
    State(state): State<Arc<AppState>>, headers: HeaderMap,
) -> Json<ClearPlotsResponse> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;
    let removed = session.plots.len();
    session.plots.clear_all();
    info!("Cleared {} plots", removed);
    Json(ClearPlotsResponse { removed })
}

// ---- weather ----

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeatherRequest {
    pub date: Option<NaiveDate>,
    pub temperature_c: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub eto_mm_day: Option<f64>,
}

pub async fn log_weather(
    State(state): State<Arc<AppState>>, headers: HeaderMap, Json(req): Json<WeatherRequest>,
) -> (StatusCode, Json<WeatherRecord>) {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let mut session = session.lock().await;

    let record = WeatherRecord {
        date: req.date.unwrap_or_else(|| state.clock.today()),
        temperature_c: req.temperature_c.unwrap_or(state.defaults.temperature_c),
        rainfall_mm: req.rainfall_mm.unwrap_or(state.defaults.rainfall_mm),
        eto_mm_day: req.eto_mm_day.unwrap_or(state.defaults.eto_mm_day),
    };
    session.log_weather(record);
    info!("Logged weather for {}: ETo {} mm/day", record.date, record.eto_mm_day);
    (StatusCode::CREATED, Json(record))
}

pub async fn list_weather(
    State(state): State<Arc<AppState>>, headers: HeaderMap,
) -> Json<Vec<WeatherRecord>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let session = session.lock().await;
    Json(session.weather.records().to_vec())
}

pub async fn weather_summary(
    State(state): State<Arc<AppState>>, headers: HeaderMap,
) -> Json<Option<WeatherSummary>> {
    let session = state.sessions.get_or_create(session_id(&headers)).await;
    let session = session.lock().await;
    Json(session.weather.summary())
}
