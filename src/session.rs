use crate::{
    config::{Config, Defaults},
    crops::CropCatalog,
    farm::PlotStore,
    time::Clock,
    watering::ds::{SupplyPlanResult, WaterBalanceResult},
    weather::{WeatherLog, WeatherRecord},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Requests without an `x-session-id` header land here.
pub const DEFAULT_SESSION: Uuid = Uuid::nil();

/// One computed seasonal balance, kept for the session's history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub computed_at: DateTime<Utc>,
    pub crop_name: String,
    /// acres
    pub area_acres: f64,
    pub result: WaterBalanceResult,
}

/// Per-client working state. A session is read and written under one mutex
/// so active-plot updates never interleave.
#[derive(Debug)]
pub struct Session {
    pub plots: PlotStore,
    pub weather: WeatherLog,
    /// mm/day used when a request carries no ETo of its own
    pub default_eto: f64,
    pub balance_history: Vec<BalanceEntry>,
    pub last_plan: Option<SupplyPlanResult>,
}

impl Session {
    pub fn new(defaults: &Defaults) -> Self {
        Self {
            plots: PlotStore::new(),
            weather: WeatherLog::new(),
            default_eto: defaults.eto_mm_day,
            balance_history: Vec::new(),
            last_plan: None,
        }
    }

    /// Logging an observation also adopts its ETo as the session default.
    pub fn log_weather(&mut self, record: WeatherRecord) {
        self.default_eto = record.eto_mm_day;
        self.weather.append(record);
    }

    pub fn record_balance(&mut self, entry: BalanceEntry) {
        self.balance_history.push(entry);
    }

    pub fn save_plan(&mut self, plan: SupplyPlanResult) {
        self.last_plan = Some(plan);
    }
}

/// Sessions keyed by client id, created on first touch and never expired.
#[derive(Debug)]
pub struct SessionRegistry {
    defaults: Defaults,
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new(defaults: Defaults) -> Self {
        Self { defaults, sessions: RwLock::new(HashMap::new()) }
    }

    pub async fn get_or_create(&self, id: Uuid) -> Arc<Mutex<Session>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(&id) {
                return session.clone();
            }
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id)
            .or_insert_with(|| {
                debug!("Creating session {}", id);
                Arc::new(Mutex::new(Session::new(&self.defaults)))
            })
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

pub struct AppState {
    pub catalog: CropCatalog,
    pub sessions: SessionRegistry,
    pub defaults: Defaults,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new(AppState {
            catalog: CropCatalog::builtin(),
            sessions: SessionRegistry::new(config.defaults),
            defaults: config.defaults,
            clock,
        })
    }
}
