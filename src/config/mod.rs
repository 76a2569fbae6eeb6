pub mod run_options;

use run_options::Args;
use serde::Deserialize;
use std::fs;
use tracing::warn;

pub const CONFIG_FILE: &str = "./irriplan.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebServer {
    pub address: String,
}

impl Default for WebServer {
    fn default() -> Self {
        Self { address: "0.0.0.0:8080".to_owned() }
    }
}

/// Seed values for new sessions, matching the former UI widget defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// mm/day
    pub eto_mm_day: f64,
    /// degrees C
    pub temperature_c: f64,
    /// mm
    pub rainfall_mm: f64,
    /// percent
    pub efficiency_percent: f64,
    /// liters/hour
    pub flow_lph: f64,
    pub days_to_apply: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            eto_mm_day: 5.0,
            temperature_c: 25.0,
            rainfall_mm: 0.0,
            efficiency_percent: 80.0,
            flow_lph: 1200.0,
            days_to_apply: 7,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web_server: WebServer,
    pub defaults: Defaults,
}

impl Config {
    /// Missing file falls back to defaults; an unparseable file is fatal.
    pub fn load(args: Args) -> Self {
        if !args.cfg_file.exists() {
            warn!("Config file {:?} not found, using defaults", args.cfg_file);
            return Config::default();
        }
        let config_content = fs::read_to_string(args.cfg_file).expect("Unable to read config file");
        let config: Config = toml::from_str(&config_content).expect("Unable to parse config");
        config
    }

    // test helper
    pub fn load_from_str(config_str: &str) -> Self {
        let config: Config = toml::from_str(config_str).expect("Unable to parse config");
        config
    }
}
