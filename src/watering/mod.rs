pub mod balance;
pub mod ds;
pub mod planner;

/// FAO conversion used by the stage-weighted balance.
pub const SQ_METERS_PER_ACRE: f64 = 4046.86;
/// Rounded liters per mm of depth over one acre, used by the simplified path.
pub const LITERS_PER_MM_ACRE: f64 = 4047.0;
pub const DAYS_PER_WEEK: f64 = 7.0;
/// Runtimes above this are physically impossible and get flagged, not clamped.
pub const MAX_DAILY_RUNTIME_HOURS: f64 = 24.0;
