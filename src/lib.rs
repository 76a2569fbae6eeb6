pub mod api;
pub mod config;
pub mod crops;
pub mod error;
pub mod farm;
pub mod session;
pub mod time;
pub mod utils;
pub mod watering;
pub mod weather;
