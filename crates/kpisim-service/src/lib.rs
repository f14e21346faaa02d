//! # KPI Simulator Service
//!
//! Presentation boundary for the simulator: loads configuration, owns the
//! single in-process [`DecisionStore`](kpisim_store::DecisionStore) and
//! exposes it as a JSON API.

pub mod api;
pub mod config;

pub use api::{router, AppState};
pub use config::KpiSimConfig;
