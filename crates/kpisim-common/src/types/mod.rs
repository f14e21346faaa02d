//! Core data types for the KPI simulator

pub mod decisions;
pub mod kpis;
pub mod scenario;
