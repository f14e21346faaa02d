//! KPI derivation
pub mod calculator;

pub use self::calculator::{blended_remediation_time, derive_kpis};
