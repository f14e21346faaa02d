//! Service configuration

use std::path::{Path, PathBuf};

use kpisim_common::{KpiSimError, Kpis, Result, Scenario};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Simulator service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSimConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// JSON file overriding the built-in baseline constants
    pub baseline_file: Option<PathBuf>,
    /// Scenario selected at startup and after a reset
    pub initial_scenario: Scenario,
}

impl Default for KpiSimConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
            baseline_file: None,
            initial_scenario: Scenario::Baseline,
        }
    }
}

impl KpiSimConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        // Platform PORT first, KPISIM_PORT wins if both are set
        for key in ["PORT", "KPISIM_PORT"] {
            if let Some(port) = lookup(key) {
                match port.parse::<u16>() {
                    Ok(p) => cfg.port = p,
                    Err(_) => warn!(key, value = %port, "ignoring invalid port"),
                }
            }
        }

        if let Some(host) = lookup("KPISIM_HOST") {
            cfg.host = host;
        }

        if let Some(path) = lookup("KPISIM_BASELINE_FILE") {
            cfg.baseline_file = Some(PathBuf::from(path));
        }

        if let Some(tag) = lookup("KPISIM_INITIAL_SCENARIO") {
            cfg.initial_scenario = tag
                .parse()
                .map_err(|e| KpiSimError::Config(format!("KPISIM_INITIAL_SCENARIO: {}", e)))?;
        }

        Ok(cfg)
    }

    /// Baseline constants: the configured file if any, the built-in ones otherwise
    pub fn baseline(&self) -> Result<Kpis> {
        match &self.baseline_file {
            Some(path) => load_baseline_file(path),
            None => Ok(Kpis::initial()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and validate a JSON baseline file
pub fn load_baseline_file(path: &Path) -> Result<Kpis> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        KpiSimError::Config(format!("Failed to read baseline file {}: {}", path.display(), e))
    })?;

    let kpis: Kpis = serde_json::from_str(&content)?;
    kpis.validate()?;
    Ok(kpis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = KpiSimConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, KpiSimConfig::default());
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8090");
    }

    #[test]
    fn test_overrides() {
        let cfg = KpiSimConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("KPISIM_PORT", "9100"),
            ("KPISIM_HOST", "127.0.0.1"),
            ("KPISIM_INITIAL_SCENARIO", "balanced"),
            ("KPISIM_BASELINE_FILE", "/etc/kpisim/baseline.json"),
        ]))
        .unwrap();

        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.initial_scenario, Scenario::Balanced);
        assert_eq!(
            cfg.baseline_file.as_deref(),
            Some(Path::new("/etc/kpisim/baseline.json"))
        );
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let cfg = KpiSimConfig::from_lookup(lookup(&[("KPISIM_PORT", "eighty")])).unwrap();
        assert_eq!(cfg.port, 8090);
    }

    #[test]
    fn test_invalid_scenario_is_rejected() {
        let err = KpiSimConfig::from_lookup(lookup(&[("KPISIM_INITIAL_SCENARIO", "yolo")]))
            .unwrap_err();
        assert!(matches!(err, KpiSimError::Config(_)));
    }

    #[test]
    fn test_baseline_defaults_to_initial() {
        assert_eq!(KpiSimConfig::default().baseline().unwrap(), Kpis::initial());
    }
}
