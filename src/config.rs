//! Runtime configuration read from `STAYWISE_*` environment variables.
//!
//! Every variable is optional. Unparseable or out-of-range values are
//! ignored and the default is kept, so a bad setting never blocks startup.

use std::path::PathBuf;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise.
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "file" => Some(Self::File),
            "stdout" => Some(Self::Stdout),
            _ => None,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    /// Optional hex SHA-256 the model artifact must match
    pub model_sha256: Option<String>,
    pub split_seed: u64,
    pub train_fraction: f64,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/HR_comma_sep.csv"),
            model_path: PathBuf::from("models/employee_model.json"),
            model_sha256: None,
            split_seed: 42,
            train_fraction: 0.8,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("staywise.log"),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("STAYWISE_DATASET_PATH") {
            cfg.dataset_path = PathBuf::from(v.trim());
        }

        if let Some(v) = non_empty("STAYWISE_MODEL_PATH") {
            cfg.model_path = PathBuf::from(v.trim());
        }

        if let Some(v) = non_empty("STAYWISE_MODEL_SHA256") {
            let v = v.trim();
            if v.len() == 64 && v.chars().all(|c| c.is_ascii_hexdigit()) {
                cfg.model_sha256 = Some(v.to_ascii_lowercase());
            } else {
                tracing::warn!("Ignoring malformed STAYWISE_MODEL_SHA256");
            }
        }

        if let Some(v) = non_empty("STAYWISE_SPLIT_SEED") {
            if let Ok(seed) = v.trim().parse::<u64>() {
                cfg.split_seed = seed;
            }
        }

        if let Some(v) = non_empty("STAYWISE_TRAIN_FRACTION") {
            if let Ok(x) = v.trim().parse::<f64>() {
                if x.is_finite() && x > 0.0 && x < 1.0 {
                    cfg.train_fraction = x;
                }
            }
        }

        if let Some(mode) = non_empty("STAYWISE_LOG_MODE").and_then(|v| LogMode::parse(&v)) {
            cfg.log_mode = mode;
        }

        if let Some(v) = non_empty("STAYWISE_LOG_FILE") {
            cfg.log_file = PathBuf::from(v.trim());
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config_from(&[]);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.split_seed, 42);
        assert!((cfg.train_fraction - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overrides() {
        let cfg = config_from(&[
            ("STAYWISE_DATASET_PATH", "/tmp/hr.csv"),
            ("STAYWISE_SPLIT_SEED", " 7 "),
            ("STAYWISE_TRAIN_FRACTION", "0.5"),
            ("STAYWISE_LOG_MODE", "STDOUT"),
        ]);
        assert_eq!(cfg.dataset_path, PathBuf::from("/tmp/hr.csv"));
        assert_eq!(cfg.split_seed, 7);
        assert!((cfg.train_fraction - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.log_mode, LogMode::Stdout);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let cfg = config_from(&[
            ("STAYWISE_SPLIT_SEED", "-1"),
            ("STAYWISE_TRAIN_FRACTION", "1.5"),
            ("STAYWISE_LOG_MODE", "syslog"),
            ("STAYWISE_MODEL_SHA256", "not-a-digest"),
            ("STAYWISE_MODEL_PATH", "  "),
        ]);
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_train_fraction_bounds_are_exclusive() {
        for bad in ["0", "0.0", "1", "-0.2"] {
            let cfg = config_from(&[("STAYWISE_TRAIN_FRACTION", bad)]);
            assert!(
                (cfg.train_fraction - 0.8).abs() < f64::EPSILON,
                "{bad} should be ignored"
            );
        }
        let cfg = config_from(&[("STAYWISE_TRAIN_FRACTION", "0.01")]);
        assert!((cfg.train_fraction - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_digest_is_lowercased() {
        let digest = "AB".repeat(32);
        let cfg = config_from(&[("STAYWISE_MODEL_SHA256", digest.as_str())]);
        assert_eq!(cfg.model_sha256, Some("ab".repeat(32)));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
