use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::layout::PageSize;

/// Default request body cap for `POST /api/v1/export`.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub page_size: PageSize,
    pub max_body_bytes: usize,
    /// When set, every exported PDF is also persisted into this directory.
    pub export_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            page_size: lookup("PAGE_SIZE")
                .unwrap_or_else(|| "a4".to_string())
                .parse::<PageSize>()
                .map_err(anyhow::Error::msg)
                .context("PAGE_SIZE must be a4 or letter")?,
            max_body_bytes: match lookup("MAX_BODY_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_BODY_BYTES must be a byte count")?,
                None => DEFAULT_MAX_BODY_BYTES,
            },
            export_dir: lookup("EXPORT_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            page_size: PageSize::A4,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            export_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.page_size, PageSize::A4);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("PAGE_SIZE", "Letter"),
            ("MAX_BODY_BYTES", "2048"),
            ("EXPORT_DIR", "/var/lib/resumes"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.max_body_bytes, 2048);
        assert_eq!(config.export_dir, Some(PathBuf::from("/var/lib/resumes")));
    }

    #[test]
    fn test_blank_export_dir_is_unset() {
        let config = Config::from_lookup(lookup(&[("EXPORT_DIR", "  ")])).unwrap();
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(Config::from_lookup(lookup(&[("PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PAGE_SIZE", "tabloid")])).is_err());
        assert!(Config::from_lookup(lookup(&[("MAX_BODY_BYTES", "-1")])).is_err());
    }
}
