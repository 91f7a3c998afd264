//! Configuration loaded from environment variables.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// CLI configuration. Command-line arguments take precedence.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Menu options file (MENU_OPTIONS_PATH).
    pub options_path: Option<PathBuf>,

    /// Current route (MENU_ROUTE, default: empty).
    pub route: String,

    /// Current query parameters (MENU_PARAMS, comma-separated `key=value`).
    pub params: BTreeMap<String, String>,

    /// Prefix for generated route URLs (MENU_BASE_PATH).
    pub base_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let options_path = env::var("MENU_OPTIONS_PATH").ok().map(PathBuf::from);

        let route = env::var("MENU_ROUTE").unwrap_or_default();

        let params = match env::var("MENU_PARAMS") {
            Ok(v) => parse_params(v.split(','))?,
            Err(_) => BTreeMap::new(),
        };

        let base_path = env::var("MENU_BASE_PATH").ok().filter(|s| !s.is_empty());

        Ok(Self {
            options_path,
            route,
            params,
            base_path,
        })
    }
}

/// Parse `key=value` pairs, skipping blanks.
pub fn parse_params<'a>(
    pairs: impl IntoIterator<Item = &'a str>,
) -> Result<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();

    for pair in pairs.into_iter().map(str::trim).filter(|s| !s.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("parameter '{pair}' must be in key=value form");
        };
        if key.trim().is_empty() {
            bail!("parameter '{pair}' has an empty name");
        }
        params.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(params)
}
