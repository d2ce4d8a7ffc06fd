//! Application configuration. API key, region, fan-out limits.
//!
//! An explicit object handed to adapters at construction — never ambient
//! process state.

use serde::Deserialize;

/// Education office code for the Taebaek area (Gangwon office).
pub const DEFAULT_OFFICE_CODE: &str = "K10";

/// Default cap on concurrently in-flight per-school requests.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// NEIS open API key. Read from MEALGRID_API_KEY (or NEIS_API_KEY).
    pub api_key: Option<String>,

    /// Education office region code. Read from MEALGRID_OFFICE_CODE.
    #[serde(default)]
    pub office_code: Option<String>,

    /// Max concurrent per-school requests. Read from MEALGRID_MAX_CONCURRENCY.
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Per-request timeout in seconds. Read from MEALGRID_TIMEOUT_SECS.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("MEALGRID").try_parsing(true));
        if let Ok(path) = std::env::var("MEALGRID_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // NEIS_API_KEY is read directly (no MEALGRID_ prefix) so the key name
        // from the NEIS portal can be used as-is in .env
        if cfg.api_key.is_none() {
            if let Ok(key) = std::env::var("NEIS_API_KEY") {
                cfg.api_key = Some(key);
            }
        }
        Ok(cfg)
    }

    /// Returns the API key if configured. Absence is fatal at startup.
    pub fn api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|k| !k.is_empty())
    }

    /// Returns the office region code. Defaults to Taebaek's office.
    pub fn office_code_or_default(&self) -> String {
        self.office_code
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_OFFICE_CODE.to_string())
    }

    /// Returns the fan-out bound. Defaults to 10; never 0.
    pub fn max_concurrency_or_default(&self) -> usize {
        self.max_concurrency
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_CONCURRENCY)
    }

    /// Returns the per-request timeout in seconds. Defaults to 10.
    pub fn timeout_secs_or_default(&self) -> u64 {
        self.timeout_secs
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}
