//! Deployment settings read from the environment.
//!
//! Every variable has a default so a handler starts even when the deployment
//! omits one:
//! - `LOG_LEVEL` (`INFO`)
//! - `REGION` (`us-east-1`)
//! - `STAGE` (`stage`)
//! - `STAGE_DASH_PREFIX` (`stage-`)

use crate::logging::LogLevel;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const STAGING: &str = "stage";
pub const PRODUCTION: &str = "prod";

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

/// Deployment settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub region: String,
    pub stage: String,
    pub stage_dash_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: LogLevel::Info,
            region: "us-east-1".to_string(),
            stage: STAGING.to_string(),
            stage_dash_prefix: "stage-".to_string(),
        }
    }
}

impl Settings {
    /// Settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Settings from an arbitrary variable lookup. Unset, empty or
    /// unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(level) = get("LOG_LEVEL").and_then(|v| v.parse::<LogLevel>().ok()) {
            settings.log_level = level;
        }
        if let Some(region) = get("REGION") {
            settings.region = region;
        }
        if let Some(stage) = get("STAGE") {
            settings.stage = stage;
        }
        if let Some(prefix) = get("STAGE_DASH_PREFIX") {
            settings.stage_dash_prefix = prefix;
        }

        settings
    }

    /// Settings loaded once per process on first use.
    pub fn global() -> &'static Settings {
        &SETTINGS
    }

    pub fn is_production(&self) -> bool {
        self.stage == PRODUCTION
    }

    /// Prefix a resource name with the stage, e.g. `stage-users`.
    pub fn stage_name(&self, name: &str) -> String {
        format!("{}{}", self.stage_dash_prefix, name)
    }
}
