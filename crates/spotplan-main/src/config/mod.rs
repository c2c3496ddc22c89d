// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SpotPlan.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

pub mod validation;

pub use validation::{
    ValidationIssue, ValidationResult, ValidationSeverity, validate_logging, validate_nordpool,
    validate_strategy,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use spotplan_nordpool::{DEFAULT_BASE_URL, NordPoolClient, default_user_agent};
use spotplan_types::BatteryStrategyParams;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "spotplan.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub strategy: BatteryStrategyParams,
    pub nordpool: NordPoolConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NordPoolConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where the configuration was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_agent() -> String {
    default_user_agent().to_owned()
}

fn default_log_level() -> String {
    "spotplan=info".to_owned()
}

impl Default for NordPoolConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl NordPoolConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client(&self) -> Result<NordPoolClient> {
        NordPoolClient::new(self.base_url.clone(), self.timeout(), &self.user_agent)
            .context("Failed to create Nord Pool client")
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML: {}", path.display()))
    }

    /// Load configuration and apply `SPOTPLAN_*` environment overrides
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigOrigin)> {
        let (mut config, origin) = match path {
            Some(path) => (Self::from_file(path)?, ConfigOrigin::File(path.to_path_buf())),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    (
                        Self::from_file(default_path)?,
                        ConfigOrigin::File(default_path.to_path_buf()),
                    )
                } else {
                    (Self::default(), ConfigOrigin::Defaults)
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok((config, origin))
    }

    /// Apply overrides from a key lookup (the process environment in `load`)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(area) = lookup("SPOTPLAN_AREA") {
            self.strategy.area = area;
        }
        if let Some(market) = lookup("SPOTPLAN_MARKET") {
            self.strategy.market = market;
        }
        if let Some(currency) = lookup("SPOTPLAN_CURRENCY") {
            self.strategy.currency = currency;
        }
        if let Some(url) = lookup("SPOTPLAN_BASE_URL") {
            self.nordpool.base_url = url;
        }
    }

    /// Validate with field-level errors and warnings
    pub fn validate_detailed(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        result.merge(validate_strategy(&self.strategy));
        result.merge(validate_nordpool(&self.nordpool));
        result.merge(validate_logging(&self.logging));
        result
    }

    /// Fail on validation errors, log warnings
    pub fn validate(&self) -> Result<()> {
        let result = self.validate_detailed();
        for issue in &result.warnings {
            warn!(field = %issue.field, "{}", issue.message);
        }

        if result.has_errors() {
            let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
            bail!("Invalid configuration:\n  {}", errors.join("\n  "));
        }
        Ok(())
    }

    pub fn example_toml() -> &'static str {
        r#"# SpotPlan configuration example
# Every field is optional; missing values use the defaults shown here.
# SPOTPLAN_AREA, SPOTPLAN_MARKET, SPOTPLAN_CURRENCY and SPOTPLAN_BASE_URL
# override the file, command line flags override both.

[strategy]
area = "LV"
market = "DayAhead"
currency = "EUR"
# Hour budgets, converted to slots at the feed's resolution (rounded up)
max_charge_hours = 3.0
max_discharge_hours = 3.0
# Reference price in c/kWh and the margin a charge slot must undercut it by
last_price_charged = 15.0
epsilon = 2.0

[nordpool]
base_url = "https://dataportal-api.nordpoolgroup.com/api/DayAheadPrices"
timeout_secs = 10
# user_agent = "spotplan/0.1.0"

[logging]
# tracing EnvFilter directive, RUST_LOG takes precedence
level = "spotplan=info"
"#
    }
}
