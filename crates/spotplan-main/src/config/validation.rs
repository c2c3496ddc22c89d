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

use serde::{Deserialize, Serialize};
use spotplan_types::BatteryStrategyParams;
use tracing_subscriber::EnvFilter;

use super::{LoggingConfig, NordPoolConfig};

/// Validation result with field-level errors and warnings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Errors prevent the configuration from being used
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// A validation issue (error or warning)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field path (e.g. "strategy.area")
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// Strategy parameters: the core accepts anything, so only flag values that
/// cannot be what the user meant
pub fn validate_strategy(params: &BatteryStrategyParams) -> ValidationResult {
    let mut result = ValidationResult::success();

    for (field, value) in [
        ("strategy.area", &params.area),
        ("strategy.market", &params.market),
        ("strategy.currency", &params.currency),
    ] {
        if value.trim().is_empty() {
            result.add_error(field, "Value cannot be empty");
        }
    }

    for (field, value) in [
        ("strategy.max_charge_hours", params.max_charge_hours),
        ("strategy.max_discharge_hours", params.max_discharge_hours),
        ("strategy.last_price_charged", params.last_price_charged),
        ("strategy.epsilon", params.epsilon),
    ] {
        if !value.is_finite() {
            result.add_error(field, format!("{value} is not a finite number"));
        }
    }

    if params.max_charge_hours < 0.0 {
        result.add_warning(
            "strategy.max_charge_hours",
            "Negative budget, no charge slots will be selected",
        );
    }
    if params.max_discharge_hours < 0.0 {
        result.add_warning(
            "strategy.max_discharge_hours",
            "Negative budget, no discharge slots will be selected",
        );
    }
    if params.epsilon < 0.0 {
        result.add_warning(
            "strategy.epsilon",
            "Negative epsilon allows charging above the reference price",
        );
    }

    result
}

pub fn validate_nordpool(nordpool: &NordPoolConfig) -> ValidationResult {
    let mut result = ValidationResult::success();

    if nordpool.base_url.trim().is_empty() {
        result.add_error("nordpool.base_url", "Base URL cannot be empty");
    } else if !nordpool.base_url.starts_with("http://")
        && !nordpool.base_url.starts_with("https://")
    {
        result.add_error(
            "nordpool.base_url",
            format!("'{}' is not an http(s) URL", nordpool.base_url),
        );
    }
    if nordpool.timeout_secs == 0 {
        result.add_error("nordpool.timeout_secs", "Timeout must be at least 1 second");
    }
    if nordpool.user_agent.trim().is_empty() {
        result.add_warning("nordpool.user_agent", "Empty user agent, requests may be rejected");
    }

    result
}

pub fn validate_logging(logging: &LoggingConfig) -> ValidationResult {
    let mut result = ValidationResult::success();

    if let Err(e) = EnvFilter::try_new(&logging.level) {
        result.add_error(
            "logging.level",
            format!("Invalid filter '{}': {e}", logging.level),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_keep_result_valid() {
        let mut result = ValidationResult::success();
        result.add_warning("strategy.epsilon", "negative");

        assert!(result.valid);
        assert!(!result.has_errors());
        assert_eq!(result.warnings[0].severity, ValidationSeverity::Warning);
    }

    #[test]
    fn test_merge_propagates_errors() {
        let mut result = ValidationResult::success();
        let mut other = ValidationResult::success();
        other.add_error("nordpool.base_url", "empty");

        result.merge(other);

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].to_string(), "nordpool.base_url: empty");
    }

    #[test]
    fn test_default_sections_are_valid() {
        let strategy = validate_strategy(&BatteryStrategyParams::default());
        let nordpool = validate_nordpool(&NordPoolConfig::default());
        let logging = validate_logging(&LoggingConfig::default());

        assert!(strategy.valid && strategy.warnings.is_empty());
        assert!(nordpool.valid && nordpool.warnings.is_empty());
        assert!(logging.valid);
    }

    #[test]
    fn test_strategy_empty_market_selection() {
        let params = BatteryStrategyParams {
            area: String::new(),
            currency: "  ".to_owned(),
            ..BatteryStrategyParams::default()
        };

        let result = validate_strategy(&params);

        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["strategy.area", "strategy.currency"]);
        assert!(result.errors.iter().all(|e| e.severity == ValidationSeverity::Error));
    }

    #[test]
    fn test_strategy_negative_budgets_warn_and_nan_errors() {
        let params = BatteryStrategyParams {
            max_discharge_hours: -2.0,
            epsilon: f64::INFINITY,
            ..BatteryStrategyParams::default()
        };

        let result = validate_strategy(&params);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "strategy.epsilon");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "strategy.max_discharge_hours");
    }

    #[test]
    fn test_nordpool_url_scheme_and_timeout() {
        let nordpool = NordPoolConfig {
            base_url: "dataportal-api.nordpoolgroup.com".to_owned(),
            timeout_secs: 0,
            user_agent: String::new(),
        };

        let result = validate_nordpool(&nordpool);

        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.warnings[0].field, "nordpool.user_agent");
    }

    #[test]
    fn test_logging_rejects_unknown_level() {
        let logging = LoggingConfig {
            level: "spotplan=loud".to_owned(),
        };

        assert!(validate_logging(&logging).has_errors());
    }
}
