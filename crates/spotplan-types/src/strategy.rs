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

/// Parameters of the price-threshold battery strategy
///
/// `area`, `market` and `currency` identify the price feed and are carried
/// into the output unchanged. They play no role in slot selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryStrategyParams {
    /// Delivery area code (e.g. "LV", "EE", "SE3")
    pub area: String,

    /// Market name as understood by the exchange (e.g. "DayAhead")
    pub market: String,

    /// Currency the exchange should quote in (e.g. "EUR")
    pub currency: String,

    /// Upper bound on total charging time (hours)
    pub max_charge_hours: f64,

    /// Upper bound on total discharging time (hours)
    pub max_discharge_hours: f64,

    /// Reference price the battery was last charged at (c/kWh)
    pub last_price_charged: f64,

    /// Price margin a slot must beat the reference by to charge (c/kWh)
    pub epsilon: f64,
}

impl Default for BatteryStrategyParams {
    fn default() -> Self {
        Self {
            area: "LV".to_owned(),
            market: "DayAhead".to_owned(),
            currency: "EUR".to_owned(),
            max_charge_hours: 3.0,
            max_discharge_hours: 3.0,
            last_price_charged: 15.0,
            epsilon: 2.0,
        }
    }
}
