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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::PriceSlot;
use crate::strategy::BatteryStrategyParams;

/// Contiguous run of selected slots, summarized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Timestamp of the first slot in the run
    pub start: DateTime<Utc>,

    /// Timestamp of the last slot plus one resolution step
    pub end: DateTime<Utc>,

    /// Arithmetic mean of the slot prices (c/kWh)
    pub avg_price: f64,
}

/// Charge/discharge plan derived from a price sequence
///
/// Field names are the JSON contract consumed by renderers. The interval
/// lists are derived from the slot lists and are rebuilt together with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub area: String,
    pub last_price_charged: f64,
    pub epsilon: f64,

    /// Inferred slot length in minutes. `None` only when no future slots exist.
    pub resolution_minutes: Option<u32>,

    /// Selected charge slots, ascending by timestamp
    pub charge_slots: Vec<PriceSlot>,

    /// Selected discharge slots, ascending by timestamp
    pub discharge_slots: Vec<PriceSlot>,

    pub charge_intervals: Vec<Interval>,
    pub discharge_intervals: Vec<Interval>,
}

impl Schedule {
    /// Schedule with no resolution and no selections
    pub fn empty(params: &BatteryStrategyParams) -> Self {
        Self {
            area: params.area.clone(),
            last_price_charged: params.last_price_charged,
            epsilon: params.epsilon,
            resolution_minutes: None,
            charge_slots: Vec::new(),
            discharge_slots: Vec::new(),
            charge_intervals: Vec::new(),
            discharge_intervals: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.charge_slots.is_empty() && self.discharge_slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schedule_serializes_lists_not_nulls() {
        let schedule = Schedule::empty(&BatteryStrategyParams::default());
        let json = serde_json::to_value(&schedule).unwrap();

        assert!(json["resolution_minutes"].is_null());
        for key in [
            "charge_slots",
            "discharge_slots",
            "charge_intervals",
            "discharge_intervals",
        ] {
            assert_eq!(json[key], serde_json::json!([]), "{key} should be []");
        }
        assert_eq!(json["area"], "LV");
    }
}
