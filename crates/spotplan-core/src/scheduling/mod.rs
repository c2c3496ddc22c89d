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

pub mod intervals;

pub use intervals::group_consecutive_slots;

use chrono::{DateTime, Utc};
use spotplan_types::{BatteryStrategyParams, PriceSlot, Schedule};
use tracing::debug;

use crate::resolution::infer_resolution_minutes;

/// Hard ceiling for the discharge threshold (c/kWh)
///
/// Keeps discharging possible when `last_price_charged + epsilon` is above
/// anything the market is likely to pay.
pub const DISCHARGE_THRESHOLD_CAP_CENTS: f64 = 8.0;

/// Convert an hour budget into a slot budget at the given resolution
///
/// `ceil(hours * 60 / resolution)`. Non-positive or NaN budgets give zero
/// slots. A zero resolution means no bound.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is checked positive, float-to-int casts saturate"
)]
pub fn slots_for_hours(max_hours: f64, resolution_minutes: u32) -> usize {
    let slots = (max_hours * 60.0 / f64::from(resolution_minutes)).ceil();
    if slots.is_nan() || slots <= 0.0 {
        return 0;
    }
    slots as usize
}

/// Price at or above which a slot is worth discharging
pub fn discharge_threshold(params: &BatteryStrategyParams) -> f64 {
    capped_discharge_threshold(params.last_price_charged, params.epsilon)
}

/// `last_price_charged + epsilon`, capped at [`DISCHARGE_THRESHOLD_CAP_CENTS`]
pub fn capped_discharge_threshold(last_price_charged: f64, epsilon: f64) -> f64 {
    (last_price_charged + epsilon).min(DISCHARGE_THRESHOLD_CAP_CENTS)
}

/// Slot is at least `epsilon` cheaper than the reference price
pub fn is_charge_candidate(slot: &PriceSlot, params: &BatteryStrategyParams) -> bool {
    params.last_price_charged - slot.price >= params.epsilon
}

/// Build a charge/discharge schedule from the prices at or after `now`
///
/// Charge candidates are slots at least `epsilon` below `last_price_charged`;
/// discharge candidates are slots at or above [`discharge_threshold`]. The
/// two sets are independent, so with a large epsilon one slot may land in
/// both. Each side keeps its most favourable slots (cheapest for charging,
/// priciest for discharging) up to the hour budget, returned in time order
/// together with their grouped intervals.
///
/// Input order does not matter. Price ties at the budget boundary resolve in
/// favour of the earlier slot.
pub fn build_battery_schedule(
    prices: &[PriceSlot],
    params: &BatteryStrategyParams,
    now: DateTime<Utc>,
) -> Schedule {
    let mut future: Vec<PriceSlot> = prices
        .iter()
        .filter(|slot| slot.is_future(now))
        .copied()
        .collect();
    future.sort_by_key(|slot| slot.timestamp);

    if future.is_empty() {
        debug!(
            total = prices.len(),
            "No future price slots, returning empty schedule"
        );
        return Schedule::empty(params);
    }

    let resolution = infer_resolution_minutes(&future);
    let max_charge_slots = slots_for_hours(params.max_charge_hours, resolution);
    let max_discharge_slots = slots_for_hours(params.max_discharge_hours, resolution);
    let threshold = discharge_threshold(params);

    let mut charge_slots: Vec<PriceSlot> = future
        .iter()
        .filter(|slot| is_charge_candidate(slot, params))
        .copied()
        .collect();
    let mut discharge_slots: Vec<PriceSlot> = future
        .iter()
        .filter(|slot| slot.price >= threshold)
        .copied()
        .collect();

    debug!(
        future = future.len(),
        resolution,
        threshold,
        charge_candidates = charge_slots.len(),
        discharge_candidates = discharge_slots.len(),
        max_charge_slots,
        max_discharge_slots,
        "Classified price slots"
    );

    // Stable sorts: equal prices stay in time order
    charge_slots.sort_by(|a, b| a.price.total_cmp(&b.price));
    discharge_slots.sort_by(|a, b| b.price.total_cmp(&a.price));
    charge_slots.truncate(max_charge_slots);
    discharge_slots.truncate(max_discharge_slots);

    charge_slots.sort_by_key(|slot| slot.timestamp);
    discharge_slots.sort_by_key(|slot| slot.timestamp);

    let charge_intervals = group_consecutive_slots(&charge_slots, resolution);
    let discharge_intervals = group_consecutive_slots(&discharge_slots, resolution);

    Schedule {
        area: params.area.clone(),
        last_price_charged: params.last_price_charged,
        epsilon: params.epsilon,
        resolution_minutes: Some(resolution),
        charge_slots,
        discharge_slots,
        charge_intervals,
        discharge_intervals,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    fn params(last_price_charged: f64, epsilon: f64) -> BatteryStrategyParams {
        BatteryStrategyParams {
            last_price_charged,
            epsilon,
            ..BatteryStrategyParams::default()
        }
    }

    #[test]
    fn test_slots_for_hours_rounds_up() {
        assert_eq!(slots_for_hours(3.0, 60), 3);
        assert_eq!(slots_for_hours(3.0, 15), 12);
        assert_eq!(slots_for_hours(1.1, 60), 2);
        assert_eq!(slots_for_hours(0.5, 60), 1);
    }

    #[test]
    fn test_slots_for_hours_non_positive_budget_is_zero() {
        assert_eq!(slots_for_hours(0.0, 60), 0);
        assert_eq!(slots_for_hours(-2.0, 60), 0);
        assert_eq!(slots_for_hours(f64::NAN, 60), 0);
    }

    #[test]
    fn test_discharge_threshold_is_capped() {
        assert_eq!(discharge_threshold(&params(10.0, 5.0)), 8.0);
        assert_eq!(discharge_threshold(&params(4.0, 2.0)), 6.0);
        assert_eq!(capped_discharge_threshold(10.0, 5.0), 8.0);
        assert_eq!(capped_discharge_threshold(4.0, 2.0), 6.0);
    }

    #[test]
    fn test_charge_candidate_needs_full_epsilon() {
        let p = params(20.0, 3.0);
        let now = chrono::Utc::now();

        assert!(is_charge_candidate(&PriceSlot::new(now, 16.0), &p));
        assert!(is_charge_candidate(&PriceSlot::new(now, 17.0), &p));
        assert!(!is_charge_candidate(&PriceSlot::new(now, 18.0), &p));
    }
}
