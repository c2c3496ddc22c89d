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

pub mod export;
pub mod planner;
pub mod resolution;
pub mod scheduling;
pub mod traits;

pub use planner::{Plan, plan};
pub use resolution::{DEFAULT_RESOLUTION_MINUTES, infer_resolution_minutes};
pub use scheduling::{
    DISCHARGE_THRESHOLD_CAP_CENTS, build_battery_schedule, capped_discharge_threshold,
    group_consecutive_slots, slots_for_hours,
};
pub use traits::PriceDataSource;

// Re-export the data model so callers only need one dependency
pub use spotplan_types::{BatteryStrategyParams, Interval, PriceSlot, Schedule};
