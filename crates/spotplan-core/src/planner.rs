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

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spotplan_types::{BatteryStrategyParams, PriceSlot, Schedule};
use tracing::{debug, info};

use crate::scheduling::build_battery_schedule;
use crate::traits::PriceDataSource;

/// Schedule together with the prices it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub schedule: Schedule,
    pub prices: Vec<PriceSlot>,
}

/// Fetch prices from `source` and build a schedule for `now`
///
/// A source returning no prices at all is an error here: the exchange has
/// nothing published for the area. Prices that are all in the past are not,
/// they just produce an empty schedule.
pub async fn plan(
    source: &dyn PriceDataSource,
    params: &BatteryStrategyParams,
    now: DateTime<Utc>,
) -> Result<Plan> {
    debug!(source = source.name(), area = %params.area, "Reading prices");
    let prices = source.read_prices(now).await?;

    if prices.is_empty() {
        bail!("No prices returned by {} for {}", source.name(), params.area);
    }

    let schedule = build_battery_schedule(&prices, params, now);

    info!(
        source = source.name(),
        area = %schedule.area,
        prices = prices.len(),
        resolution_minutes = ?schedule.resolution_minutes,
        charge_slots = schedule.charge_slots.len(),
        discharge_slots = schedule.discharge_slots.len(),
        "Schedule built"
    );

    Ok(Plan { schedule, prices })
}
