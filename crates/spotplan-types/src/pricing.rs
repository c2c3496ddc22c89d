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

/// A single day-ahead price observation
///
/// Covers one resolution step starting at `timestamp`. Producers give no
/// ordering guarantee, consumers sort by timestamp themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSlot {
    /// Start of the delivery slot (UTC)
    pub timestamp: DateTime<Utc>,

    /// Price in cents per kWh
    pub price: f64,
}

impl PriceSlot {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Whether this slot starts at or after `now`
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.timestamp >= now
    }
}
