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

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use spotplan_types::PriceSlot;

/// Data source abstraction for day-ahead prices
/// Implementations: Nord Pool data portal, CSV fixtures
#[async_trait]
pub trait PriceDataSource: Send + Sync {
    /// Read the price sequence relevant at `now` (today and tomorrow)
    async fn read_prices(&self, now: DateTime<Utc>) -> Result<Vec<PriceSlot>>;

    /// Get data source name for logging
    fn name(&self) -> &str;
}
