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

use crate::errors::{NordPoolError, NordPoolResult};
use crate::types::DayAheadResponse;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode, header};
use spotplan_types::PriceSlot;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Public data portal endpoint for day-ahead prices
pub const DEFAULT_BASE_URL: &str = "https://dataportal-api.nordpoolgroup.com/api/DayAheadPrices";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// EUR/MWh to c/kWh
const EUR_MWH_PER_CENT_KWH: f64 = 10.0;

/// Nord Pool data portal client
#[derive(Debug, Clone)]
pub struct NordPoolClient {
    base_url: String,
    client: Client,
}

impl NordPoolClient {
    /// Create a client for `base_url` (full endpoint URL, proxies allowed)
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> NordPoolResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(NordPoolError::Config("Base URL must not be empty".to_owned()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| NordPoolError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, client })
    }

    /// Client for the public portal with the default timeout
    pub fn with_defaults() -> NordPoolResult<Self> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT, default_user_agent())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch today's and tomorrow's prices (UTC dates of `now`) in c/kWh
    ///
    /// A day the exchange has not published yet (empty body) is skipped, so
    /// before the afternoon auction this usually returns today only. Any
    /// other failure aborts the whole fetch.
    pub async fn fetch_prices(
        &self,
        area: &str,
        market: &str,
        currency: &str,
        now: DateTime<Utc>,
    ) -> NordPoolResult<Vec<PriceSlot>> {
        let today = now.date_naive();
        let tomorrow = (now + chrono::Duration::days(1)).date_naive();

        let mut prices = Vec::new();
        for date in [today, tomorrow] {
            let Some(response) = self.fetch_day(date, area, market, currency).await? else {
                info!(%date, area, "No prices published yet, skipping day");
                continue;
            };
            prices.extend(extract_area_prices(&response, area, date));
        }

        prices.sort_by_key(|slot| slot.timestamp);

        info!(area, market, currency, count = prices.len(), "Fetched Nord Pool prices");
        Ok(prices)
    }

    /// Raw response for one delivery date, `None` when the body is empty
    pub async fn fetch_day(
        &self,
        date: NaiveDate,
        area: &str,
        market: &str,
        currency: &str,
    ) -> NordPoolResult<Option<DayAheadResponse>> {
        let date_param = date.format("%Y-%m-%d").to_string();
        debug!(url = %self.base_url, date = %date_param, area, market, currency, "Requesting day-ahead prices");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("date", date_param.as_str()),
                ("market", market),
                ("deliveryArea", area),
                ("currency", currency),
            ])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 300 {
            warn!(%date, status = status.as_u16(), "Nord Pool API returned error status");
            return Err(NordPoolError::ApiError {
                date,
                status: status.as_u16(),
            });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let parsed = serde_json::from_slice::<DayAheadResponse>(&body).map_err(|e| {
            NordPoolError::InvalidResponse {
                date,
                reason: e.to_string(),
            }
        })?;

        debug!(
            %date,
            entries = parsed.multi_area_entries.len(),
            updated_at = %parsed.updated_at,
            "Decoded day-ahead response"
        );
        Ok(Some(parsed))
    }
}

/// User agent sent when none is configured
pub fn default_user_agent() -> &'static str {
    concat!("spotplan/", env!("CARGO_PKG_VERSION"))
}

/// Price slots for `area` in c/kWh, skipping entries that cannot be used
fn extract_area_prices(response: &DayAheadResponse, area: &str, date: NaiveDate) -> Vec<PriceSlot> {
    response
        .multi_area_entries
        .iter()
        .filter_map(|entry| {
            let timestamp = match DateTime::parse_from_rfc3339(&entry.delivery_start) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(e) => {
                    warn!(%date, delivery_start = %entry.delivery_start, "Skipping entry with bad timestamp: {e}");
                    return None;
                }
            };

            let Some(eur_per_mwh) = entry.entry_per_area.get(area) else {
                debug!(%date, area, %timestamp, "Entry has no price for area");
                return None;
            };

            Some(PriceSlot::new(timestamp, eur_per_mwh / EUR_MWH_PER_CENT_KWH))
        })
        .collect()
}
