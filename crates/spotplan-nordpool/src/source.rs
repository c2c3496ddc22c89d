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

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use spotplan_core::PriceDataSource;
use spotplan_types::{BatteryStrategyParams, PriceSlot};
use tracing::debug;

use crate::client::NordPoolClient;

/// `PriceDataSource` bound to one area/market/currency
#[derive(Debug, Clone)]
pub struct NordPoolPriceSource {
    client: NordPoolClient,
    area: String,
    market: String,
    currency: String,
}

impl NordPoolPriceSource {
    pub fn new(
        client: NordPoolClient,
        area: impl Into<String>,
        market: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            client,
            area: area.into(),
            market: market.into(),
            currency: currency.into(),
        }
    }

    /// Source for the market selection in `params`
    pub fn from_params(client: NordPoolClient, params: &BatteryStrategyParams) -> Self {
        Self::new(client, &params.area, &params.market, &params.currency)
    }

    pub fn area(&self) -> &str {
        &self.area
    }
}

#[async_trait]
impl PriceDataSource for NordPoolPriceSource {
    async fn read_prices(&self, now: DateTime<Utc>) -> Result<Vec<PriceSlot>> {
        debug!(base_url = self.client.base_url(), area = %self.area, "Reading Nord Pool prices");

        self.client
            .fetch_prices(&self.area, &self.market, &self.currency, now)
            .await
            .with_context(|| format!("Failed to fetch Nord Pool prices for {}", self.area))
    }

    fn name(&self) -> &str {
        "nordpool"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_source_uses_params_selection() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/prices")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("deliveryArea".into(), "EE".into()),
                Matcher::UrlEncoded("market".into(), "DayAhead".into()),
                Matcher::UrlEncoded("currency".into(), "EUR".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "multiAreaEntries": [
                        {"deliveryStart": "2025-03-01T00:00:00Z", "entryPerArea": {"EE": 70.0}}
                    ]
                })
                .to_string(),
            )
            .expect(2)
            .create_async()
            .await;

        let client = NordPoolClient::new(
            format!("{}/prices", server.url()),
            Duration::from_secs(5),
            "spotplan-test",
        )
        .unwrap();
        let params = BatteryStrategyParams {
            area: "EE".to_owned(),
            ..BatteryStrategyParams::default()
        };
        let source = NordPoolPriceSource::from_params(client, &params);

        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let prices = source.read_prices(now).await.unwrap();

        // Both days answered with the same body
        assert_eq!(prices.len(), 2);
        assert_eq!(source.name(), "nordpool");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_source_error_carries_area_context() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/prices")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = NordPoolClient::new(
            format!("{}/prices", server.url()),
            Duration::from_secs(5),
            "spotplan-test",
        )
        .unwrap();
        let source = NordPoolPriceSource::new(client, "LT", "DayAhead", "EUR");

        let err = source.read_prices(Utc::now()).await.unwrap_err();
        let chain = format!("{err:#}");

        assert!(chain.contains("LT"), "{chain}");
        assert!(chain.contains("503"), "{chain}");
    }
}
