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

//! Wire format of the data portal `DayAheadPrices` endpoint.
//!
//! Only `multiAreaEntries` is needed for scheduling; the rest is kept so a
//! response can be logged and inspected as a whole.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayAheadResponse {
    #[serde(rename = "deliveryDateCET")]
    pub delivery_date_cet: String,
    pub version: i64,
    pub updated_at: String,
    pub delivery_areas: Vec<String>,
    pub market: String,
    pub currency: String,
    pub exchange_rate: f64,
    pub area_averages: Vec<AreaAverage>,
    pub multi_area_entries: Vec<MultiAreaEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AreaAverage {
    pub area_code: String,
    pub price: f64,
}

/// One delivery period with a price per requested area (EUR/MWh)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiAreaEntry {
    /// RFC3339, parsed leniently by the client
    pub delivery_start: String,
    pub delivery_end: String,
    pub entry_per_area: HashMap<String, f64>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_parse_portal_response() {
        let body = r#"{
            "deliveryDateCET": "2025-01-15",
            "version": 3,
            "updatedAt": "2025-01-14T12:49:28.7Z",
            "deliveryAreas": ["LV"],
            "market": "DayAhead",
            "currency": "EUR",
            "exchangeRate": 1,
            "areaAverages": [{"areaCode": "LV", "price": 98.12}],
            "multiAreaEntries": [
                {
                    "deliveryStart": "2025-01-14T23:00:00Z",
                    "deliveryEnd": "2025-01-15T00:00:00Z",
                    "entryPerArea": {"LV": 85.3}
                }
            ]
        }"#;

        let response: DayAheadResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.delivery_date_cet, "2025-01-15");
        assert_eq!(response.area_averages[0].area_code, "LV");
        assert_eq!(response.multi_area_entries.len(), 1);
        assert_eq!(response.multi_area_entries[0].entry_per_area["LV"], 85.3);
    }

    #[test]
    fn test_missing_fields_default() {
        let response: DayAheadResponse = serde_json::from_str("{}").unwrap();
        assert!(response.multi_area_entries.is_empty());
    }
}
