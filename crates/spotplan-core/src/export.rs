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

//! Exchange formats for price sequences.
//!
//! CSV: header `timestamp,price_cents`, RFC3339 UTC timestamps, prices with
//! six decimals. JSON: array of `{"timestamp", "price_cents"}` objects.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use spotplan_types::PriceSlot;
use std::io::Read;

const CSV_HEADER: [&str; 2] = ["timestamp", "price_cents"];

#[derive(Debug, Serialize, Deserialize)]
struct PriceRow {
    timestamp: DateTime<Utc>,
    price_cents: f64,
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Two-column CSV export (timestamp + price)
pub fn prices_to_csv(prices: &[PriceSlot]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    for slot in prices {
        writer
            .write_record([format_timestamp(slot.timestamp), format!("{:.6}", slot.price)])
            .with_context(|| format!("Failed to write CSV record for {}", slot.timestamp))?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Read a price sequence back from the CSV export format
pub fn prices_from_csv<R: Read>(reader: R) -> Result<Vec<PriceSlot>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header")?;
    if headers.iter().ne(CSV_HEADER) {
        anyhow::bail!(
            "Unexpected CSV header {:?}, expected {:?}",
            headers.iter().collect::<Vec<_>>(),
            CSV_HEADER
        );
    }

    let mut prices = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx + 2;
        let record = record.with_context(|| format!("Failed to read CSV line {line}"))?;

        let timestamp = record
            .get(0)
            .with_context(|| format!("Missing timestamp on CSV line {line}"))?;
        let price = record
            .get(1)
            .with_context(|| format!("Missing price on CSV line {line}"))?;

        let timestamp = DateTime::parse_from_rfc3339(timestamp.trim())
            .with_context(|| format!("Invalid timestamp '{timestamp}' on CSV line {line}"))?
            .with_timezone(&Utc);
        let price: f64 = price
            .trim()
            .parse()
            .with_context(|| format!("Invalid price '{price}' on CSV line {line}"))?;

        prices.push(PriceSlot::new(timestamp, price));
    }

    Ok(prices)
}

/// JSON array export of a price sequence
pub fn prices_to_json(prices: &[PriceSlot]) -> Result<String> {
    let rows: Vec<PriceRow> = prices
        .iter()
        .map(|slot| PriceRow {
            timestamp: slot.timestamp,
            price_cents: slot.price,
        })
        .collect();

    serde_json::to_string(&rows).context("Failed to serialize prices to JSON")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<PriceSlot> {
        vec![
            PriceSlot::new(Utc.with_ymd_and_hms(2025, 4, 1, 22, 0, 0).unwrap(), 7.125),
            PriceSlot::new(Utc.with_ymd_and_hms(2025, 4, 1, 23, 0, 0).unwrap(), -0.5),
        ]
    }

    #[test]
    fn test_csv_layout() {
        let csv = prices_to_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "timestamp,price_cents");
        assert_eq!(lines[1], "2025-04-01T22:00:00Z,7.125000");
        assert_eq!(lines[2], "2025-04-01T23:00:00Z,-0.500000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_can_be_read_back() {
        let csv = prices_to_csv(&sample()).unwrap();
        let parsed = prices_from_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_csv_reader_accepts_offsets() {
        let csv = "timestamp,price_cents\n2025-04-02T01:00:00+02:00,3.5\n";
        let parsed = prices_from_csv(csv.as_bytes()).unwrap();

        assert_eq!(
            parsed[0].timestamp,
            Utc.with_ymd_and_hms(2025, 4, 1, 23, 0, 0).unwrap()
        );
        assert_eq!(parsed[0].price, 3.5);
    }

    #[test]
    fn test_csv_reader_rejects_bad_rows() {
        let bad_header = "time,price\n2025-04-01T22:00:00Z,1.0\n";
        assert!(prices_from_csv(bad_header.as_bytes()).is_err());

        let bad_price = "timestamp,price_cents\n2025-04-01T22:00:00Z,cheap\n";
        let err = prices_from_csv(bad_price.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_json_rows() {
        let json = prices_to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["timestamp"], "2025-04-01T22:00:00Z");
        assert_eq!(value[0]["price_cents"], 7.125);
        assert_eq!(value.as_array().unwrap().len(), 2);
    }
}
