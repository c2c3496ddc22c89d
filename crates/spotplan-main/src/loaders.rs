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
use spotplan_core::export::prices_from_csv;
use spotplan_types::PriceSlot;
use std::path::PathBuf;
use tracing::debug;

/// Price sequence read from a `timestamp,price_cents` CSV file
///
/// Returns the whole file regardless of `now`; the schedule builder drops
/// past slots itself.
#[derive(Debug, Clone)]
pub struct CsvFilePriceSource {
    path: PathBuf,
    name: String,
}

impl CsvFilePriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("csv:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl PriceDataSource for CsvFilePriceSource {
    async fn read_prices(&self, _now: DateTime<Utc>) -> Result<Vec<PriceSlot>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read price file {}", self.path.display()))?;

        let prices = prices_from_csv(bytes.as_slice())
            .with_context(|| format!("Failed to parse price file {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = prices.len(), "Loaded prices from CSV");
        Ok(prices)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_csv_fixture() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "timestamp,price_cents\n2025-01-15T01:00:00Z,4.25\n2025-01-15T00:00:00Z,3.5\n"
        )
        .unwrap();

        let source = CsvFilePriceSource::new(file.path());
        let prices = source.read_prices(Utc::now()).await.unwrap();

        // File order is preserved
        assert_eq!(prices.len(), 2);
        assert_eq!(
            prices[0].timestamp,
            Utc.with_ymd_and_hms(2025, 1, 15, 1, 0, 0).unwrap()
        );
        assert_eq!(prices[1].price, 3.5);
        assert!(source.name().starts_with("csv:"));
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvFilePriceSource::new(dir.path().join("missing.csv"));

        let err = source.read_prices(Utc::now()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read price file"));
    }
}
