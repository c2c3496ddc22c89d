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
use chrono::Utc;
use spotplan_core::PriceDataSource;
use spotplan_core::export::{prices_to_csv, prices_to_json};
use spotplan_nordpool::NordPoolPriceSource;
use spotplan_types::BatteryStrategyParams;
use std::path::Path;
use tracing::info;

use crate::cli::{PlanArgs, PricesArgs};
use crate::config::AppConfig;
use crate::formatters::{JsonFormatter, TableFormatter};
use crate::loaders::CsvFilePriceSource;

/// CSV fixture when given, the Nord Pool portal otherwise
pub fn price_source(
    config: &AppConfig,
    params: &BatteryStrategyParams,
    from_csv: Option<&Path>,
) -> Result<Box<dyn PriceDataSource>> {
    if let Some(path) = from_csv {
        return Ok(Box::new(CsvFilePriceSource::new(path)));
    }

    let client = config.nordpool.client()?;
    Ok(Box::new(NordPoolPriceSource::from_params(client, params)))
}

/// Run `spotplan plan` and return the rendered output
pub async fn run_plan(config: &AppConfig, args: &PlanArgs) -> Result<String> {
    let mut params = config.strategy.clone();
    args.strategy.apply_to(&mut params);

    let now = args.now.unwrap_or_else(Utc::now);
    let source = price_source(config, &params, args.from_csv.as_deref())?;
    let plan = spotplan_core::plan(source.as_ref(), &params, now).await?;

    if plan.schedule.resolution_minutes.is_none() {
        info!(%now, "All prices are in the past, nothing to schedule");
    }

    match args.output.as_str() {
        "table" => Ok(TableFormatter::format_schedule(&plan.schedule)),
        _ if args.include_prices => JsonFormatter::format_plan(&plan),
        _ => JsonFormatter::format_schedule(&plan.schedule),
    }
}

/// Run `spotplan prices` and return the exported price sequence
pub async fn run_prices(config: &AppConfig, args: &PricesArgs) -> Result<String> {
    let mut params = config.strategy.clone();
    args.market.apply_to(&mut params);

    let now = args.now.unwrap_or_else(Utc::now);
    let source = price_source(config, &params, args.from_csv.as_deref())?;
    let prices = source.read_prices(now).await?;

    if prices.is_empty() {
        bail!("No prices returned by {} for {}", source.name(), params.area);
    }
    info!(source = source.name(), count = prices.len(), "Exporting prices");

    match args.format.as_str() {
        "json" => prices_to_json(&prices),
        _ => prices_to_csv(&prices),
    }
}
