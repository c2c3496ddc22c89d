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
use clap::{Args, Parser, Subcommand};
use spotplan_types::BatteryStrategyParams;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "spotplan",
    version,
    about = "Plan battery charge/discharge slots from day-ahead spot prices",
    long_about = "Fetch Nord Pool day-ahead prices and pick the cheapest slots to charge\n\
    and the most expensive slots to discharge a home battery.\n\
    \nSettings come from spotplan.toml (or --config), SPOTPLAN_* environment\n\
    variables and command line flags, in increasing order of precedence.\n\
    \nExamples:\n  \
    spotplan plan                              # Plan for the default area\n  \
    spotplan plan --area EE --output table     # Human readable summary\n  \
    spotplan prices --format csv > prices.csv  # Export the price sequence\n  \
    spotplan plan --from-csv prices.csv --now 2025-01-15T00:00:00Z"
)]
pub struct Cli {
    /// Configuration file (defaults to ./spotplan.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a charge/discharge schedule
    #[command(
        long_about = "Load prices for today and tomorrow and build a charge/discharge schedule.\n\
        \nData Sources (choose one):\n  \
        - Nord Pool data portal (default)\n  \
        - CSV fixture: --from-csv <path> (timestamp,price_cents)\n\
        \nExamples:\n  \
        spotplan plan --max-charge-hours 4 --epsilon 1.5\n  \
        spotplan plan --output table --include-prices"
    )]
    Plan(PlanArgs),

    /// Export the price sequence as CSV or JSON
    Prices(PricesArgs),

    /// Print an example configuration file
    ExampleConfig,
}

/// Market selection shared by all commands that fetch prices
#[derive(Debug, Clone, Default, Args)]
pub struct MarketArgs {
    /// Delivery area code (e.g. LV, EE, LT, FI, SE3)
    #[arg(long)]
    pub area: Option<String>,

    /// Market name passed to the data portal
    #[arg(long)]
    pub market: Option<String>,

    /// Price currency
    #[arg(long)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct StrategyArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Maximum hours of charging
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true)]
    pub max_charge_hours: Option<f64>,

    /// Maximum hours of discharging
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true)]
    pub max_discharge_hours: Option<f64>,

    /// Reference price the battery was last charged at (c/kWh)
    #[arg(long, value_name = "CENTS", allow_negative_numbers = true)]
    pub last_price_charged: Option<f64>,

    /// Required price margin below the reference price (c/kWh)
    #[arg(long, value_name = "CENTS", allow_negative_numbers = true)]
    pub epsilon: Option<f64>,
}

#[derive(Debug, Parser)]
pub struct PlanArgs {
    #[command(flatten)]
    pub strategy: StrategyArgs,

    /// Read prices from a CSV file instead of Nord Pool
    #[arg(long, value_name = "PATH")]
    pub from_csv: Option<PathBuf>,

    /// Planning time (RFC3339), defaults to the current time
    #[arg(long, value_name = "RFC3339", value_parser = parse_timestamp)]
    pub now: Option<DateTime<Utc>>,

    /// Output format: json or table
    #[arg(long, default_value = "json", value_parser = ["json", "table"])]
    pub output: String,

    /// Include the full price sequence in JSON output
    #[arg(long, default_value_t = false)]
    pub include_prices: bool,
}

#[derive(Debug, Parser)]
pub struct PricesArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Read prices from a CSV file instead of Nord Pool
    #[arg(long, value_name = "PATH")]
    pub from_csv: Option<PathBuf>,

    /// Reference time for the today/tomorrow window (RFC3339)
    #[arg(long, value_name = "RFC3339", value_parser = parse_timestamp)]
    pub now: Option<DateTime<Utc>>,

    /// Export format: csv or json
    #[arg(long, default_value = "csv", value_parser = ["csv", "json"])]
    pub format: String,
}

impl MarketArgs {
    pub fn apply_to(&self, params: &mut BatteryStrategyParams) {
        if let Some(area) = &self.area {
            params.area.clone_from(area);
        }
        if let Some(market) = &self.market {
            params.market.clone_from(market);
        }
        if let Some(currency) = &self.currency {
            params.currency.clone_from(currency);
        }
    }
}

impl StrategyArgs {
    /// Override `params` with every flag that was given
    pub fn apply_to(&self, params: &mut BatteryStrategyParams) {
        self.market.apply_to(params);

        if let Some(hours) = self.max_charge_hours {
            params.max_charge_hours = hours;
        }
        if let Some(hours) = self.max_discharge_hours {
            params.max_discharge_hours = hours;
        }
        if let Some(price) = self.last_price_charged {
            params.last_price_charged = price;
        }
        if let Some(epsilon) = self.epsilon {
            params.epsilon = epsilon;
        }
    }
}

/// Parse an RFC3339 timestamp into UTC
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}
