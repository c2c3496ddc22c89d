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
use clap::Parser;
use spotplan_main::cli::{Cli, Commands};
use spotplan_main::commands;
use spotplan_main::config::{AppConfig, ConfigOrigin};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::ExampleConfig => AppConfig::example_toml().to_owned(),
        Commands::Plan(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::run_plan(&config, &args).await?
        }
        Commands::Prices(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::run_prices(&config, &args).await?
        }
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Load configuration, install the log subscriber and validate
fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let (config, origin) = AppConfig::load(path)?;

    // Logs go to stderr, stdout carries the JSON/CSV output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &origin {
        ConfigOrigin::File(path) => info!(path = %path.display(), "Loaded configuration"),
        ConfigOrigin::Defaults => warn!("No configuration file found, using defaults with environment overrides"),
    }

    config.validate()?;
    Ok(config)
}
