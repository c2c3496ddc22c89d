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

use chrono::NaiveDate;
use thiserror::Error;

/// Nord Pool data portal error types
#[derive(Error, Debug)]
pub enum NordPoolError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Nord Pool API returned status {status} for {date}")]
    ApiError { date: NaiveDate, status: u16 },

    #[error("Invalid response for {date}: {reason}")]
    InvalidResponse { date: NaiveDate, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type NordPoolResult<T> = Result<T, NordPoolError>;
