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

use spotplan_types::PriceSlot;
use tracing::debug;

/// Resolution assumed when there are not enough slots to measure one
pub const DEFAULT_RESOLUTION_MINUTES: u32 = 60;

/// Infer the typical slot length (minutes) of a price sequence
///
/// Takes the median of the deltas between adjacent slots, in the order given,
/// rounded to the nearest minute. Feeds mixing hourly and 15-minute slots
/// resolve to whichever length dominates.
///
/// Returns [`DEFAULT_RESOLUTION_MINUTES`] for fewer than two slots, and also
/// when the median rounds to zero or less (duplicate timestamps or descending
/// input), so the result is always a usable step.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::integer_division,
    reason = "minute deltas are small, rounded median is checked positive"
)]
pub fn infer_resolution_minutes(prices: &[PriceSlot]) -> u32 {
    if prices.len() < 2 {
        return DEFAULT_RESOLUTION_MINUTES;
    }

    let mut deltas: Vec<f64> = prices
        .windows(2)
        .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64 / 60_000.0)
        .collect();
    deltas.sort_by(f64::total_cmp);

    let mid = deltas.len() / 2;
    let median = if deltas.len().is_multiple_of(2) {
        f64::midpoint(deltas[mid - 1], deltas[mid])
    } else {
        deltas[mid]
    };

    let rounded = median.round();
    if rounded < 1.0 {
        debug!(
            median,
            "Median slot delta is not positive, using default resolution"
        );
        return DEFAULT_RESOLUTION_MINUTES;
    }

    rounded as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 26, 0, 0, 0).unwrap()
    }

    fn spaced(count: i64, minutes: i64) -> Vec<PriceSlot> {
        (0..count)
            .map(|i| PriceSlot::new(base() + Duration::minutes(i * minutes), 5.0))
            .collect()
    }

    #[test]
    fn test_constant_spacing_is_returned_exactly() {
        for minutes in [1, 5, 15, 30, 60, 120] {
            assert_eq!(
                infer_resolution_minutes(&spaced(8, minutes)),
                u32::try_from(minutes).unwrap()
            );
        }
        assert_eq!(infer_resolution_minutes(&spaced(2, 15)), 15);
    }

    #[test]
    fn test_short_sequences_use_default() {
        assert_eq!(infer_resolution_minutes(&[]), 60);
        assert_eq!(infer_resolution_minutes(&spaced(1, 15)), 60);
    }

    #[test]
    fn test_median_ignores_occasional_gap() {
        // 15-minute feed with one missing hour
        let mut prices = spaced(6, 15);
        prices.push(PriceSlot::new(base() + Duration::minutes(150), 5.0));
        assert_eq!(infer_resolution_minutes(&prices), 15);
    }

    #[test]
    fn test_even_count_averages_middle_deltas() {
        // deltas: 15, 15, 60, 60 -> (15 + 60) / 2 = 37.5 -> 38
        let times = [0, 15, 30, 90, 150];
        let prices: Vec<PriceSlot> = times
            .iter()
            .map(|m| PriceSlot::new(base() + Duration::minutes(*m), 1.0))
            .collect();
        assert_eq!(infer_resolution_minutes(&prices), 38);
    }

    #[test]
    fn test_duplicate_timestamps_fall_back_to_default() {
        let prices = vec![PriceSlot::new(base(), 1.0); 4];
        assert_eq!(infer_resolution_minutes(&prices), 60);
    }
}
