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

use chrono::Duration;
use spotplan_types::{Interval, PriceSlot};

/// Group selected slots into maximal runs of back-to-back slots
///
/// Two slots belong to the same run only when the later one starts exactly
/// one resolution step after the earlier one. Any gap starts a new run, and
/// a lone slot still yields a one-slot interval.
pub fn group_consecutive_slots(slots: &[PriceSlot], resolution_minutes: u32) -> Vec<Interval> {
    if slots.is_empty() {
        return Vec::new();
    }

    let mut sorted = slots.to_vec();
    sorted.sort_by_key(|slot| slot.timestamp);

    let step = Duration::minutes(i64::from(resolution_minutes));
    let mut intervals = Vec::new();
    let mut run_start = 0;

    for idx in 1..sorted.len() {
        if sorted[idx].timestamp - sorted[idx - 1].timestamp != step {
            intervals.push(summarize_run(&sorted[run_start..idx], step));
            run_start = idx;
        }
    }
    intervals.push(summarize_run(&sorted[run_start..], step));

    intervals
}

/// `run` is never empty
#[expect(
    clippy::cast_precision_loss,
    reason = "run length will never exceed mantissa precision"
)]
fn summarize_run(run: &[PriceSlot], step: Duration) -> Interval {
    let first = run[0];
    let last = run[run.len() - 1];
    let sum: f64 = run.iter().map(|slot| slot.price).sum();

    Interval {
        start: first.timestamp,
        end: last.timestamp + step,
        avg_price: sum / run.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_empty_input_gives_no_intervals() {
        assert!(group_consecutive_slots(&[], 60).is_empty());
    }

    #[test]
    fn test_gap_splits_runs() {
        let slots = vec![
            PriceSlot::new(at(0, 0), 1.0),
            PriceSlot::new(at(1, 0), 2.0),
            PriceSlot::new(at(2, 0), 3.0),
            PriceSlot::new(at(5, 0), 7.0),
        ];

        let intervals = group_consecutive_slots(&slots, 60);

        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].start, at(0, 0));
        assert_eq!(intervals[0].end, at(3, 0));
        assert_eq!(intervals[0].avg_price, 2.0);
        assert_eq!(intervals[1].start, at(5, 0));
        assert_eq!(intervals[1].end, at(6, 0));
        assert_eq!(intervals[1].avg_price, 7.0);
    }

    #[test]
    fn test_single_missing_slot_breaks_run() {
        let slots = vec![
            PriceSlot::new(at(10, 0), 4.0),
            PriceSlot::new(at(10, 15), 4.0),
            PriceSlot::new(at(10, 45), 4.0),
        ];

        let intervals = group_consecutive_slots(&slots, 15);

        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].end, at(10, 30));
        assert_eq!(intervals[1].start, at(10, 45));
        assert_eq!(intervals[1].end, at(11, 0));
    }

    #[test]
    fn test_unordered_input_is_sorted_first() {
        let slots = vec![
            PriceSlot::new(at(2, 0), 3.0),
            PriceSlot::new(at(0, 0), 1.0),
            PriceSlot::new(at(1, 0), 2.0),
        ];

        let intervals = group_consecutive_slots(&slots, 60);

        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start, at(0, 0));
        assert_eq!(intervals[0].end, at(3, 0));
    }
}
