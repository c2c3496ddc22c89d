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
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};
use spotplan_core::{Plan, capped_discharge_threshold};
use spotplan_types::{Interval, PriceSlot, Schedule};

/// Formatter for pretty-printed JSON
#[derive(Debug)]
pub struct JsonFormatter;

/// Formatter for interval summary tables
#[derive(Debug)]
pub struct TableFormatter;

impl JsonFormatter {
    pub fn format_schedule(schedule: &Schedule) -> Result<String> {
        serde_json::to_string_pretty(schedule).context("Failed to serialize schedule")
    }

    /// Schedule plus the price sequence it was built from
    pub fn format_plan(plan: &Plan) -> Result<String> {
        serde_json::to_string_pretty(plan).context("Failed to serialize plan")
    }
}

impl TableFormatter {
    /// Format charge and discharge intervals in time order
    pub fn format_schedule(schedule: &Schedule) -> String {
        let mut output = String::new();

        let resolution = schedule
            .resolution_minutes
            .map_or_else(|| "-".to_owned(), |minutes| format!("{minutes} min"));
        let threshold = capped_discharge_threshold(schedule.last_price_charged, schedule.epsilon);
        output.push_str(&format!(
            "Area: {} | Resolution: {} | Charge below: {:.2} c/kWh | Discharge from: {:.2} c/kWh\n",
            schedule.area,
            resolution,
            schedule.last_price_charged - schedule.epsilon,
            threshold
        ));

        if schedule.charge_intervals.is_empty() && schedule.discharge_intervals.is_empty() {
            output.push_str("No charge or discharge slots selected\n");
            return output;
        }

        let mut rows: Vec<(&'static str, &Interval, usize)> = schedule
            .charge_intervals
            .iter()
            .map(|interval| ("Charge", interval, slots_in(interval, &schedule.charge_slots)))
            .chain(schedule.discharge_intervals.iter().map(|interval| {
                ("Discharge", interval, slots_in(interval, &schedule.discharge_slots))
            }))
            .collect();
        rows.sort_by_key(|(_, interval, _)| interval.start);

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Action").add_attribute(Attribute::Bold),
            Cell::new("Start (UTC)").add_attribute(Attribute::Bold),
            Cell::new("End (UTC)").add_attribute(Attribute::Bold),
            Cell::new("Slots").add_attribute(Attribute::Bold),
            Cell::new("Avg Price\n(c/kWh)").add_attribute(Attribute::Bold),
        ]);

        for (action, interval, slots) in rows {
            let color = if action == "Charge" {
                Color::Green
            } else {
                Color::Yellow
            };
            table.add_row(vec![
                Cell::new(action).fg(color),
                Cell::new(interval.start.format("%Y-%m-%d %H:%M")),
                Cell::new(interval.end.format("%Y-%m-%d %H:%M")),
                Cell::new(slots),
                Cell::new(format!("{:.2}", interval.avg_price)),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Charge: {} slots in {} intervals | Discharge: {} slots in {} intervals\n",
            schedule.charge_slots.len(),
            schedule.charge_intervals.len(),
            schedule.discharge_slots.len(),
            schedule.discharge_intervals.len()
        ));

        output
    }
}

fn slots_in(interval: &Interval, slots: &[PriceSlot]) -> usize {
    slots
        .iter()
        .filter(|slot| slot.timestamp >= interval.start && slot.timestamp < interval.end)
        .count()
}
