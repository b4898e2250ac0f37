//! Report generation
//!
//! Renders item tables, the progress curve and the status summary as plain
//! text or JSON.

use crate::config::OutputFormat;
use action_plan_engine::{
    ActionItem, AlertLevel, Assessment, IsoWeek, Locale, ProgressCurve, Status, Summary,
};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

const RULE: &str = "═══════════════════════════════════════════════";

/// An item together with what was derived for it
#[derive(Debug, Serialize)]
pub struct ItemRow<'a> {
    #[serde(flatten)]
    pub item: &'a ActionItem,
    pub alert: AlertLevel,
    pub planned_week: Option<IsoWeek>,
}

impl<'a> ItemRow<'a> {
    pub fn new(item: &'a ActionItem, assessment: Assessment) -> Self {
        Self {
            item,
            alert: assessment.alert,
            planned_week: assessment.planned_week,
        }
    }
}

/// Everything the summary command shows
#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    pub reference: NaiveDate,
    pub summary: Summary,
    pub by_status: BTreeMap<Status, usize>,
    pub by_area: BTreeMap<String, BTreeMap<Status, usize>>,
    pub most_overdue: Vec<&'a ActionItem>,
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render rows as a fixed-width table
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&table_line(headers.iter().copied(), &widths));
    let separator: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&separator.join("─┼─"));
    out.push('\n');
    for row in rows {
        out.push_str(&table_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let mut line = padded.join(" │ ").trim_end().to_string();
    line.push('\n');
    line
}

/// Render the item table
pub fn render_items(rows: &[ItemRow<'_>], format: OutputFormat, locale: Locale) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&rows);
    }
    if rows.is_empty() {
        return Ok("No records.\n".to_string());
    }

    let headers = [
        "ID", "Area", "Location", "Action", "Responsible", "Plan start", "Plan end",
        "Actual end", "Resched. end", "Week", "Status", "Alert",
    ];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let item = row.item;
            vec![
                item.id.to_string(),
                item.area.clone(),
                item.location.clone(),
                item.action.clone(),
                item.responsible.clone(),
                fmt_date(item.planned_start),
                fmt_date(item.planned_end),
                fmt_date(item.actual_end),
                fmt_date(item.rescheduled_end),
                row.planned_week.map(|w| w.to_string()).unwrap_or_default(),
                locale.label(item.status).to_string(),
                locale.alert_label(row.alert).to_string(),
            ]
        })
        .collect();

    Ok(table(&headers, &cells))
}

/// Render the cumulative progress curve
pub fn render_progress(
    curve: Option<&ProgressCurve>,
    reference: NaiveDate,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&curve);
    }
    let Some(curve) = curve else {
        return Ok("Planned start or end dates are not available; no progress curve.\n".to_string());
    };

    let mut out = String::new();
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  Progress curve (planned vs actual vs rescheduled)")?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Planned completions as of {}: {}\n",
        fmt_date(Some(reference)),
        curve.planned_at_reference
    )?;

    let cells: Vec<Vec<String>> = curve
        .dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let marker = if *date == reference { "◀ today" } else { "" };
            vec![
                fmt_date(Some(*date)),
                curve.planned[i].to_string(),
                curve.actual[i].to_string(),
                curve.rescheduled[i].to_string(),
                marker.to_string(),
            ]
        })
        .collect();
    out.push_str(&table(&["Date", "Planned", "Actual", "Rescheduled", ""], &cells));
    Ok(out)
}

/// Render headline figures, distributions and the overdue list
pub fn render_summary(report: &SummaryReport<'_>, format: OutputFormat, locale: Locale) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(report);
    }

    let s = &report.summary;
    let mut out = String::new();
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  Action plan summary ({})", fmt_date(Some(report.reference)))?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  Total:          {}", s.total)?;
    writeln!(out, "  Completed:      {:.0}%", s.completed_pct)?;
    writeln!(out, "  Late:           {:.0}%", s.late_pct)?;
    writeln!(out, "  With impact:    {:.0}%", s.with_impact_pct)?;
    writeln!(out, "  Without impact: {:.0}%", s.without_impact_pct)?;

    writeln!(out, "\nBy status:")?;
    for (status, count) in &report.by_status {
        writeln!(out, "  {:<14} {}", locale.label(*status), count)?;
    }

    writeln!(out, "\nBy area:")?;
    for (area, counts) in &report.by_area {
        let breakdown = counts
            .iter()
            .map(|(status, count)| format!("{}: {}", locale.label(*status), count))
            .collect::<Vec<_>>()
            .join(", ");
        let total: usize = counts.values().sum();
        writeln!(out, "  {:<16} {:>3}  ({})", area, total, breakdown)?;
    }

    writeln!(out, "\nMost overdue:")?;
    if report.most_overdue.is_empty() {
        writeln!(out, "  No late records.")?;
    }
    for item in &report.most_overdue {
        writeln!(
            out,
            "  #{:<4} {:<16} {:<30} planned end {}",
            item.id,
            item.area,
            item.action,
            fmt_date(item.planned_end)
        )?;
    }
    Ok(out)
}
