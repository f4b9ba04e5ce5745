use std::io::{self, Write};

use serde::Serialize;

use shankh_core::FinancialSnapshot;

use crate::cli::OutputFormat;
use crate::commands::{Report, SearchReport, Section, SelectionReport};
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = match report {
                Report::Selection(selection) => to_json(selection, pretty)?,
                Report::Search(search) => to_json(search, pretty)?,
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => {
            let lines = match report {
                Report::Selection(selection) => selection_lines(selection),
                Report::Search(search) => search_lines(search),
            };
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }
    }

    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(payload)
}

fn selection_lines(report: &SelectionReport) -> Vec<String> {
    let mut lines = vec![
        format!("ticker      : {}", report.ticker),
        format!("as_of       : {}", report.as_of),
    ];

    lines.push(String::from("chart:"));
    match &report.chart {
        Section::Loaded { data } => {
            lines.push(format!(
                "  window {} ({} of {} points)",
                data.window,
                data.points.len(),
                data.total_points
            ));
            if let Some(close) = data.last_close {
                lines.push(format!("  last close  : {close:.2}"));
            }
            for point in &data.points {
                lines.push(format!(
                    "  {:<7} O {:>10.2}  H {:>10.2}  L {:>10.2}  C {:>10.2}  {}",
                    point.label,
                    point.open,
                    point.high,
                    point.low,
                    point.close,
                    if point.is_up { "▲" } else { "▼" }
                ));
            }
        }
        Section::Failed { message, .. } => lines.push(format!("  unavailable: {message}")),
    }

    lines.push(String::from("prediction:"));
    match &report.prediction {
        Section::Loaded { data } => {
            lines.push(format!("  previous    : ₹{:.2}", data.previous_close));
            lines.push(format!("  predicted   : ₹{:.2}", data.predicted_close));
            if let Some(percent) = data.percent_change {
                lines.push(format!("  change      : {percent:+.2}%"));
            }
            lines.push(format!("  trend       : {}", data.trend));
        }
        Section::Failed { message, .. } => lines.push(format!("  unavailable: {message}")),
    }

    lines.push(String::from("sentiment:"));
    match &report.sentiment {
        Section::Loaded { data } => {
            lines.push(format!(
                "  {} (score {:.2}, gauge {:+})",
                data.trend, data.score, data.gauge
            ));
            if let Some(message) = &data.message {
                lines.push(format!("  note        : {message}"));
            }
            for tweet in &data.tweets {
                lines.push(format!("  - {}: {}", tweet.author, single_line(&tweet.text)));
            }
        }
        Section::Failed { message, .. } => lines.push(format!("  unavailable: {message}")),
    }

    lines.push(String::from("financials:"));
    match &report.financials {
        Section::Loaded { data } => lines.extend(financial_lines(data)),
        Section::Failed { message, .. } => lines.push(format!("  unavailable: {message}")),
    }

    if !report.failures.is_empty() {
        lines.push(String::from("errors:"));
        for failure in &report.failures {
            lines.push(format!("  - {}: {}", failure.code, failure.summary));
        }
    }

    lines
}

fn financial_lines(snapshot: &FinancialSnapshot) -> Vec<String> {
    let amounts = [
        ("Total Revenue", snapshot.total_revenue),
        ("Net Income", snapshot.net_income),
        ("Gross Profit", snapshot.gross_profit),
        ("EBITDA", snapshot.ebitda),
        ("Operating Income", snapshot.operating_income),
        ("Operating Expense", snapshot.operating_expense),
        ("Pretax Income", snapshot.pretax_income),
        ("Tax Provision", snapshot.tax_provision),
        ("Interest Expense", snapshot.interest_expense),
    ];
    let per_share = [
        ("Diluted EPS", snapshot.diluted_eps),
        ("Basic EPS", snapshot.basic_eps),
    ];

    let mut lines: Vec<String> = amounts
        .iter()
        .map(|(label, value)| format!("  {label:<18}: {}", value.map_or_else(na, format_inr)))
        .collect();
    lines.extend(per_share.iter().map(|(label, value)| {
        format!(
            "  {label:<18}: {}",
            value.map_or_else(na, |eps| format!("₹{eps:.2}"))
        )
    }));
    lines.push(format!(
        "  {:<18}: {}",
        "Report Date",
        snapshot.report_date.clone().unwrap_or_else(na)
    ));
    lines
}

fn search_lines(report: &SearchReport) -> Vec<String> {
    if report.results.is_empty() {
        return vec![format!("no matches for '{}'", report.query)];
    }
    report
        .results
        .iter()
        .map(|entry| format!("{:<14} {}", entry.ticker, entry.name))
        .collect()
}

fn na() -> String {
    String::from("n/a")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rupee amount abbreviated to T (1e9), C (crore) or L (lakh); smaller
/// values use Indian digit grouping.
pub fn format_inr(value: f64) -> String {
    if value >= 1_00_00_00_000.0 {
        format!("₹{:.2}T", value / 1_00_00_00_000.0)
    } else if value >= 1_00_00_000.0 {
        format!("₹{:.2}C", value / 1_00_00_000.0)
    } else if value >= 1_00_000.0 {
        format!("₹{:.2}L", value / 1_00_000.0)
    } else {
        format!("₹{}", group_indian(value))
    }
}

fn group_indian(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if whole.len() <= 3 {
        whole.to_owned()
    } else {
        let (head, tail) = whole.split_at(whole.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{tail}", groups.join(","))
    };

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}
