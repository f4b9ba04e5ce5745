//! Series windowing and chart normalization.
//!
//! Everything here is a pure function of its inputs. The reference date is
//! always passed in by the caller so results never depend on the wall clock.

use serde::Serialize;
use time::{Date, Month};

use crate::{iso_date, PricePoint, PriceSeries, TimeWindow};

/// Chart-ready view of one price point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Short axis label such as `Mar 5`.
    pub label: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub is_up: bool,
}

/// Earliest date kept by `range` relative to `now`.
///
/// The day the calendar offset lands on is itself outside the window, so
/// `1M` on 2025-08-31 keeps 2025-08-01 onward: at most 31 daily points
/// within the trailing 30 days.
///
/// Returns `None` when the window keeps all history, or when the cutoff falls
/// outside the representable date range.
pub fn cutoff(range: TimeWindow, now: Date) -> Option<Date> {
    range
        .months()
        .and_then(|months| months_before(now, months))
        .and_then(Date::next_day)
}

/// Points of `series` dated on or after the window's cutoff, in source order.
pub fn window(series: &PriceSeries, range: TimeWindow, now: Date) -> PriceSeries {
    let points = match cutoff(range, now) {
        Some(cutoff) => series
            .points
            .iter()
            .filter(|point| point.date >= cutoff)
            .cloned()
            .collect(),
        None => series.points.clone(),
    };

    PriceSeries {
        ticker: series.ticker.clone(),
        status: series.status.clone(),
        points,
    }
}

pub fn chart_points(series: &PriceSeries) -> Vec<ChartPoint> {
    series.points.iter().map(to_chart_point).collect()
}

/// Close of the final point, shown next to the chart title.
pub fn last_close(series: &PriceSeries) -> Option<f64> {
    series.points.last().map(|point| point.close)
}

fn to_chart_point(point: &PricePoint) -> ChartPoint {
    ChartPoint {
        label: axis_label(point.date),
        date: point.date,
        open: point.open,
        high: point.high,
        low: point.low,
        close: point.close,
        volume: point.volume,
        is_up: point.close >= point.open,
    }
}

fn axis_label(date: Date) -> String {
    format!("{} {}", month_abbrev(date.month()), date.day())
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Calendar subtraction that clamps the day to the target month's length.
fn months_before(date: Date, months: u32) -> Option<Date> {
    let total = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months as i32;
    let year = total.div_euclid(12);
    let month = Month::try_from((total.rem_euclid(12) + 1) as u8).ok()?;
    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).ok()
}
