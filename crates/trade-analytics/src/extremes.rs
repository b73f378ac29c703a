//! Best/worst day selection and recovery behaviour around drawdown days.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::daily::DailyPnl;

/// How many days each extremum list targets
pub const DEFAULT_TOP_K: usize = 3;

/// Top loss days and top gain days picked from the daily series.
///
/// `losses` holds only strictly negative days, `gains` only strictly
/// positive ones, so a date can never legitimately appear in both;
/// `overlap` records any date that does anyway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeDays {
    pub losses: Vec<DailyPnl>,
    pub gains: Vec<DailyPnl>,
    pub overlap: Vec<NaiveDate>,
}

fn by_pnl_then_date(a: &DailyPnl, b: &DailyPnl) -> std::cmp::Ordering {
    a.total_pnl
        .partial_cmp(&b.total_pnl)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then(a.date.cmp(&b.date))
}

/// Pick the `k` most negative and `k` most positive days.
///
/// When a side has at least `k` candidates the selected days come back
/// in chronological order, matching how the case-study views walk
/// through them. When a side has fewer than `k` candidates, everything
/// available is returned ordered by magnitude instead (worst loss
/// first, biggest gain first).
pub fn select_extremes(daily: &[DailyPnl], k: usize) -> ExtremeDays {
    let mut loss_days: Vec<DailyPnl> = daily
        .iter()
        .filter(|d| d.total_pnl < 0.0)
        .cloned()
        .collect();
    let mut gain_days: Vec<DailyPnl> = daily
        .iter()
        .filter(|d| d.total_pnl > 0.0)
        .cloned()
        .collect();

    loss_days.sort_by(by_pnl_then_date);
    gain_days.sort_by(|a, b| by_pnl_then_date(b, a));

    let losses = if loss_days.len() >= k {
        let mut picked: Vec<DailyPnl> = loss_days.into_iter().take(k).collect();
        picked.sort_by_key(|d| d.date);
        picked
    } else {
        loss_days
    };
    let gains = if gain_days.len() >= k {
        let mut picked: Vec<DailyPnl> = gain_days.into_iter().take(k).collect();
        picked.sort_by_key(|d| d.date);
        picked
    } else {
        gain_days
    };

    let loss_dates: HashSet<NaiveDate> = losses.iter().map(|d| d.date).collect();
    let mut overlap: Vec<NaiveDate> = gains
        .iter()
        .map(|d| d.date)
        .filter(|date| loss_dates.contains(date))
        .collect();
    overlap.sort();
    if !overlap.is_empty() {
        warn!(count = overlap.len(), "extremum lists share dates");
    }

    ExtremeDays {
        losses,
        gains,
        overlap,
    }
}

/// Mean number of calendar days from each selected loss day until the
/// next positive day in the series. Loss days with no later positive
/// day are skipped; 0 if none recovered.
pub fn average_recovery_days(daily: &[DailyPnl], losses: &[DailyPnl]) -> f64 {
    let mut spans = Vec::new();
    for loss in losses {
        let next_green = daily
            .iter()
            .find(|d| d.date > loss.date && d.total_pnl > 0.0);
        if let Some(green) = next_green {
            spans.push((green.date - loss.date).num_days() as f64);
        }
    }
    if spans.is_empty() {
        0.0
    } else {
        spans.iter().sum::<f64>() / spans.len() as f64
    }
}

/// Largest single day-over-day PnL swing upward, as
/// (previous day, next day). None for series shorter than 2 days.
pub fn biggest_rebound(daily: &[DailyPnl]) -> Option<(DailyPnl, DailyPnl)> {
    daily
        .windows(2)
        .max_by(|a, b| {
            let swing_a = a[1].total_pnl - a[0].total_pnl;
            let swing_b = b[1].total_pnl - b[0].total_pnl;
            swing_a
                .partial_cmp(&swing_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|pair| (pair[0].clone(), pair[1].clone()))
}

/// Fraction of days that closed positive, as a percentage.
pub fn profitable_day_ratio(daily: &[DailyPnl]) -> f64 {
    if daily.is_empty() {
        return 0.0;
    }
    let green = daily.iter().filter(|d| d.total_pnl > 0.0).count();
    green as f64 / daily.len() as f64 * 100.0
}
