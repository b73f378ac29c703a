//! Time-based performance: golden hours, best weekdays, monthly
//! calendar, and the hour x weekday heatmap.

use chrono::Weekday;
use dashboard_core::{weekday_name, EnrichedTrade};
use serde::Serialize;

use crate::aggregate::{aggregate_by, PnlStats};

/// Calendar display order for weekday groupings
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyStats {
    /// Hour of day, 0-23
    pub hour: u32,
    pub stats: PnlStats,
}

/// Per-hour stats over observed hours, ascending.
pub fn hourly_stats(trades: &[EnrichedTrade]) -> Vec<HourlyStats> {
    aggregate_by(trades, |t| Some(t.time.hour))
        .into_iter()
        .map(|row| HourlyStats {
            hour: row.key,
            stats: row.stats,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStats {
    pub day: Weekday,
    pub stats: PnlStats,
}

impl WeekdayStats {
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day)
    }
}

/// Per-weekday stats over observed days, in calendar order
/// (Monday..Sunday), not lexical or first-seen order.
pub fn weekday_stats(trades: &[EnrichedTrade]) -> Vec<WeekdayStats> {
    aggregate_by(trades, |t| Some(t.time.weekday.num_days_from_monday()))
        .into_iter()
        .map(|row| WeekdayStats {
            day: WEEKDAYS[row.key as usize],
            stats: row.stats,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    /// "YYYY-MM" bucket; zero-padded, so lexical order is chronological
    pub year_month: String,
    pub stats: PnlStats,
}

pub fn monthly_stats(trades: &[EnrichedTrade]) -> Vec<MonthlyStats> {
    aggregate_by(trades, |t| Some(t.time.year_month.clone()))
        .into_iter()
        .map(|row| MonthlyStats {
            year_month: row.key,
            stats: row.stats,
        })
        .collect()
}

pub fn best_hour(rows: &[HourlyStats]) -> Option<&HourlyStats> {
    rows.iter().max_by(|a, b| {
        a.stats
            .total
            .partial_cmp(&b.stats.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

pub fn worst_hour(rows: &[HourlyStats]) -> Option<&HourlyStats> {
    rows.iter().min_by(|a, b| {
        a.stats
            .total
            .partial_cmp(&b.stats.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

pub fn best_weekday(rows: &[WeekdayStats]) -> Option<&WeekdayStats> {
    rows.iter().max_by(|a, b| {
        a.stats
            .total
            .partial_cmp(&b.stats.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

pub fn worst_weekday(rows: &[WeekdayStats]) -> Option<&WeekdayStats> {
    rows.iter().min_by(|a, b| {
        a.stats
            .total
            .partial_cmp(&b.stats.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// One cell of the hour x weekday performance grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub day: Weekday,
    pub hour: u32,
    pub total_pnl: f64,
}

/// Full 7x24 grid, zero-filled, day-major in calendar order.
pub fn hour_weekday_heatmap(trades: &[EnrichedTrade]) -> Vec<HeatmapCell> {
    let mut grid = [[0.0f64; 24]; 7];
    for trade in trades {
        let day = trade.time.weekday.num_days_from_monday() as usize;
        let hour = trade.time.hour as usize;
        grid[day][hour] += trade.pnl;
    }

    let mut cells = Vec::with_capacity(7 * 24);
    for (day_idx, day) in WEEKDAYS.iter().enumerate() {
        for (hour, total_pnl) in grid[day_idx].iter().enumerate() {
            cells.push(HeatmapCell {
                day: *day,
                hour: hour as u32,
                total_pnl: *total_pnl,
            });
        }
    }
    cells
}
