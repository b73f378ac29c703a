//! Holding-duration analyses: how long positions stay open and which
//! hold lengths actually pay.

use dashboard_core::{DurationCategory, EnrichedTrade};
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{aggregate_with_categories, group_values, PnlStats};

/// Fine-grained hold-time ranges, in hours. Upper bounds are exclusive.
pub const HOLD_BUCKETS: [(&str, f64, f64); 7] = [
    ("< 1h", 0.0, 1.0),
    ("1-4h", 1.0, 4.0),
    ("4-12h", 4.0, 12.0),
    ("12-24h", 12.0, 24.0),
    ("1-3d", 24.0, 72.0),
    ("3-7d", 72.0, 168.0),
    ("> 7d", 168.0, f64::INFINITY),
];

/// Central tendency of hold times over trades with a known duration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingSummary {
    /// Trades carrying a parsed hold duration
    pub known_count: usize,
    pub avg_hours: f64,
    pub median_hours: f64,
}

pub fn holding_summary(trades: &[EnrichedTrade]) -> HoldingSummary {
    let mut hours: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.holding.as_ref().and_then(|h| h.hours))
        .filter(|h| *h >= 0.0)
        .collect();

    if hours.is_empty() {
        debug!("no trades with a known hold duration");
        return HoldingSummary {
            known_count: 0,
            avg_hours: 0.0,
            median_hours: 0.0,
        };
    }

    hours.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let count = hours.len();
    let avg_hours = hours.iter().sum::<f64>() / count as f64;
    let median_hours = if count % 2 == 1 {
        hours[count / 2]
    } else {
        (hours[count / 2 - 1] + hours[count / 2]) / 2.0
    };

    HoldingSummary {
        known_count: count,
        avg_hours,
        median_hours,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldBucketStats {
    pub label: &'static str,
    pub stats: PnlStats,
}

/// PnL by fine-grained hold-time range; buckets with no trades are
/// skipped. Trades without a known duration never enter any bucket.
pub fn by_bucket(trades: &[EnrichedTrade]) -> Vec<HoldBucketStats> {
    let groups = group_values(
        trades,
        |t| {
            let hours = t.holding.as_ref().and_then(|h| h.hours)?;
            HOLD_BUCKETS
                .iter()
                .position(|(_, lo, hi)| hours >= *lo && hours < *hi)
        },
        |t| t.pnl,
    );

    groups
        .into_iter()
        .map(|(idx, values)| HoldBucketStats {
            label: HOLD_BUCKETS[idx].0,
            stats: PnlStats::from_values(&values),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: DurationCategory,
    pub stats: PnlStats,
}

/// PnL per duration category, exhaustive and zero-filled so every
/// category shows up in display order even with no trades.
pub fn by_category(trades: &[EnrichedTrade]) -> Vec<CategoryStats> {
    aggregate_with_categories(trades, &DurationCategory::ALL, |t| {
        Some(
            t.holding
                .as_ref()
                .map(|h| h.category)
                .unwrap_or(DurationCategory::Unknown),
        )
    })
    .into_iter()
    .map(|row| CategoryStats {
        category: row.key,
        stats: row.stats,
    })
    .collect()
}

/// Category with the highest mean PnL, among categories that actually
/// have trades.
pub fn most_profitable_category(rows: &[CategoryStats]) -> Option<&CategoryStats> {
    rows.iter().filter(|r| r.stats.count > 0).max_by(|a, b| {
        a.stats
            .mean
            .partial_cmp(&b.stats.mean)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
