//! Generic groupby/reduce layer: one pass per grouping, several
//! statistics at once.

use std::collections::BTreeMap;

use dashboard_core::EnrichedTrade;
use serde::Serialize;

/// Multi-statistic reduction of a group's PnL values, computed in a
/// single pass over the group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlStats {
    pub total: f64,
    pub mean: f64,
    pub count: usize,
    /// Sample standard deviation; 0 for groups with fewer than 2 rows
    pub std_dev: f64,
    pub wins: usize,
    /// Percentage of rows with positive PnL; 0 for empty groups
    pub win_rate: f64,
}

impl PnlStats {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self::empty();
        }

        let total: f64 = values.iter().sum();
        let mean = total / count as f64;
        let wins = values.iter().filter(|v| **v > 0.0).count();
        let win_rate = wins as f64 / count as f64 * 100.0;

        let std_dev = if count > 1 {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / (count as f64 - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        Self {
            total,
            mean,
            count,
            std_dev,
            wins,
            win_rate,
        }
    }

    /// Stats for a category with zero rows; every ratio resolves to 0.
    pub fn empty() -> Self {
        Self {
            total: 0.0,
            mean: 0.0,
            count: 0,
            std_dev: 0.0,
            wins: 0,
            win_rate: 0.0,
        }
    }
}

/// One output row of a grouping: the key plus its reduced statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow<K> {
    pub key: K,
    pub stats: PnlStats,
}

/// Group an arbitrary value column by an arbitrary key. Rows where the
/// key function returns `None` drop out of this grouping only. Output
/// order follows the key type's `Ord`, which is how categoricals with a
/// fixed custom order (weekdays, duration buckets) sort correctly.
pub fn group_values<K, KF, VF>(
    trades: &[EnrichedTrade],
    key_fn: KF,
    value_fn: VF,
) -> BTreeMap<K, Vec<f64>>
where
    K: Ord,
    KF: Fn(&EnrichedTrade) -> Option<K>,
    VF: Fn(&EnrichedTrade) -> f64,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for trade in trades {
        if let Some(key) = key_fn(trade) {
            groups.entry(key).or_default().push(value_fn(trade));
        }
    }
    groups
}

/// Group trade PnL by key; empty groups are omitted.
pub fn aggregate_by<K, KF>(trades: &[EnrichedTrade], key_fn: KF) -> Vec<AggregateRow<K>>
where
    K: Ord,
    KF: Fn(&EnrichedTrade) -> Option<K>,
{
    group_values(trades, key_fn, |t| t.pnl)
        .into_iter()
        .map(|(key, values)| AggregateRow {
            key,
            stats: PnlStats::from_values(&values),
        })
        .collect()
}

/// Exhaustive variant: one row per requested category, in the given
/// order, zero-filled where no trades match.
pub fn aggregate_with_categories<K, KF>(
    trades: &[EnrichedTrade],
    categories: &[K],
    key_fn: KF,
) -> Vec<AggregateRow<K>>
where
    K: Ord + Clone,
    KF: Fn(&EnrichedTrade) -> Option<K>,
{
    let mut groups = group_values(trades, key_fn, |t| t.pnl);
    categories
        .iter()
        .map(|category| AggregateRow {
            key: category.clone(),
            stats: groups
                .remove(category)
                .map(|values| PnlStats::from_values(&values))
                .unwrap_or_else(PnlStats::empty),
        })
        .collect()
}
