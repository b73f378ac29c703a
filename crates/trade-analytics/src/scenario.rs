//! What-if simulation: rerun history with a subset of trades removed and
//! compare against what actually happened.

use dashboard_core::{EnrichedTrade, FilterConfig};
use serde::Serialize;
use tracing::info;

/// Headline metrics for one run of history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioMetrics {
    pub total_pnl: f64,
    pub trade_count: usize,
    pub avg_pnl: f64,
    /// Percentage of trades with positive PnL
    pub win_rate: f64,
}

impl ScenarioMetrics {
    fn from_pnls(pnls: &[f64]) -> Self {
        let trade_count = pnls.len();
        let total_pnl: f64 = pnls.iter().sum();
        let (avg_pnl, win_rate) = if trade_count > 0 {
            let wins = pnls.iter().filter(|p| **p > 0.0).count();
            (
                total_pnl / trade_count as f64,
                wins as f64 / trade_count as f64 * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            total_pnl,
            trade_count,
            avg_pnl,
            win_rate,
        }
    }
}

/// Actual history next to the filtered what-if, with the deltas the
/// comparison view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub actual: ScenarioMetrics,
    pub hypothetical: ScenarioMetrics,
    pub pnl_delta: f64,
    pub trades_removed: usize,
    pub win_rate_delta: f64,
}

/// Replay history keeping only trades the filter accepts.
pub fn simulate(trades: &[EnrichedTrade], filter: &FilterConfig) -> ScenarioComparison {
    let actual_pnls: Vec<f64> = trades.iter().map(|t| t.pnl).collect();
    let kept_pnls: Vec<f64> = filter.apply(trades).map(|t| t.pnl).collect();

    let actual = ScenarioMetrics::from_pnls(&actual_pnls);
    let hypothetical = ScenarioMetrics::from_pnls(&kept_pnls);

    let comparison = ScenarioComparison {
        pnl_delta: hypothetical.total_pnl - actual.total_pnl,
        trades_removed: actual.trade_count - hypothetical.trade_count,
        win_rate_delta: hypothetical.win_rate - actual.win_rate,
        actual,
        hypothetical,
    };
    info!(
        removed = comparison.trades_removed,
        pnl_delta = comparison.pnl_delta,
        "scenario simulated"
    );
    comparison
}
