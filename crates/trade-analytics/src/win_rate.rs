//! Win rate and risk/reward metrics: does the strategy have a
//! mathematical edge?

use serde::Serialize;

/// Win/loss breakdown with risk/reward ratios.
///
/// `avg_loss` and `gross_loss` keep their sign (negative or zero); the
/// ratios use absolute values. Every ratio degrades to 0 when its
/// denominator would be 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinRateStats {
    pub total_trades: usize,
    pub win_count: usize,
    pub loss_count: usize,
    /// Percentage of trades with positive PnL
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    /// |avg_win / avg_loss|
    pub win_loss_ratio: f64,
    /// gross_profit / |gross_loss|
    pub profit_factor: f64,
    /// Expected PnL per trade: win_rate x avg_win - loss_rate x |avg_loss|
    pub expectancy: f64,
}

pub fn compute_win_rate(pnls: impl IntoIterator<Item = f64>) -> WinRateStats {
    let mut total_trades = 0usize;
    let mut win_count = 0usize;
    let mut loss_count = 0usize;
    let mut gross_profit = 0.0f64;
    let mut gross_loss = 0.0f64;

    for pnl in pnls {
        total_trades += 1;
        if pnl > 0.0 {
            win_count += 1;
            gross_profit += pnl;
        } else if pnl < 0.0 {
            loss_count += 1;
            gross_loss += pnl;
        }
    }

    let win_rate = if total_trades > 0 {
        win_count as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };
    let avg_win = if win_count > 0 {
        gross_profit / win_count as f64
    } else {
        0.0
    };
    let avg_loss = if loss_count > 0 {
        gross_loss / loss_count as f64
    } else {
        0.0
    };

    let win_loss_ratio = if avg_loss != 0.0 {
        (avg_win / avg_loss).abs()
    } else {
        0.0
    };
    let profit_factor = if gross_loss != 0.0 {
        gross_profit / gross_loss.abs()
    } else {
        0.0
    };
    let expectancy = (win_rate / 100.0) * avg_win - ((100.0 - win_rate) / 100.0) * avg_loss.abs();

    WinRateStats {
        total_trades,
        win_count,
        loss_count,
        win_rate,
        avg_win,
        avg_loss,
        gross_profit,
        gross_loss,
        win_loss_ratio,
        profit_factor,
        expectancy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_breakdown() {
        // 3 wins: 100, 150, 200 -> avg 150; 2 losses: -50, -75 -> avg -62.5
        let stats = compute_win_rate([100.0, -50.0, 150.0, -75.0, 200.0]);

        assert_eq!(stats.total_trades, 5);
        assert_eq!(stats.win_count, 3);
        assert_eq!(stats.loss_count, 2);
        assert_eq!(stats.win_rate, 60.0);
        assert_eq!(stats.avg_win, 150.0);
        assert_eq!(stats.avg_loss, -62.5);
        assert_eq!(stats.gross_profit, 450.0);
        assert_eq!(stats.gross_loss, -125.0);

        // Expectancy = 0.6 * 150 - 0.4 * 62.5 = 65
        assert!((stats.expectancy - 65.0).abs() < 1e-9);
        assert!((stats.win_loss_ratio - 2.4).abs() < 1e-9);
        assert!((stats.profit_factor - 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_empty_is_all_zero() {
        let stats = compute_win_rate([]);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.avg_win, 0.0);
        assert_eq!(stats.expectancy, 0.0);
        assert_eq!(stats.profit_factor, 0.0);
    }

    #[test]
    fn test_no_losses_guards_ratios() {
        let stats = compute_win_rate([10.0, 20.0]);
        assert_eq!(stats.win_rate, 100.0);
        assert_eq!(stats.win_loss_ratio, 0.0);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.expectancy, 15.0);
    }

    #[test]
    fn test_zero_pnl_is_neither_win_nor_loss() {
        let stats = compute_win_rate([0.0, 10.0, -10.0]);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.win_count, 1);
        assert_eq!(stats.loss_count, 1);
    }
}
