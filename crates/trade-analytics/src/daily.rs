//! Daily PnL overview: the per-day aggregate every case-study view and
//! the extremum selector build on.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dashboard_core::{EnrichedTrade, SentimentClass};
use serde::Serialize;

/// One calendar day of aggregated trading: summed PnL, mean index value,
/// and the day's classification (uniform per day by join construction;
/// taken from the first trade).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPnl {
    pub date: NaiveDate,
    pub total_pnl: f64,
    pub avg_index: f64,
    pub classification: SentimentClass,
}

/// Group trades by date, chronologically sorted.
pub fn compute_daily_overview(trades: &[EnrichedTrade]) -> Vec<DailyPnl> {
    struct DayAcc {
        total_pnl: f64,
        index_sum: f64,
        count: usize,
        classification: SentimentClass,
    }

    let mut days: BTreeMap<NaiveDate, DayAcc> = BTreeMap::new();
    for trade in trades {
        days.entry(trade.trade_date)
            .and_modify(|acc| {
                acc.total_pnl += trade.pnl;
                acc.index_sum += trade.sentiment_value;
                acc.count += 1;
            })
            .or_insert(DayAcc {
                total_pnl: trade.pnl,
                index_sum: trade.sentiment_value,
                count: 1,
                classification: trade.sentiment,
            });
    }

    days.into_iter()
        .map(|(date, acc)| DailyPnl {
            date,
            total_pnl: acc.total_pnl,
            avg_index: acc.index_sum / acc.count as f64,
            classification: acc.classification,
        })
        .collect()
}

/// Headline numbers for the full history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_trades: usize,
    pub net_pnl: f64,
    pub avg_daily_pnl: f64,
    pub best_day: Option<DailyPnl>,
}

/// Headline metrics over a trade slice and its daily series.
///
/// Both arguments must describe the same window: pass the daily series
/// computed from exactly these trades. Mixing an unrestricted trade
/// slice with a date-restricted daily series makes the per-trade and
/// per-day numbers disagree.
pub fn overview(trades: &[EnrichedTrade], daily: &[DailyPnl]) -> OverviewStats {
    let net_pnl = trades.iter().map(|t| t.pnl).sum();
    let avg_daily_pnl = if daily.is_empty() {
        0.0
    } else {
        daily.iter().map(|d| d.total_pnl).sum::<f64>() / daily.len() as f64
    };
    let best_day = daily
        .iter()
        .max_by(|a, b| {
            a.total_pnl
                .partial_cmp(&b.total_pnl)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .cloned();

    OverviewStats {
        total_trades: trades.len(),
        net_pnl,
        avg_daily_pnl,
        best_day,
    }
}

/// Restrict a daily series to dates strictly after the cutoff (the
/// case-study windows work on "post event" ranges).
pub fn restrict_after(daily: &[DailyPnl], cutoff: NaiveDate) -> Vec<DailyPnl> {
    daily.iter().filter(|d| d.date > cutoff).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{Side, TimeFeatures};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    fn mock_trade(day: NaiveDate, pnl: f64, value: f64, class: SentimentClass) -> EnrichedTrade {
        EnrichedTrade {
            symbol: "BTC".to_string(),
            side: Side::Buy,
            pnl,
            trade_date: day,
            time: TimeFeatures::from_datetime(day.and_hms_opt(12, 0, 0).unwrap()),
            holding: None,
            sentiment_value: value,
            sentiment: class,
        }
    }

    #[test]
    fn test_daily_overview_sums_and_sorts() {
        let trades = vec![
            mock_trade(date(13), 5000.0, 88.0, SentimentClass::ExtremeGreed),
            mock_trade(date(6), 1000.0, 76.0, SentimentClass::Greed),
            mock_trade(date(6), 1817.0, 76.0, SentimentClass::Greed),
            mock_trade(date(13), 2846.0, 88.0, SentimentClass::ExtremeGreed),
        ];

        let daily = compute_daily_overview(&trades);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, date(6));
        assert_eq!(daily[0].total_pnl, 2817.0);
        assert_eq!(daily[0].avg_index, 76.0);
        assert_eq!(daily[0].classification, SentimentClass::Greed);
        assert_eq!(daily[1].date, date(13));
        assert_eq!(daily[1].total_pnl, 7846.0);
    }

    #[test]
    fn test_overview_stats() {
        let trades = vec![
            mock_trade(date(6), 100.0, 76.0, SentimentClass::Greed),
            mock_trade(date(7), -40.0, 50.0, SentimentClass::Neutral),
        ];
        let daily = compute_daily_overview(&trades);
        let stats = overview(&trades, &daily);

        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.net_pnl, 60.0);
        assert_eq!(stats.avg_daily_pnl, 30.0);
        assert_eq!(stats.best_day.unwrap().date, date(6));
    }

    #[test]
    fn test_restrict_after_is_strict() {
        let trades = vec![
            mock_trade(date(20), 10.0, 80.0, SentimentClass::Greed),
            mock_trade(date(21), 20.0, 80.0, SentimentClass::Greed),
            mock_trade(date(22), 30.0, 80.0, SentimentClass::Greed),
        ];
        let daily = compute_daily_overview(&trades);
        let post = restrict_after(&daily, date(20));
        assert_eq!(post.len(), 2);
        assert_eq!(post[0].date, date(21));
    }

    #[test]
    fn test_overview_window_consistency() {
        let trades = vec![
            mock_trade(date(20), 10.0, 80.0, SentimentClass::Greed),
            mock_trade(date(21), 20.0, 80.0, SentimentClass::Greed),
            mock_trade(date(22), 30.0, 80.0, SentimentClass::Greed),
        ];

        // Restrict the trades first, then derive the daily series from
        // the restricted slice; per-trade and per-day totals agree.
        let cutoff = date(20);
        let window: Vec<EnrichedTrade> = trades
            .iter()
            .filter(|t| t.trade_date > cutoff)
            .cloned()
            .collect();
        let daily = compute_daily_overview(&window);
        let stats = overview(&window, &daily);

        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.net_pnl, 50.0);
        assert_eq!(
            stats.net_pnl,
            daily.iter().map(|d| d.total_pnl).sum::<f64>()
        );
        assert_eq!(stats.best_day.unwrap().date, date(22));
    }

    #[test]
    fn test_empty_overview_guards() {
        let stats = overview(&[], &[]);
        assert_eq!(stats.avg_daily_pnl, 0.0);
        assert!(stats.best_day.is_none());
    }
}
