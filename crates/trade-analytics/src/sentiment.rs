//! Sentiment-sliced performance: PnL by classification, by direction
//! within classification, and by raw index value.

use dashboard_core::{EnrichedTrade, SentimentClass, Side};
use serde::Serialize;

use crate::aggregate::{aggregate_by, aggregate_with_categories, group_values, PnlStats};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentBreakdownRow {
    pub classification: SentimentClass,
    pub stats: PnlStats,
}

/// PnL per sentiment class, exhaustive across all five classes in
/// fear-to-greed order, zero-filled where the history has no such days.
pub fn sentiment_breakdown(trades: &[EnrichedTrade]) -> Vec<SentimentBreakdownRow> {
    aggregate_with_categories(trades, &SentimentClass::ALL, |t| Some(t.sentiment))
        .into_iter()
        .map(|row| SentimentBreakdownRow {
            classification: row.key,
            stats: row.stats,
        })
        .collect()
}

/// One cell of the side x sentiment grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideSentimentRow {
    pub side: Side,
    pub classification: SentimentClass,
    pub avg_pnl: f64,
    pub count: usize,
}

/// Average PnL for each (side, classification) pair actually traded.
/// Rows come out grouped by side (BUY first), then fear-to-greed.
pub fn side_sentiment_matrix(trades: &[EnrichedTrade]) -> Vec<SideSentimentRow> {
    let groups = group_values(
        trades,
        |t| Some(((t.side == Side::Sell) as u8, t.sentiment)),
        |t| t.pnl,
    );

    groups
        .into_iter()
        .map(|((side_key, classification), values)| {
            let stats = PnlStats::from_values(&values);
            SideSentimentRow {
                side: if side_key == 0 { Side::Buy } else { Side::Sell },
                classification,
                avg_pnl: stats.mean,
                count: stats.count,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexValueRow {
    /// Index value truncated to an integer bucket
    pub value: i64,
    pub classification: SentimentClass,
    pub stats: PnlStats,
}

/// PnL per distinct index value, ascending. Finer-grained than the
/// class breakdown; classification is uniform per value by construction.
pub fn by_index_value(trades: &[EnrichedTrade]) -> Vec<IndexValueRow> {
    aggregate_by(trades, |t| Some(t.sentiment_value as i64))
        .into_iter()
        .map(|row| {
            let classification = trades
                .iter()
                .find(|t| t.sentiment_value as i64 == row.key)
                .map(|t| t.sentiment)
                .unwrap_or(SentimentClass::Neutral);
            IndexValueRow {
                value: row.key,
                classification,
                stats: row.stats,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::TimeFeatures;

    fn mock_trade(side: Side, value: f64, class: SentimentClass, pnl: f64) -> EnrichedTrade {
        let date = NaiveDate::from_ymd_opt(2024, 11, 6).unwrap();
        EnrichedTrade {
            symbol: "BTC".to_string(),
            side,
            pnl,
            trade_date: date,
            time: TimeFeatures::from_datetime(date.and_hms_opt(12, 0, 0).unwrap()),
            holding: None,
            sentiment_value: value,
            sentiment: class,
        }
    }

    #[test]
    fn test_breakdown_is_exhaustive_and_ordered() {
        let trades = vec![
            mock_trade(Side::Buy, 80.0, SentimentClass::ExtremeGreed, 200.0),
            mock_trade(Side::Buy, 20.0, SentimentClass::ExtremeFear, -50.0),
        ];

        let rows = sentiment_breakdown(&trades);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].classification, SentimentClass::ExtremeFear);
        assert_eq!(rows[0].stats.total, -50.0);
        assert_eq!(rows[2].classification, SentimentClass::Neutral);
        assert_eq!(rows[2].stats.count, 0);
        assert_eq!(rows[4].classification, SentimentClass::ExtremeGreed);
        assert_eq!(rows[4].stats.total, 200.0);
    }

    #[test]
    fn test_side_sentiment_matrix() {
        let trades = vec![
            mock_trade(Side::Buy, 76.0, SentimentClass::Greed, 100.0),
            mock_trade(Side::Buy, 76.0, SentimentClass::Greed, 50.0),
            mock_trade(Side::Sell, 76.0, SentimentClass::Greed, -30.0),
            mock_trade(Side::Sell, 25.0, SentimentClass::Fear, 10.0),
        ];

        let rows = side_sentiment_matrix(&trades);
        assert_eq!(rows.len(), 3);

        // BUY rows come first.
        assert_eq!(rows[0].side, Side::Buy);
        assert_eq!(rows[0].classification, SentimentClass::Greed);
        assert_eq!(rows[0].avg_pnl, 75.0);
        assert_eq!(rows[0].count, 2);

        // Then SELL, fear-to-greed within the side.
        assert_eq!(rows[1].side, Side::Sell);
        assert_eq!(rows[1].classification, SentimentClass::Fear);
        assert_eq!(rows[2].side, Side::Sell);
        assert_eq!(rows[2].classification, SentimentClass::Greed);
        assert_eq!(rows[2].avg_pnl, -30.0);
    }

    #[test]
    fn test_by_index_value_ascending() {
        let trades = vec![
            mock_trade(Side::Buy, 88.0, SentimentClass::ExtremeGreed, 40.0),
            mock_trade(Side::Buy, 25.0, SentimentClass::Fear, -10.0),
            mock_trade(Side::Buy, 25.0, SentimentClass::Fear, -20.0),
        ];

        let rows = by_index_value(&trades);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, 25);
        assert_eq!(rows[0].classification, SentimentClass::Fear);
        assert_eq!(rows[0].stats.total, -30.0);
        assert_eq!(rows[1].value, 88);
        assert_eq!(rows[1].stats.count, 1);
    }
}
