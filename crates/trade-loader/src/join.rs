use std::collections::HashMap;

use chrono::NaiveDate;
use dashboard_core::{EnrichedTrade, SentimentRecord, TradeRecord};
use tracing::info;

/// Inner join of trades against sentiment days on the normalized trade
/// date. Trades with no parsable date or no matching sentiment row are
/// dropped; that is the filtering contract, not an error: the analysis
/// universe is "days with both trade and sentiment data".
///
/// Duplicate sentiment dates keep the first occurrence, deterministically.
pub fn join_sentiment(trades: &[TradeRecord], sentiment: &[SentimentRecord]) -> Vec<EnrichedTrade> {
    let mut by_date: HashMap<NaiveDate, &SentimentRecord> = HashMap::new();
    for record in sentiment {
        by_date.entry(record.date).or_insert(record);
    }

    let mut enriched = Vec::new();
    let mut dropped = 0usize;
    for trade in trades {
        let (date, time) = match (trade.trade_date, &trade.time) {
            (Some(date), Some(time)) => (date, time.clone()),
            _ => {
                dropped += 1;
                continue;
            }
        };

        match by_date.get(&date) {
            Some(day) => enriched.push(EnrichedTrade {
                symbol: trade.symbol.clone(),
                side: trade.side,
                pnl: trade.pnl,
                trade_date: date,
                time,
                holding: trade.holding.clone(),
                sentiment_value: day.value,
                sentiment: day.classification,
            }),
            None => dropped += 1,
        }
    }

    info!(
        "sentiment join: {} trades matched, {} dropped",
        enriched.len(),
        dropped
    );
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{SentimentClass, Side, TimeFeatures};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mock_trade(day: Option<NaiveDate>, pnl: f64) -> TradeRecord {
        let executed_at = day.map(|d| d.and_hms_opt(10, 0, 0).unwrap());
        TradeRecord {
            symbol: "BTC".to_string(),
            side: Side::Buy,
            pnl,
            executed_at,
            trade_date: day,
            time: executed_at.map(TimeFeatures::from_datetime),
            holding: None,
        }
    }

    fn mock_sentiment(day: NaiveDate, value: f64, class: SentimentClass) -> SentimentRecord {
        SentimentRecord {
            date: day,
            value,
            classification: class,
        }
    }

    #[test]
    fn test_inner_join_keeps_only_matching_pairs() {
        let trades = vec![
            mock_trade(Some(date(2024, 11, 6)), 100.0),
            mock_trade(Some(date(2024, 11, 6)), -30.0),
            mock_trade(Some(date(2024, 11, 7)), 50.0), // no sentiment for this day
        ];
        let sentiment = vec![
            mock_sentiment(date(2024, 11, 6), 76.0, SentimentClass::Greed),
            mock_sentiment(date(2024, 11, 8), 80.0, SentimentClass::ExtremeGreed), // no trades
        ];

        let enriched = join_sentiment(&trades, &sentiment);
        assert_eq!(enriched.len(), 2);
        for trade in &enriched {
            assert_eq!(trade.trade_date, date(2024, 11, 6));
            assert_eq!(trade.sentiment, SentimentClass::Greed);
            assert_eq!(trade.sentiment_value, 76.0);
        }
    }

    #[test]
    fn test_unparsable_date_dropped() {
        let trades = vec![mock_trade(None, 100.0)];
        let sentiment = vec![mock_sentiment(date(2024, 11, 6), 76.0, SentimentClass::Greed)];
        assert!(join_sentiment(&trades, &sentiment).is_empty());
    }

    #[test]
    fn test_duplicate_sentiment_date_first_wins() {
        let trades = vec![mock_trade(Some(date(2024, 11, 6)), 100.0)];
        let sentiment = vec![
            mock_sentiment(date(2024, 11, 6), 76.0, SentimentClass::Greed),
            mock_sentiment(date(2024, 11, 6), 20.0, SentimentClass::Fear),
        ];

        let enriched = join_sentiment(&trades, &sentiment);
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].sentiment, SentimentClass::Greed);
    }

    #[test]
    fn test_empty_sides() {
        assert!(join_sentiment(&[], &[]).is_empty());
    }
}
