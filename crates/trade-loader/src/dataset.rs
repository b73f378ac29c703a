use std::path::Path;

use dashboard_core::{DashboardError, EnrichedTrade, SentimentRecord, TimeFeatures, TradeRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::csv_source::{self, RawTradeRow, TradeRows};
use crate::duration::compute_holding;
use crate::join::join_sentiment;
use crate::time_features::parse_timestamp;

/// The session's base dataset: enriched trades plus the capability flag
/// for the holding-time feature family. Loaded once, read-only afterward;
/// every analysis is a pure function over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub trades: Vec<EnrichedTrade>,
    pub has_holding_data: bool,
}

/// Load and assemble the full dataset from the two input files.
/// Missing files and empty inputs are fatal.
pub fn load_dataset(trades_path: &Path, sentiment_path: &Path) -> Result<Dataset, DashboardError> {
    let trade_rows = csv_source::read_trades_file(trades_path)?;
    let sentiment = csv_source::read_sentiment_file(sentiment_path)?;
    build_dataset(&trade_rows, &sentiment)
}

/// Assemble the dataset from already-parsed rows. Deterministic: the same
/// inputs always produce an identical dataset.
pub fn build_dataset(
    trade_rows: &TradeRows,
    sentiment: &[SentimentRecord],
) -> Result<Dataset, DashboardError> {
    if trade_rows.rows.is_empty() {
        return Err(DashboardError::EmptyDataset("trade log has no rows".into()));
    }
    if sentiment.is_empty() {
        return Err(DashboardError::EmptyDataset(
            "sentiment index has no rows".into(),
        ));
    }

    let records: Vec<TradeRecord> = trade_rows
        .rows
        .iter()
        .map(|row| to_record(row, trade_rows.has_holding_columns))
        .collect();

    let trades = join_sentiment(&records, sentiment);
    if trades.is_empty() {
        return Err(DashboardError::EmptyDataset(
            "no trades matched any sentiment day".into(),
        ));
    }

    info!(
        "dataset ready: {} enriched trades, holding data: {}",
        trades.len(),
        trade_rows.has_holding_columns
    );

    Ok(Dataset {
        trades,
        has_holding_data: trade_rows.has_holding_columns,
    })
}

fn to_record(row: &RawTradeRow, has_holding_columns: bool) -> TradeRecord {
    let executed_at = parse_timestamp(&row.timestamp);

    // Holding classification only exists when the source carries the
    // entry/exit columns; the branch is taken once per dataset, not per
    // aggregation call.
    let holding = if has_holding_columns {
        Some(compute_holding(
            row.entry_time.as_deref(),
            row.exit_time.as_deref(),
        ))
    } else {
        None
    };

    TradeRecord {
        symbol: row.symbol.clone(),
        side: row.side,
        pnl: row.pnl,
        executed_at,
        trade_date: executed_at.map(|dt| dt.date()),
        time: executed_at.map(TimeFeatures::from_datetime),
        holding,
    }
}
