use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use dashboard_core::{DashboardError, SentimentClass, SentimentRecord, Side};
use tracing::warn;

/// One raw row of the trade execution log, before any derivation.
///
/// Timestamp fields stay as raw strings here; parsing is deferred so the
/// lenient parse-to-null policy is applied in one place during dataset
/// assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTradeRow {
    pub timestamp: String,
    pub symbol: String,
    pub side: Side,
    pub pnl: f64,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
}

/// Trade rows plus the holding-feature capability flag, detected once
/// from the header rather than per row.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRows {
    pub rows: Vec<RawTradeRow>,
    pub has_holding_columns: bool,
}

/// Parse the trade log.
/// Required columns: `Timestamp IST`, `Symbol`, `Side`, `Closed PnL`;
/// optional: `Entry Time`, `Exit Time`.
pub fn read_trades<R: Read>(input: R) -> Result<TradeRows, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::InvalidData(format!("trade log header: {}", e)))?
        .clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);

    let ts_col = col("Timestamp IST")
        .ok_or_else(|| DashboardError::InvalidData("trade log missing 'Timestamp IST' column".into()))?;
    let symbol_col = col("Symbol")
        .ok_or_else(|| DashboardError::InvalidData("trade log missing 'Symbol' column".into()))?;
    let side_col = col("Side")
        .ok_or_else(|| DashboardError::InvalidData("trade log missing 'Side' column".into()))?;
    let pnl_col = col("Closed PnL")
        .ok_or_else(|| DashboardError::InvalidData("trade log missing 'Closed PnL' column".into()))?;

    let entry_col = col("Entry Time");
    let exit_col = col("Exit Time");
    let has_holding_columns = entry_col.is_some() && exit_col.is_some();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| DashboardError::InvalidData(format!("trade log: {}", e)))?;

        let side = match Side::parse(record.get(side_col).unwrap_or("")) {
            Some(side) => side,
            None => {
                skipped += 1;
                continue;
            }
        };

        let raw_pnl = record.get(pnl_col).unwrap_or("").trim();
        let pnl: f64 = match raw_pnl.parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("unparsable Closed PnL '{}', treating as 0", raw_pnl);
                0.0
            }
        };

        rows.push(RawTradeRow {
            timestamp: record.get(ts_col).unwrap_or("").trim().to_string(),
            symbol: record.get(symbol_col).unwrap_or("").trim().to_string(),
            side,
            pnl,
            entry_time: entry_col
                .and_then(|i| record.get(i))
                .map(|s| s.trim().to_string()),
            exit_time: exit_col
                .and_then(|i| record.get(i))
                .map(|s| s.trim().to_string()),
        });
    }

    if skipped > 0 {
        warn!("trade log: skipped {} rows with unrecognized side", skipped);
    }

    Ok(TradeRows {
        rows,
        has_holding_columns,
    })
}

/// Parse the sentiment index.
/// Required columns: `date`, `value`, `classification`.
pub fn read_sentiment<R: Read>(input: R) -> Result<Vec<SentimentRecord>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::InvalidData(format!("sentiment index header: {}", e)))?
        .clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);

    let date_col = col("date")
        .ok_or_else(|| DashboardError::InvalidData("sentiment index missing 'date' column".into()))?;
    let value_col = col("value")
        .ok_or_else(|| DashboardError::InvalidData("sentiment index missing 'value' column".into()))?;
    let class_col = col("classification").ok_or_else(|| {
        DashboardError::InvalidData("sentiment index missing 'classification' column".into())
    })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record =
            result.map_err(|e| DashboardError::InvalidData(format!("sentiment index: {}", e)))?;

        let date: NaiveDate = match record.get(date_col).unwrap_or("").trim().parse() {
            Ok(d) => d,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let classification = match SentimentClass::from_label(record.get(class_col).unwrap_or("")) {
            Some(c) => c,
            None => {
                skipped += 1;
                continue;
            }
        };
        let value: f64 = record
            .get(value_col)
            .unwrap_or("0")
            .trim()
            .parse()
            .unwrap_or(0.0);

        records.push(SentimentRecord {
            date,
            value,
            classification,
        });
    }

    if skipped > 0 {
        warn!(
            "sentiment index: skipped {} rows with unparsable date or classification",
            skipped
        );
    }

    Ok(records)
}

pub fn read_trades_file(path: &Path) -> Result<TradeRows, DashboardError> {
    let file =
        File::open(path).map_err(|_| DashboardError::MissingInput(path.display().to_string()))?;
    read_trades(file)
}

pub fn read_sentiment_file(path: &Path) -> Result<Vec<SentimentRecord>, DashboardError> {
    let file =
        File::open(path).map_err(|_| DashboardError::MissingInput(path.display().to_string()))?;
    read_sentiment(file)
}
