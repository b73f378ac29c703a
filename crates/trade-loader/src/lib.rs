//! trade-loader: builds the in-memory analysis dataset from the two input
//! files (trade execution log + daily Fear & Greed index).
//!
//! Pipeline: read CSVs, lenient timestamp parsing + time features,
//! holding-duration classification (when the source has entry/exit
//! columns), inner join on calendar date, `Dataset`.
//!
//! Missing or empty inputs are fatal; malformed individual rows are not:
//! they degrade to null derived fields or are skipped with a warning,
//! per the parse-leniency policy.

pub mod csv_source;
pub mod dataset;
pub mod duration;
pub mod join;
pub mod time_features;

pub use csv_source::{read_sentiment, read_sentiment_file, read_trades, read_trades_file, RawTradeRow, TradeRows};
pub use dataset::{build_dataset, load_dataset, Dataset};
pub use duration::compute_holding;
pub use join::join_sentiment;
pub use time_features::{parse_timestamp, TIMESTAMP_FORMAT};
