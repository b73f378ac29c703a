//! trade-analytics: pure, synchronous analyses over the enriched trade
//! dataset.
//!
//! Every function here takes the read-only dataset (or the daily
//! aggregate derived from it) and produces fresh result rows; nothing is
//! cached or mutated, so repeated calls are deterministic.

pub mod aggregate;
pub mod daily;
pub mod extremes;
pub mod holding;
pub mod scenario;
pub mod sentiment;
pub mod time_analysis;
pub mod win_rate;

pub use aggregate::{aggregate_by, aggregate_with_categories, AggregateRow, PnlStats};
pub use daily::{compute_daily_overview, overview, restrict_after, DailyPnl, OverviewStats};
pub use extremes::{
    average_recovery_days, biggest_rebound, profitable_day_ratio, select_extremes, ExtremeDays,
    DEFAULT_TOP_K,
};
pub use holding::{
    by_bucket, by_category, holding_summary, most_profitable_category, CategoryStats,
    HoldBucketStats, HoldingSummary,
};
pub use scenario::{simulate, ScenarioComparison, ScenarioMetrics};
pub use sentiment::{by_index_value, sentiment_breakdown, side_sentiment_matrix, IndexValueRow, SentimentBreakdownRow, SideSentimentRow};
pub use time_analysis::{
    best_hour, best_weekday, hour_weekday_heatmap, hourly_stats, monthly_stats, weekday_stats,
    worst_hour, worst_weekday, HeatmapCell, HourlyStats, MonthlyStats, WeekdayStats,
};
pub use win_rate::{compute_win_rate, WinRateStats};
