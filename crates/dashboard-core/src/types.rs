use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Trade direction as recorded in the execution log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Lenient parse from the raw `Side` column (`BUY` / `SELL`, any case).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "BUY" => Some(Side::Buy),
            "SELL" => Some(Side::Sell),
            _ => None,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

/// Fear & Greed classification, ordered from most fearful to most greedy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SentimentClass {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentClass {
    /// Fixed display order for exhaustive breakdowns
    pub const ALL: [SentimentClass; 5] = [
        SentimentClass::ExtremeFear,
        SentimentClass::Fear,
        SentimentClass::Neutral,
        SentimentClass::Greed,
        SentimentClass::ExtremeGreed,
    ];

    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "extreme fear" => Some(SentimentClass::ExtremeFear),
            "fear" => Some(SentimentClass::Fear),
            "neutral" => Some(SentimentClass::Neutral),
            "greed" => Some(SentimentClass::Greed),
            "extreme greed" => Some(SentimentClass::ExtremeGreed),
            _ => None,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            SentimentClass::ExtremeFear => "Extreme Fear",
            SentimentClass::Fear => "Fear",
            SentimentClass::Neutral => "Neutral",
            SentimentClass::Greed => "Greed",
            SentimentClass::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl std::fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

/// Holding-duration bucket, ordered from shortest to longest.
///
/// `Unknown` covers trades where either endpoint failed to parse, and
/// trades with a negative elapsed time (exit before entry); those are a
/// data-quality anomaly and are never bucketed as long holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DurationCategory {
    Scalp,
    DayTrade,
    Swing,
    Position,
    LongTerm,
    Unknown,
}

impl DurationCategory {
    /// Fixed display order for exhaustive breakdowns
    pub const ALL: [DurationCategory; 6] = [
        DurationCategory::Scalp,
        DurationCategory::DayTrade,
        DurationCategory::Swing,
        DurationCategory::Position,
        DurationCategory::LongTerm,
        DurationCategory::Unknown,
    ];

    /// Ordered threshold rules; first match wins, every input gets exactly
    /// one category.
    pub fn from_holding_hours(hours: Option<f64>) -> Self {
        match hours {
            None => DurationCategory::Unknown,
            Some(h) if h < 0.0 => DurationCategory::Unknown,
            Some(h) if h < 1.0 => DurationCategory::Scalp,
            Some(h) if h < 24.0 => DurationCategory::DayTrade,
            Some(h) if h < 168.0 => DurationCategory::Swing,
            Some(h) if h < 720.0 => DurationCategory::Position,
            Some(_) => DurationCategory::LongTerm,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            DurationCategory::Scalp => "Scalp (<1h)",
            DurationCategory::DayTrade => "Day Trade (1-24h)",
            DurationCategory::Swing => "Swing (1-7d)",
            DurationCategory::Position => "Position (1-4w)",
            DurationCategory::LongTerm => "Long-term (>1m)",
            DurationCategory::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

/// Calendar attributes derived from a successfully parsed execution
/// timestamp. A trade whose timestamp failed to parse carries no
/// `TimeFeatures` at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeFeatures {
    /// Hour of day, 0-23
    pub hour: u32,
    pub weekday: Weekday,
    /// Month number, 1-12
    pub month: u32,
    /// Zero-padded "YYYY-MM" bucket
    pub year_month: String,
}

impl TimeFeatures {
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            hour: dt.hour(),
            weekday: dt.weekday(),
            month: dt.month(),
            year_month: format!("{:04}-{:02}", dt.year(), dt.month()),
        }
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

/// Full English weekday name (chrono's Display is abbreviated)
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English month name for a 1-12 month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Invalid",
    }
}

/// Elapsed holding time between entry and exit, plus its bucket.
///
/// `hours`/`minutes` are `None` when either endpoint was unparsable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingTime {
    pub hours: Option<f64>,
    pub minutes: Option<f64>,
    pub category: DurationCategory,
}

/// One executed trade as ingested, before the sentiment join.
///
/// Timestamp-derived fields are `None` when the raw string failed to
/// parse; the row itself is retained (lenient parse-to-null policy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub side: Side,
    /// Realized profit-or-loss ("Closed PnL"), signed
    pub pnl: f64,
    pub executed_at: Option<NaiveDateTime>,
    /// Execution timestamp floored to day granularity; the sole join key
    pub trade_date: Option<NaiveDate>,
    pub time: Option<TimeFeatures>,
    /// `None` when the source data lacks entry/exit timestamp columns
    pub holding: Option<HoldingTime>,
}

/// One calendar day's Fear & Greed reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub date: NaiveDate,
    /// Index value, 0-100
    pub value: f64,
    pub classification: SentimentClass,
}

/// Inner-join result of a trade and its matching sentiment day.
///
/// Every field from either side is populated by construction; only the
/// holding feature family stays optional (capability-dependent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTrade {
    pub symbol: String,
    pub side: Side,
    pub pnl: f64,
    pub trade_date: NaiveDate,
    pub time: TimeFeatures,
    pub holding: Option<HoldingTime>,
    pub sentiment_value: f64,
    pub sentiment: SentimentClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::parse("BUY"), Some(Side::Buy));
        assert_eq!(Side::parse(" sell "), Some(Side::Sell));
        assert_eq!(Side::parse("HOLD"), None);
    }

    #[test]
    fn test_sentiment_label_round_trip() {
        for class in SentimentClass::ALL {
            assert_eq!(SentimentClass::from_label(class.to_label()), Some(class));
        }
        assert_eq!(SentimentClass::from_label("euphoria"), None);
    }

    #[test]
    fn test_sentiment_ordering() {
        assert!(SentimentClass::ExtremeFear < SentimentClass::Fear);
        assert!(SentimentClass::Greed < SentimentClass::ExtremeGreed);
    }

    #[test]
    fn test_duration_thresholds() {
        assert_eq!(
            DurationCategory::from_holding_hours(Some(0.5)),
            DurationCategory::Scalp
        );
        assert_eq!(
            DurationCategory::from_holding_hours(Some(12.0)),
            DurationCategory::DayTrade
        );
        assert_eq!(
            DurationCategory::from_holding_hours(Some(100.0)),
            DurationCategory::Swing
        );
        assert_eq!(
            DurationCategory::from_holding_hours(Some(400.0)),
            DurationCategory::Position
        );
        assert_eq!(
            DurationCategory::from_holding_hours(Some(900.0)),
            DurationCategory::LongTerm
        );
    }

    #[test]
    fn test_duration_boundaries() {
        // Thresholds are strict less-than: the boundary value falls into
        // the next bucket up.
        assert_eq!(
            DurationCategory::from_holding_hours(Some(1.0)),
            DurationCategory::DayTrade
        );
        assert_eq!(
            DurationCategory::from_holding_hours(Some(24.0)),
            DurationCategory::Swing
        );
        assert_eq!(
            DurationCategory::from_holding_hours(Some(168.0)),
            DurationCategory::Position
        );
        assert_eq!(
            DurationCategory::from_holding_hours(Some(720.0)),
            DurationCategory::LongTerm
        );
    }

    #[test]
    fn test_duration_unknown_cases() {
        assert_eq!(
            DurationCategory::from_holding_hours(None),
            DurationCategory::Unknown
        );
        // Exit before entry: data-quality anomaly, never a long hold
        assert_eq!(
            DurationCategory::from_holding_hours(Some(-3.0)),
            DurationCategory::Unknown
        );
    }

    #[test]
    fn test_time_features() {
        // 2024-11-13 was a Wednesday
        let dt = NaiveDate::from_ymd_opt(2024, 11, 13)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let tf = TimeFeatures::from_datetime(dt);
        assert_eq!(tf.hour, 14);
        assert_eq!(tf.weekday, Weekday::Wed);
        assert_eq!(tf.weekday_name(), "Wednesday");
        assert_eq!(tf.month, 11);
        assert_eq!(tf.month_name(), "November");
        assert_eq!(tf.year_month, "2024-11");
    }

    #[test]
    fn test_year_month_zero_padded() {
        let dt = NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(TimeFeatures::from_datetime(dt).year_month, "2025-04");
    }
}
