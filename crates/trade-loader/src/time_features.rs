use chrono::NaiveDateTime;

/// Raw timestamp format used by both the execution log and the
/// entry/exit columns: day-month-year hour:minute.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Lenient timestamp parse: malformed strings yield `None`, never an
/// error. Downstream derived fields for that row become null.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use dashboard_core::TimeFeatures;

    #[test]
    fn test_parse_valid() {
        let dt = parse_timestamp("06-11-2024 09:45").unwrap();
        assert_eq!(dt.day(), 6);
        assert_eq!(dt.month(), 11);
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 45);
    }

    #[test]
    fn test_parse_malformed_is_none() {
        assert!(parse_timestamp("2024-11-06 09:45").is_none()); // wrong order
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("32-11-2024 09:45").is_none()); // day overflow
    }

    #[test]
    fn test_derived_features_from_parse() {
        let dt = parse_timestamp("13-11-2024 23:05").unwrap();
        let tf = TimeFeatures::from_datetime(dt);
        assert_eq!(tf.hour, 23);
        assert_eq!(tf.weekday_name(), "Wednesday");
        assert_eq!(tf.year_month, "2024-11");
    }
}
