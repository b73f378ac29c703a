use dashboard_core::{DurationCategory, HoldingTime};
use tracing::warn;

use crate::time_features::parse_timestamp;

/// Compute holding time from raw entry/exit timestamp strings.
///
/// Either endpoint failing to parse leaves the elapsed fields null and
/// classifies the trade as `Unknown`. A negative elapsed time (exit
/// before entry) is a data-quality anomaly: it is also classified
/// `Unknown` and logged, rather than falling through to the long-term
/// bucket.
pub fn compute_holding(entry_raw: Option<&str>, exit_raw: Option<&str>) -> HoldingTime {
    let entry = entry_raw.and_then(parse_timestamp);
    let exit = exit_raw.and_then(parse_timestamp);

    let (hours, minutes) = match (entry, exit) {
        (Some(entry), Some(exit)) => {
            let secs = (exit - entry).num_seconds() as f64;
            (Some(secs / 3600.0), Some(secs / 60.0))
        }
        _ => (None, None),
    };

    if let Some(h) = hours {
        if h < 0.0 {
            warn!(
                "negative holding time ({:.2}h): exit {:?} precedes entry {:?}",
                h, exit_raw, entry_raw
            );
        }
    }

    HoldingTime {
        hours,
        minutes,
        category: DurationCategory::from_holding_hours(hours),
    }
}
