//! dashboard-cli: run the trade/sentiment analyses against a trade log
//! and a Fear & Greed index export, printing a text report or JSON.
//!
//! Usage:
//!   cargo run -p dashboard-cli
//!   cargo run -p dashboard-cli -- --trades my_trades.csv --after 2024-11-01
//!   cargo run -p dashboard-cli -- --only "Fear,Extreme Fear" --side BUY
//!   cargo run -p dashboard-cli -- --json > report.json

use std::path::Path;

use chrono::NaiveDate;
use dashboard_core::{FilterConfig, SentimentClass, Side};
use trade_analytics::{
    average_recovery_days, best_hour, best_weekday, biggest_rebound, by_bucket, by_category,
    by_index_value, compute_daily_overview, compute_win_rate, holding_summary,
    hour_weekday_heatmap, hourly_stats, monthly_stats, most_profitable_category, overview,
    profitable_day_ratio, select_extremes, sentiment_breakdown,
    side_sentiment_matrix, simulate, weekday_stats, worst_hour, worst_weekday, DEFAULT_TOP_K,
};
use trade_loader::load_dataset;

const DEFAULT_TRADES: &str = "historical_data.csv";
const DEFAULT_SENTIMENT: &str = "fear_greed_index.csv";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_cli=info,trade_loader=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        std::process::exit(0);
    }

    let trades_path = flag_value(&args, "--trades").unwrap_or(DEFAULT_TRADES);
    let sentiment_path = flag_value(&args, "--sentiment").unwrap_or(DEFAULT_SENTIMENT);
    let as_json = args.iter().any(|a| a == "--json");

    let top_k: usize = match flag_value(&args, "--top-k") {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("--top-k expects a positive integer, got '{}'", raw);
            std::process::exit(1);
        }),
        None => DEFAULT_TOP_K,
    };

    let after: Option<NaiveDate> = match flag_value(&args, "--after") {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                eprintln!("--after expects YYYY-MM-DD, got '{}'", raw);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let filter = build_filter(&args);

    let dataset = load_dataset(Path::new(trades_path), Path::new(sentiment_path))?;
    tracing::info!(
        "loaded {} trades from {} + {}",
        dataset.trades.len(),
        trades_path,
        sentiment_path
    );

    // When a filter is requested, the report covers the filtered view and
    // the scenario section compares it against full history.
    let scenario = filter
        .as_ref()
        .map(|f| simulate(&dataset.trades, f));
    let trades: Vec<_> = match &filter {
        Some(f) => f.apply(&dataset.trades).cloned().collect(),
        None => dataset.trades.clone(),
    };
    // --after narrows the trade set itself, not just the daily series, so
    // every section of the report covers the same window.
    let trades: Vec<_> = match after {
        Some(cutoff) => trades
            .into_iter()
            .filter(|t| t.trade_date > cutoff)
            .collect(),
        None => trades,
    };
    if trades.is_empty() {
        anyhow::bail!("no trades left after applying the filter");
    }

    let daily = compute_daily_overview(&trades);

    let stats = overview(&trades, &daily);
    let win = compute_win_rate(trades.iter().map(|t| t.pnl));
    let breakdown = sentiment_breakdown(&trades);
    let matrix = side_sentiment_matrix(&trades);
    let hourly = hourly_stats(&trades);
    let weekdays = weekday_stats(&trades);
    let monthly = monthly_stats(&trades);
    let extremes = select_extremes(&daily, top_k);
    let holding = dataset.has_holding_data.then(|| {
        (
            holding_summary(&trades),
            by_bucket(&trades),
            by_category(&trades),
        )
    });

    if as_json {
        let report = serde_json::json!({
            "overview": stats,
            "win_rate": win,
            "daily": daily,
            "extremes": extremes,
            "profitable_day_pct": profitable_day_ratio(&daily),
            "avg_recovery_days": average_recovery_days(&daily, &extremes.losses),
            "biggest_rebound": biggest_rebound(&daily),
            "sentiment_breakdown": breakdown,
            "side_sentiment": matrix,
            "by_index_value": by_index_value(&trades),
            "hourly": hourly,
            "weekdays": weekdays,
            "monthly": monthly,
            "heatmap": hour_weekday_heatmap(&trades),
            "holding": holding.as_ref().map(|(summary, buckets, categories)| {
                serde_json::json!({
                    "summary": summary,
                    "buckets": buckets,
                    "categories": categories,
                })
            }),
            "scenario": scenario,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== Overview ===");
    println!("Trades:          {}", stats.total_trades);
    println!("Net PnL:         {:+.2}", stats.net_pnl);
    println!("Avg daily PnL:   {:+.2}", stats.avg_daily_pnl);
    if let Some(best) = &stats.best_day {
        println!(
            "Best day:        {} ({:+.2}, {})",
            best.date, best.total_pnl, best.classification
        );
    }
    println!(
        "Green days:      {:.1}% of {}",
        profitable_day_ratio(&daily),
        daily.len()
    );

    println!("\n=== Win Rate ===");
    println!(
        "Win rate:        {:.1}% ({} wins / {} losses)",
        win.win_rate, win.win_count, win.loss_count
    );
    println!(
        "Avg win/loss:    {:+.2} / {:+.2} (ratio {:.2})",
        win.avg_win, win.avg_loss, win.win_loss_ratio
    );
    println!("Profit factor:   {:.2}", win.profit_factor);
    println!("Expectancy:      {:+.2} per trade", win.expectancy);

    println!("\n=== PnL by Sentiment ===");
    for row in &breakdown {
        println!(
            "{:<15} {:>5} trades  total {:+12.2}  avg {:+10.2}  win {:5.1}%",
            row.classification.to_label(),
            row.stats.count,
            row.stats.total,
            row.stats.mean,
            row.stats.win_rate
        );
    }

    println!("\n=== Side x Sentiment (avg PnL) ===");
    for row in &matrix {
        println!(
            "{:<5} {:<15} {:+10.2} over {} trades",
            row.side.to_label(),
            row.classification.to_label(),
            row.avg_pnl,
            row.count
        );
    }

    println!("\n=== Time of Day ===");
    if let (Some(best), Some(worst)) = (best_hour(&hourly), worst_hour(&hourly)) {
        println!(
            "Best hour:       {:02}:00 ({:+.2})",
            best.hour, best.stats.total
        );
        println!(
            "Worst hour:      {:02}:00 ({:+.2})",
            worst.hour, worst.stats.total
        );
    }
    if let (Some(best), Some(worst)) = (best_weekday(&weekdays), worst_weekday(&weekdays)) {
        println!(
            "Best weekday:    {} ({:+.2})",
            best.day_name(),
            best.stats.total
        );
        println!(
            "Worst weekday:   {} ({:+.2})",
            worst.day_name(),
            worst.stats.total
        );
    }
    println!("Monthly:");
    for row in &monthly {
        println!(
            "  {}  {:+12.2} over {:>4} trades",
            row.year_month, row.stats.total, row.stats.count
        );
    }

    println!("\n=== Extreme Days (top {}) ===", top_k);
    println!("Biggest losses:");
    for day in &extremes.losses {
        println!(
            "  {}  {:+12.2}  ({})",
            day.date, day.total_pnl, day.classification
        );
    }
    println!("Biggest gains:");
    for day in &extremes.gains {
        println!(
            "  {}  {:+12.2}  ({})",
            day.date, day.total_pnl, day.classification
        );
    }
    if let Some(line) = overlap_warning(&extremes.overlap) {
        println!("{}", line);
    }
    println!(
        "Avg recovery:    {:.1} days after a top loss day",
        average_recovery_days(&daily, &extremes.losses)
    );
    if let Some((before, after)) = biggest_rebound(&daily) {
        println!(
            "Biggest rebound: {} ({:+.2}) to {} ({:+.2})",
            before.date, before.total_pnl, after.date, after.total_pnl
        );
    }

    if let Some((summary, buckets, categories)) = &holding {
        println!("\n=== Holding Time ===");
        println!(
            "Known durations: {} (avg {:.1}h, median {:.1}h)",
            summary.known_count, summary.avg_hours, summary.median_hours
        );
        for row in buckets {
            println!(
                "  {:<6} {:>5} trades  total {:+12.2}  avg {:+10.2}",
                row.label, row.stats.count, row.stats.total, row.stats.mean
            );
        }
        for row in categories {
            println!(
                "  {:<18} {:>5} trades  total {:+12.2}",
                row.category.to_label(),
                row.stats.count,
                row.stats.total
            );
        }
        if let Some(best) = most_profitable_category(categories) {
            println!(
                "Most profitable: {} (avg {:+.2})",
                best.category.to_label(),
                best.stats.mean
            );
        }
    } else {
        println!("\n(holding-time analysis skipped: no entry/exit columns in the trade log)");
    }

    if let Some(cmp) = &scenario {
        println!("\n=== What-if: filtered vs actual ===");
        println!(
            "Actual:       {:+.2} over {} trades ({:.1}% win)",
            cmp.actual.total_pnl, cmp.actual.trade_count, cmp.actual.win_rate
        );
        println!(
            "Hypothetical: {:+.2} over {} trades ({:.1}% win)",
            cmp.hypothetical.total_pnl, cmp.hypothetical.trade_count, cmp.hypothetical.win_rate
        );
        println!(
            "Delta:        {:+.2} PnL, {} trades removed, {:+.1}pp win rate",
            cmp.pnl_delta, cmp.trades_removed, cmp.win_rate_delta
        );
    }

    Ok(())
}

/// Report line for the extremum integrity check; `None` when the loss
/// and gain date-sets are disjoint (the normal case).
fn overlap_warning(overlap: &[NaiveDate]) -> Option<String> {
    if overlap.is_empty() {
        return None;
    }
    let dates: Vec<String> = overlap.iter().map(|d| d.to_string()).collect();
    Some(format!(
        "WARNING: {} date(s) appear in both extreme lists: {}",
        overlap.len(),
        dates.join(", ")
    ))
}

/// `--flag VALUE` lookup over raw args
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

/// Build the optional view filter from `--only` and `--side`.
/// Returns `None` when neither flag is present, so the default report
/// covers the full history with no scenario section.
fn build_filter(args: &[String]) -> Option<FilterConfig> {
    let only = flag_value(args, "--only");
    let side = flag_value(args, "--side");
    if only.is_none() && side.is_none() {
        return None;
    }

    let mut filter = match only {
        Some(raw) => {
            let classes: Vec<SentimentClass> = raw
                .split(',')
                .map(|label| {
                    SentimentClass::from_label(label).unwrap_or_else(|| {
                        eprintln!("--only: unknown classification '{}'", label.trim());
                        std::process::exit(1);
                    })
                })
                .collect();
            FilterConfig::with_sentiments(classes)
        }
        None => FilterConfig::all(),
    };

    if let Some(raw) = side {
        let side = Side::parse(raw).unwrap_or_else(|| {
            eprintln!("--side expects BUY or SELL, got '{}'", raw);
            std::process::exit(1);
        });
        filter = filter.with_side(side);
    }

    Some(filter)
}

fn usage() {
    eprintln!("Usage:");
    eprintln!("  dashboard-cli [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --trades PATH      Trade log CSV (default: {})", DEFAULT_TRADES);
    eprintln!(
        "  --sentiment PATH   Fear & Greed index CSV (default: {})",
        DEFAULT_SENTIMENT
    );
    eprintln!("  --after DATE       Restrict the report to trades after DATE (YYYY-MM-DD)");
    eprintln!("  --top-k N          Extreme-day list size (default: {})", DEFAULT_TOP_K);
    eprintln!("  --only CLASSES     Keep only these classifications, comma-separated");
    eprintln!("                     (e.g. \"Fear,Extreme Fear\"); adds a what-if section");
    eprintln!("  --side BUY|SELL    Keep only one trade direction; adds a what-if section");
    eprintln!("  --json             Emit the full report as JSON instead of text");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_warning_only_on_violation() {
        assert!(overlap_warning(&[]).is_none());

        let date = NaiveDate::from_ymd_opt(2024, 11, 6).unwrap();
        let line = overlap_warning(&[date]).unwrap();
        assert!(line.contains("WARNING"));
        assert!(line.contains("2024-11-06"));
    }
}
