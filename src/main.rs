use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::analytics::{by_month, by_year, compute_summary, equity_curve, PeriodOrder};
use trade_journal::config::Config;
use trade_journal::journal::{LoadStatus, TradeJournalStore};
use trade_journal::models::TradeRecord;

fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let (store, report) = TradeJournalStore::open(&cfg.journal_file);
    match report.status {
        LoadStatus::NotFound => {
            println!(
                "No journal found at {} yet. Record your first closed trade.",
                store.path().display()
            );
            return Ok(());
        }
        LoadStatus::ParseFailure => {
            println!(
                "Journal at {} could not be read as a trade table; starting from an empty view.",
                store.path().display()
            );
            return Ok(());
        }
        LoadStatus::PartialParse { dropped } => {
            println!("Note: {dropped} malformed row(s) were skipped on load.\n");
        }
        LoadStatus::Clean => {}
    }

    let records = store.records();
    if records.is_empty() {
        println!("Journal is empty. Record your first closed trade.");
        return Ok(());
    }

    print_report(records, cfg.equity_tail);
    Ok(())
}

fn print_report(records: &[TradeRecord], equity_tail: usize) {
    let summary = compute_summary(records);

    println!("=== Trading Performance ===");
    println!("Total trades:     {}", summary.total_trades);
    println!("Total P/L:        {:+.2}", summary.total_pl);
    println!("Win rate:         {:.1}%", summary.win_rate);
    println!("Avg gain:         {:.2}%", summary.avg_gain);
    println!("Avg loss:         {:.2}%", summary.avg_loss);
    println!("G/L ratio:        1 : {:.2}", summary.gl_ratio);
    println!("Expectancy/trade: {:+.2}%", summary.expectancy);
    println!();

    // Minervini's structural check: below 1:2 the edge is fragile.
    if summary.gl_ratio < 2.0 {
        println!(
            "Warning: G/L ratio is {:.2}. Aim for at least 1:2 — cut losses shorter or let winners run longer.",
            summary.gl_ratio
        );
    } else {
        println!("G/L ratio at or above 1:2 — healthy trend-following structure.");
    }
    println!();

    println!("=== Monthly ===");
    for (month, s) in by_month(records, PeriodOrder::NewestFirst) {
        println!(
            "{month}  trades {:>3}  P/L {:>+10.2}  win {:>5.1}%  expectancy {:>+6.2}%",
            s.total_trades, s.total_pl, s.win_rate, s.expectancy
        );
    }
    println!();

    println!("=== Yearly ===");
    for (year, s) in by_year(records, PeriodOrder::NewestFirst) {
        println!(
            "{year}  trades {:>3}  P/L {:>+10.2}  win {:>5.1}%  expectancy {:>+6.2}%",
            s.total_trades, s.total_pl, s.win_rate, s.expectancy
        );
    }
    println!();

    let curve = equity_curve(records);
    let start = curve.len().saturating_sub(equity_tail);
    println!("=== Equity Curve (last {}) ===", curve.len() - start);
    for point in &curve[start..] {
        println!("{}  {:>+10.2}", point.date, point.cumulative_pl);
    }
    println!();

    println!("=== Trades (newest first) ===");
    let mut listing: Vec<&TradeRecord> = records.iter().collect();
    listing.sort_by_key(|r| std::cmp::Reverse(r.date));
    for r in listing {
        println!(
            "{}  {:<8}  ROI {:>+7.2}%  P/L {:>+10.2}  {}",
            r.date, r.ticker, r.roi_percent, r.pl_amount, r.memo
        );
    }
}
