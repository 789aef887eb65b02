use std::fmt::Display;
use std::panic;

use anyhow::Result;
use clap::Parser;
use tabled::{Table, Tabled, settings::Style};

use tick_scope::config::{AnalysisConfig, DERIV, MARKETS, constants};
use tick_scope::data::{ConnectionStatus, DerivProvider, fetch_history_with_retry};
use tick_scope::engine::ScopeEngine;
use tick_scope::models::{FrequencyTable, ModeReport, PatternSummary, ScopeSnapshot};
use tick_scope::utils::epoch_ms_to_time_string;
use tick_scope::Cli;

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Warn, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("tick_scope"), my_code_level)
        .init();

    let args = Cli::parse();
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    if !MARKETS.iter().any(|m| m.symbol == args.market) {
        log::warn!(
            "{} is not in the built-in market list; passing it through as-is",
            args.market
        );
    }

    let app_id = args
        .app_id
        .clone()
        .unwrap_or_else(|| DERIV.ws.default_app_id.to_string());

    // One-time warmup batch. Fills the whole buffer so every range is
    // selectable without refetching.
    let provider = DerivProvider::new(app_id.clone());
    let history =
        fetch_history_with_retry(&provider, &args.market, constants::BUFFER_CAPACITY).await?;

    let mut engine = if args.once {
        ScopeEngine::offline()
    } else {
        ScopeEngine::live(&args.market, &app_id)
    };
    engine.update_config(AnalysisConfig {
        mode: args.mode,
        range: args.range,
    });
    engine.seed_history(history);

    render(&engine, &args)?;

    if args.once {
        return Ok(());
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down...");
                engine.shutdown();
                break;
            }
            _ = tokio::time::sleep(constants::POLL_INTERVAL) => {
                if engine.process_live_data() {
                    render(&engine, &args)?;
                }
            }
        }
    }

    Ok(())
}

fn render(engine: &ScopeEngine, args: &Cli) -> Result<()> {
    let Some(snapshot) = engine.snapshot() else {
        return Ok(());
    };

    if args.json {
        if args.all {
            println!(
                "{}",
                serde_json::to_string_pretty(&engine.reports_for_all_modes())?
            );
        } else {
            println!("{}", serde_json::to_string_pretty(&*snapshot)?);
        }
        return Ok(());
    }

    let status = if args.once {
        None
    } else {
        Some(engine.connection_status())
    };
    print_header(&snapshot, &args.market, status, engine.last_error());
    println!("{}", frequency_table(&snapshot.frequency));

    if args.all {
        for report in engine.reports_for_all_modes() {
            print_report(&report);
        }
    } else {
        print_report(&snapshot.report);
    }

    println!("{}", "=".repeat(64));
    Ok(())
}

fn print_header(
    snapshot: &ScopeSnapshot,
    market: &str,
    status: Option<ConnectionStatus>,
    last_error: Option<&str>,
) {
    let label = MARKETS
        .iter()
        .find(|m| m.symbol == market)
        .map(|m| m.label)
        .unwrap_or(market);

    let status_text = status.map(|s| format!(" [{}]", s)).unwrap_or_default();
    println!("\n{} ({}){}", label, market, status_text);

    match snapshot.last_tick {
        Some(tick) => println!(
            "Last tick: {:.2} (digit {}) at {} | {} ticks in range {}",
            tick.quote,
            snapshot.last_digit.unwrap_or(0),
            epoch_ms_to_time_string(tick.epoch_ms),
            snapshot.tick_count,
            snapshot.range,
        ),
        None => println!("Waiting for first tick..."),
    }

    if let Some(err) = last_error {
        println!("Warning: {}", err);
    }
}

#[derive(Tabled)]
struct DigitRow {
    #[tabled(rename = "Digit")]
    digit: u8,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

fn frequency_table(table: &FrequencyTable) -> String {
    let rows: Vec<DigitRow> = table
        .stats
        .iter()
        .map(|s| DigitRow {
            digit: s.digit,
            count: s.count,
            share: format!("{:.2}%", s.pct),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn print_report(report: &ModeReport) {
    let title = report.mode().to_string();
    match report {
        ModeReport::EvenOdd(r) => {
            print_summary(&title, &r.summary);
        }
        ModeReport::OverUnder(r) => {
            print_summary(&title, &r.summary);
            println!("  Midpoint: {:.2}", r.midpoint);
            print_breakdown("Over", &r.over_digits, "Under", &r.under_digits);
        }
        ModeReport::MatchDiffer(r) => {
            print_summary(&title, &r.summary);
            print_breakdown("Match", &r.match_digits, "Differ", &r.differ_digits);
        }
        ModeReport::RiseFall(r) => {
            print_summary(&title, &r.summary);
            print_breakdown("Rise", &r.rise_digits, "Fall", &r.fall_digits);
        }
    }
}

fn print_summary<C: Display + Copy>(title: &str, summary: &PatternSummary<C>) {
    let [a, b] = &summary.buckets;
    println!("\n{} ({} classified)", title, summary.total());
    println!(
        "  {} {} ({:.2}%) | {} {} ({:.2}%)",
        a.category, a.count, a.pct, b.category, b.count, b.pct
    );

    let trend = summary
        .trend
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());
    let streak = match summary.streak.category {
        Some(c) => format!("{} x{}", c, summary.streak.length),
        None => "-".to_string(),
    };
    println!("  Trend: {} | Streak: {}", trend, streak);

    if !summary.categories.is_empty() {
        let skip = summary
            .categories
            .len()
            .saturating_sub(constants::RECENT_CATEGORIES_LEN);
        let recent: Vec<String> = summary.categories[skip..]
            .iter()
            .map(|c| c.to_string().chars().next().unwrap_or('?').to_string())
            .collect();
        println!("  Recent: {}", recent.join(" "));
    }
}

fn print_breakdown(a_name: &str, a: &FrequencyTable, b_name: &str, b: &FrequencyTable) {
    println!("  {} digits ({} ticks):", a_name, a.total);
    println!("{}", frequency_table(a));
    println!("  {} digits ({} ticks):", b_name, b.total);
    println!("{}", frequency_table(b));
}
