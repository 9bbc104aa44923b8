//! insights-runner: headless runner for the customer insights dataset.
//!
//! Usage:
//!   insights-runner --data sample_data.csv
//!   insights-runner --config insights.json --ipc-mode
//!
//! In IPC mode, one JSON request per stdin line, one JSON reply per stdout
//! line. Logs go to stderr (RUST_LOG controls verbosity).

use anyhow::Result;
use chrono::NaiveDate;
use insights_core::{
    analytics,
    config::InsightsConfig,
    loader::DatasetLoader,
    query::{query_records, PageRequest, RecordFilter},
    store::{Dataset, DatasetStore},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Health,
    RawRecords,
    InvalidRecords,
    Summary,
    Records {
        page: Option<u64>,
        page_size: Option<u64>,
        subscription_status: Option<String>,
        min_health: Option<i64>,
        search: Option<String>,
    },
    HealthByStatus,
    RevenueByStatus,
    NotificationsOverTime {
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    },
    Reload,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => InsightsConfig::load(path)?,
        None => InsightsConfig::default(),
    };
    if let Some(data) = flag_value(&args, "--data") {
        config.data_file = data.into();
    }

    if !ipc_mode {
        println!("Customer Insights — insights-runner");
        println!("  data:      {}", config.data_file.display());
        println!("  calendar:  {} (+{} day cycle)", config.calendar.start, config.calendar.cycle_days);
        println!();
    }

    let loader = DatasetLoader::from_config(&config);
    let store = DatasetStore::load(&loader)?;

    if ipc_mode {
        run_ipc_loop(&store, &loader, &config)?;
    } else {
        print_summary(&*store.snapshot()?)?;
    }

    Ok(())
}

fn run_ipc_loop(store: &DatasetStore, loader: &DatasetLoader, config: &InsightsConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match handle_line(store, loader, config, &buffer) {
            Reply::Quit => break,
            Reply::Line(reply) => {
                writeln!(stdout, "{}", reply)?;
                stdout.flush()?;
            }
        }
    }
    Ok(())
}

/// Outcome of one request line.
#[derive(Debug, PartialEq)]
enum Reply {
    Line(String),
    Quit,
}

/// Answer one request line. Every failure becomes an `{"error": …}` reply;
/// the loop only stops on quit or EOF.
fn handle_line(
    store: &DatasetStore,
    loader: &DatasetLoader,
    config: &InsightsConfig,
    line: &str,
) -> Reply {
    let cmd: IpcCommand = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => return Reply::Line(error_reply(e)),
    };

    if matches!(cmd, IpcCommand::Quit) {
        return Reply::Quit;
    }

    match handle_command(store, loader, config, cmd) {
        Ok(reply) => Reply::Line(reply),
        Err(e) => {
            log::warn!("Request failed: {e}");
            Reply::Line(error_reply(e))
        }
    }
}

fn error_reply(e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

// Replies are written with to_string: u128 totals do not fit serde_json::Value.
fn handle_command(
    store: &DatasetStore,
    loader: &DatasetLoader,
    config: &InsightsConfig,
    cmd: IpcCommand,
) -> Result<String> {
    let snapshot = store.snapshot()?;

    let reply = match cmd {
        IpcCommand::Health => serde_json::to_string(&analytics::health_check(&snapshot))?,
        IpcCommand::RawRecords => serde_json::to_string(&snapshot.records)?,
        IpcCommand::InvalidRecords => serde_json::to_string(&snapshot.invalid_rows)?,
        IpcCommand::Summary => serde_json::to_string(&analytics::summary(&snapshot.insights))?,
        IpcCommand::Records {
            page,
            page_size,
            subscription_status,
            min_health,
            search,
        } => {
            let request = PageRequest::new(
                page.unwrap_or(1),
                page_size.unwrap_or(config.default_page_size),
            )?;
            let filter = RecordFilter {
                subscription_status,
                min_health,
                search,
            };
            filter.validate()?;
            serde_json::to_string(&query_records(&snapshot.insights, &filter, request))?
        }
        IpcCommand::HealthByStatus => {
            serde_json::to_string(&analytics::health_by_status(&snapshot.insights))?
        }
        IpcCommand::RevenueByStatus => {
            serde_json::to_string(&analytics::revenue_by_status(&snapshot.insights))?
        }
        IpcCommand::NotificationsOverTime { start_date, end_date } => serde_json::to_string(
            &analytics::notifications_over_time(&snapshot.insights, start_date, end_date),
        )?,
        IpcCommand::Reload => {
            let fresh = store.reload(loader)?;
            serde_json::to_string(&analytics::health_check(&fresh))?
        }
        IpcCommand::Quit => unreachable!("quit is answered by handle_line"),
    };
    Ok(reply)
}

fn print_summary(dataset: &Dataset) -> Result<()> {
    let s = analytics::summary(&dataset.insights);

    println!("=== LOAD SUMMARY ===");
    println!("  records loaded:  {}", dataset.records_loaded());
    println!("  invalid rows:    {}", dataset.invalid_count());
    for invalid in dataset.invalid_rows.iter().take(5) {
        println!("    row {:>4}: {}", invalid.row_number, invalid.error);
    }

    println!();
    println!("=== ACCOUNT KPIs ===");
    println!("  accounts:        {} ({} active, {} inactive)", s.total_accounts, s.active_accounts, s.inactive_accounts);
    println!("  billed:          {} (avg {:.2} per active)", s.total_notifications_billed, s.avg_notifications_billed_per_active);
    println!("  messages:        {} (avg {:.2} per account)", s.total_messages_processed, s.avg_messages_per_account);
    println!("  avg health:      {:.2}", s.avg_health_score);

    println!();
    println!("=== CHURN RISK ===");
    let revenue = analytics::revenue_by_status(&dataset.insights);
    for (health, billed) in analytics::health_by_status(&dataset.insights).iter().zip(revenue.iter()) {
        println!(
            "  {:<8} | Accounts: {:>5} | Billed: {:>10}",
            health.status, health.account_count, billed.total_notifications_billed
        );
    }

    println!();
    println!("=== NOTIFICATIONS BY REPORT DATE ===");
    let series = analytics::notifications_over_time(&dataset.insights, None, None);
    if series.is_empty() {
        println!("  (No records loaded)");
    } else {
        for point in &series {
            println!("  {} | {}", point.date, point.total_notifications_billed);
        }
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
