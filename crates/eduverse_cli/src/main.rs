//! Terminal probe for the notification sync core.
//!
//! # Responsibility
//! - Exercise the HTTP gateway and synchronizer against a live portal.
//! - Print rows and the unread badge through `TextPresenter`.

use clap::{Parser, Subcommand};
use eduverse_core::{
    core_version, default_log_level, init_logging, DashboardService, HttpNotificationGateway,
    NotificationId, NotificationSynchronizer, SyncConfig, TextPresenter,
};
use std::io::Stdout;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "eduverse", version, about = "EduVerse notification sync client")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    token: Option<String>,
    #[arg(long)]
    page_size: Option<u32>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<String>,
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the core version.
    Version,
    /// Refresh once and print the notification list.
    List,
    /// Refresh, mark one notification read, and print the result.
    MarkRead { id: i64 },
    /// Fetch dashboard statistics once.
    Stats,
    /// Poll notifications and stats for a number of refresh intervals.
    Watch {
        #[arg(long, default_value_t = 3)]
        rounds: u32,
    },
}

type CliSync = NotificationSynchronizer<Arc<HttpNotificationGateway>, TextPresenter<Stdout>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| err.to_string())?;
    }

    if matches!(cli.command, Command::Version) {
        println!("eduverse_core version={}", core_version());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let gateway =
        Arc::new(HttpNotificationGateway::new(&config).map_err(|err| err.to_string())?);

    match cli.command {
        Command::Version => Ok(()),
        Command::List => {
            let sync = synchronizer(&gateway, &config);
            sync.refresh().map(|_| ()).map_err(|err| err.to_string())
        }
        Command::MarkRead { id } => {
            let sync = synchronizer(&gateway, &config);
            sync.refresh().map_err(|err| err.to_string())?;
            let outcome = sync.mark_read(NotificationId(id));
            println!("effect={:?}", outcome.effect);
            outcome.ack.map_err(|err| err.to_string())
        }
        Command::Stats => {
            let service = DashboardService::new(Arc::clone(&gateway));
            let stats = service.refresh().map_err(|err| err.to_string())?;
            println!("unread_notifications={}", stats.unread_notifications);
            if let Some(value) = stats.recent_grades {
                println!("recent_grades={value}");
            }
            if let Some(value) = stats.overdue_payments {
                println!("overdue_payments={value}");
            }
            if let Some(value) = stats.grades_given {
                println!("grades_given={value}");
            }
            Ok(())
        }
        Command::Watch { rounds } => watch(&gateway, &config, rounds),
    }
}

fn synchronizer(gateway: &Arc<HttpNotificationGateway>, config: &SyncConfig) -> CliSync {
    NotificationSynchronizer::new(
        Arc::clone(gateway),
        TextPresenter::new(std::io::stdout()),
        config.page_size,
    )
}

fn watch(
    gateway: &Arc<HttpNotificationGateway>,
    config: &SyncConfig,
    rounds: u32,
) -> Result<(), String> {
    let wait = watch_span(config.refresh_interval(), rounds).ok_or_else(|| {
        format!(
            "watch span overflows: {rounds} rounds of {}s",
            config.refresh_interval_secs
        )
    })?;

    let sync = Arc::new(synchronizer(gateway, config));
    let dashboard = Arc::new(DashboardService::new(Arc::clone(gateway)));

    let notifications_task = sync
        .spawn_polling(config.refresh_interval())
        .map_err(|err| err.to_string())?;
    let stats_task = dashboard
        .spawn_polling(config.stats_interval())
        .map_err(|err| err.to_string())?;
    std::thread::sleep(wait);

    let ticks = notifications_task.stop();
    stats_task.stop();
    println!("refresh_ticks={ticks}");
    if let Some(stats) = dashboard.latest() {
        println!("unread_notifications={}", stats.unread_notifications);
    }
    Ok(())
}

/// Time to keep the pollers alive for `rounds` notification ticks.
///
/// The first tick fires immediately, so `rounds` ticks end just after
/// `rounds - 1` full intervals. `None` when the span overflows.
fn watch_span(interval: Duration, rounds: u32) -> Option<Duration> {
    interval
        .checked_mul(rounds.saturating_sub(1))?
        .checked_add(Duration::from_millis(500))
}

fn load_config(cli: &Cli) -> Result<SyncConfig, String> {
    let mut config = match cli.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("cannot read config `{path}`: {err}"))?;
            SyncConfig::from_json_str(raw.as_str()).map_err(|err| err.to_string())?
        }
        None => SyncConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(token) = &cli.token {
        config.auth_token = Some(token.clone());
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    config.validate().map_err(|err| err.to_string())
}
