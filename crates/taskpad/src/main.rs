/*
[INPUT]:  CLI arguments, optional YAML configuration file, keyboard input
[OUTPUT]: Running task-entry TUI and optional JSON dump of the session
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod app;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use taskpad::{AppConfig, TaskStore};

use crate::app::App;
use crate::app::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "taskpad", version, about = "Terminal task-entry pad")]
struct Cli {
    /// Optional YAML configuration file
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Log destination; stdout belongs to the TUI
    #[arg(long = "log-file", value_name = "PATH", default_value = "taskpad.log")]
    log_file: PathBuf,
    /// Print the session's tasks as JSON on exit
    #[arg(long = "dump")]
    dump: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let _log_guard = init_tracing(&args.log_level, &args.log_file)?;

    let config = load_config(args.config_path.as_deref())?;
    info!(tick_ms = config.tick_ms, "starting taskpad");

    let store = Arc::new(TaskStore::new());
    let state = AppState::new(store.clone(), config).await;

    let mut terminal = ratatui::init();
    let result = App::new(state).run(&mut terminal).await;
    ratatui::restore();
    result?;

    let records = store.snapshot().await;
    info!(task_count = records.len(), "session finished");

    if args.dump {
        let json = serde_json::to_string_pretty(&records).context("serialize session tasks")?;
        println!("{json}");
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path).context("load config"),
        None => Ok(AppConfig::default()),
    }
}

fn init_tracing(log_level: &str, log_file: &Path) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let directory = log_file.parent().filter(|p| !p.as_os_str().is_empty());
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow!("log file path has no file name"))?;
    let appender = tracing_appender::rolling::never(
        directory.unwrap_or_else(|| Path::new(".")),
        file_name,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
