use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use focusflow_local_store::LocalStore;
use focusflow_tui::RunOptions;

#[derive(Parser)]
#[command(
    name = "focusflow",
    version,
    about = "FocusFlow - a task dashboard built for focus"
)]
struct Cli {
    /// Server URL (overrides the config file)
    #[arg(long)]
    server: Option<String>,

    /// Log file path (default: focusflow.log next to the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file);
    focusflow_tui::run(RunOptions {
        server_url: cli.server,
    })
}

/// Warnings go to a file; the terminal itself is the UI.
fn init_tracing(log_file: Option<PathBuf>) {
    let Some(path) = log_file.or_else(default_log_path) else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}

fn default_log_path() -> Option<PathBuf> {
    let store = LocalStore::open().ok()?;
    Some(store.path().with_file_name("focusflow.log"))
}
