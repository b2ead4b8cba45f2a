mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use kanban_core::AppConfig;
use kanban_persistence::open_board_store;
use kanban_tui::App;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = AppConfig::load();
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.effective_data_dir());

    match cli.command {
        None => {
            let store = open_board_store(&data_dir, config.effective_default_column())?;
            tracing::info!("Opened board in {}", data_dir.display());
            let mut app =
                App::new(store).with_activation_distance(config.effective_activation_distance());
            app.run().await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "kanban-board",
                &mut std::io::stdout(),
            );
        }
        Some(cmd) => {
            let mut ctx = match CliContext::open(&data_dir, &config) {
                Ok(ctx) => ctx,
                Err(e) => output::output_error(&e.to_string()),
            };

            let result = match cmd {
                Commands::Column(column_cmd) => handlers::column::handle(&mut ctx, column_cmd.action),
                Commands::Task(task_cmd) => handlers::task::handle(&mut ctx, task_cmd.action),
                Commands::Completions { .. } => Ok(()),
            };
            if let Err(e) = result {
                output::output_error(&e.to_string());
            }
        }
    }

    Ok(())
}
