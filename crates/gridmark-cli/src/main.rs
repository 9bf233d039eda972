//! Gridmark CLI - Terminal front end for logic puzzle relation grids.

use clap::Parser;
use gridmark_cli::commands;
use gridmark_cli::repl;
use gridmark_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> gridmark_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    // Initialize tracing (log to stderr); RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    config.save_if_missing();

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match (cli.command, cli.puzzle) {
        (Some(Command::Layout(args)), _) => commands::execute_layout(args, &formatter)?,
        (Some(Command::Show(args)), _) => commands::execute_show(args, &formatter)?,
        (Some(Command::Replay(args)), _) => commands::execute_replay(args, &formatter)?,
        (Some(Command::Play(args)), _) => repl::run_repl(&args.puzzle, &mut config, &formatter)?,
        (Some(Command::Config(args)), _) => {
            commands::execute_settings(args, &mut config, &formatter)?
        }
        // Default: mark the given puzzle interactively
        (None, Some(puzzle)) => repl::run_repl(&puzzle, &mut config, &formatter)?,
        (None, None) => {
            return Err(gridmark_cli::CliError::InvalidInput(
                "No puzzle given; run `gridmark --help` for usage".to_string(),
            ))
        }
    }

    Ok(())
}
