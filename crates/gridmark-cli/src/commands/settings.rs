//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, GridVerb};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use tracing_subscriber::EnvFilter;

/// Execute the config command.
pub fn execute_settings(args: ConfigArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_settings(config, formatter),
        ConfigAction::Verb { verb } => set_verb(config, verb.into(), formatter),
        ConfigAction::LogLevel { level } => set_log_level(config, level, formatter),
    }
}

/// Show current settings.
fn show_settings(config: &Config, formatter: &Formatter) -> Result<()> {
    if let Some(path) = config.path() {
        println!("{}", formatter.info(&format!("Config file: {}", path.display())));
    }
    let contents = toml::to_string_pretty(&config.settings)
        .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{}", contents);
    Ok(())
}

/// Set the grid verb.
fn set_verb(config: &mut Config, verb: GridVerb, formatter: &Formatter) -> Result<()> {
    config.set_grid_verb(verb)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Picking a cell now enters '{}'",
            gridmark_domain::RelationValue::from(verb)
        ))
    );
    Ok(())
}

/// Set the default log filter.
fn set_log_level(config: &mut Config, level: String, formatter: &Formatter) -> Result<()> {
    EnvFilter::try_new(&level)
        .map_err(|e| CliError::InvalidInput(format!("Invalid log filter '{}': {}", level, e)))?;
    config.settings.log_level = level.clone();
    config.save()?;
    println!("{}", formatter.success(&format!("Log level set to '{}'", level)));
    Ok(())
}
