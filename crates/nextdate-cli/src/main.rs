//! nextdate CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use nextdate_core::init_tracing;

use nextdate_cli::cli::{Cli, Command, ConfigAction, TaskAction};
use nextdate_cli::commands;
use nextdate_cli::config::CliConfig;
use nextdate_cli::error::CliResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<String> {
    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let config = if cli.config.is_some() {
        CliConfig::load_from(&config_path)?
    } else {
        CliConfig::load()?
    };

    init_tracing(config.tracing_config(cli.debug))?;
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    let json = cli.json || config.output.json;

    match cli.command {
        Command::Next(args) => commands::next::next(&args, json),
        Command::Upcoming { rule, count } => {
            config.validate()?;
            let count = count.unwrap_or(config.upcoming.count);
            commands::next::upcoming(&rule, count, json)
        }
        Command::Task { action } => match action {
            TaskAction::Schedule { file, now } => commands::task::schedule(&file, now, json),
            TaskAction::Done { file, now } => commands::task::done(&file, now, json),
            TaskAction::Search { query, file, limit } => {
                config.validate()?;
                let limit = limit.unwrap_or(config.tasks.search_limit);
                commands::task::search(&query, &file, limit, json)
            }
        },
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
