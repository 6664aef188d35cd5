//! CLI entry point for queuepad
//!
//! Parses request files and prints commands, planned requests, lint results
//! or the outline as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use queuepad::application::Invocation;
use queuepad::lint;
use queuepad::{Command, Settings, outline};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "queuepad")]
#[command(version)]
#[command(about = "Parse, check and plan queue request files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile for blocks without a `profile:` line
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Region for blocks without a `region:` line
    #[arg(long, global = true)]
    region: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print parsed commands
    Parse { file: PathBuf },
    /// Print the queue request each command maps to
    Plan { file: PathBuf },
    /// Check commands; exits non-zero when errors are found
    Lint { file: PathBuf },
    /// Print run actions and the symbol tree
    Outline { file: PathBuf },
}

#[derive(Serialize)]
struct PlanEntry {
    line: usize,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    invocation: Option<Invocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Outline {
    code_lenses: Vec<outline::CodeLens>,
    symbols: Vec<outline::DocumentSymbol>,
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "queuepad=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = load_settings(&cli)?;

    match &cli.command {
        Commands::Parse { file } => {
            let commands = read_commands(file, &settings)?;
            print_json(&commands)?;
        }
        Commands::Plan { file } => {
            let commands = read_commands(file, &settings)?;
            let plan: Vec<PlanEntry> = commands.iter().map(plan_entry).collect();
            print_json(&plan)?;
        }
        Commands::Lint { file } => {
            let commands = read_commands(file, &settings)?;
            let result = lint::lint_with_config(&commands, &settings.lint);

            for issue in &result.issues {
                eprintln!(
                    "{}:{}: {} [{}] {}",
                    file.display(),
                    issue.line,
                    issue.level.as_str(),
                    issue.category,
                    issue.message
                );
            }
            print_json(&result)?;

            if result.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Outline { file } => {
            let commands = read_commands(file, &settings)?;
            print_json(&Outline {
                code_lenses: outline::code_lenses(&commands),
                symbols: outline::document_symbols(&commands),
            })?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Settings file, then environment, then command-line flags
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .with_process_env();

    if let Some(profile) = &cli.profile {
        settings.default_profile = profile.clone();
    }
    if let Some(region) = &cli.region {
        settings.default_region = region.clone();
    }

    settings.validate()?;
    Ok(settings)
}

fn read_commands(path: &Path, settings: &Settings) -> anyhow::Result<Vec<Command>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file '{}'", path.display()))?;

    let commands = queuepad::parse_with(&text, &settings.defaults());
    log::info!(
        "Parsed {} command(s) from {}",
        commands.len(),
        path.display()
    );
    Ok(commands)
}

fn plan_entry(command: &Command) -> PlanEntry {
    let (invocation, error) = match Invocation::try_from(command) {
        Ok(invocation) => (Some(invocation), None),
        Err(err) => (None, Some(err.to_string())),
    };

    PlanEntry {
        line: command.range.start_line + 1,
        title: command.title(),
        invocation,
        error,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
