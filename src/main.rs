use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use vdotrs::config::AppConfig;
use vdotrs::display;
use vdotrs::export::{self, ExportFormat};
use vdotrs::error::ErrorSeverity;
use vdotrs::logging::init_logging;
use vdotrs::{LogFormat, LogLevel, TableSweep, VdotError};

/// vdotrs - VDOT Calculator CLI
///
/// Computes a VDOT fitness score from a race result and projects equivalent
/// race times and training paces.
#[derive(Parser)]
#[command(name = "vdotrs")]
#[command(author = "vdotrs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "VDOT calculator and pace tables", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log level (error, warn, info, debug, trace); overrides -v
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate VDOT from a race time and show equivalent paces
    Calculate {
        /// Race event (800m, 1600m, 3200m, 5K, 10K, Half Marathon, Marathon)
        #[arg(short, long)]
        event: Option<String>,

        /// Finish time (MM:SS or HH:MM:SS)
        #[arg(short, long)]
        time: String,

        /// Print the calculation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show equivalent paces for a VDOT score
    Paces {
        /// VDOT score
        #[arg(long)]
        vdot: f64,

        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the VDOT reference table
    Table {
        /// Highest VDOT in the table
        #[arg(long)]
        upper: Option<f64>,

        /// Lowest VDOT in the table
        #[arg(long)]
        lower: Option<f64>,

        /// Decrement between rows
        #[arg(long)]
        step: Option<f64>,

        /// Export format (text, csv, json); defaults to the output extension or text
        #[arg(short = 'f', long)]
        format: Option<String>,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported events and training paces
    Events,

    /// Manage the configuration file
    Config {
        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Print the active configuration
        #[arg(long)]
        show: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let vdot_err = err.downcast_ref::<VdotError>();

            match vdot_err.map(VdotError::severity) {
                Some(ErrorSeverity::Warning) => tracing::warn!(error = %err, "Invalid input"),
                _ => tracing::error!(error = ?err, "Command failed"),
            }

            match vdot_err {
                Some(vdot_err) if vdot_err.is_input_error() => {
                    eprintln!("{} {}", "Error:".red().bold(), vdot_err.user_message());
                }
                _ => eprintln!("{} {:#}", "Error:".red().bold(), err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // `config --init` must not require the file it is about to create
    let (config, config_warning) = if matches!(cli.command, Commands::Config { init: true, .. }) {
        (AppConfig::default(), None)
    } else {
        AppConfig::load(cli.config.as_deref())?
    };

    let log_config = config
        .logging
        .clone()
        .with_verbosity(cli.verbose)
        .with_overrides(cli.log_level, cli.log_format);
    init_logging(&log_config)?;

    if let Some(warning) = config_warning {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }

    match cli.command {
        Commands::Calculate { event, time, json } => {
            let calculator = config.calculator()?;
            let event = event.unwrap_or_else(|| config.defaults.event.clone());
            let calculation = calculator.calculate(&event, &time)?;

            if json {
                export::json::write_json(&calculation, io::stdout().lock())?;
            } else {
                println!("{}", display::render_calculation(&calculation));
            }
        }

        Commands::Paces { vdot, json } => {
            let calculator = config.calculator()?;
            let projection = calculator.project(vdot, None)?;

            if json {
                export::json::write_json(&projection, io::stdout().lock())?;
            } else {
                println!("{}", display::render_projection(&projection));
            }
        }

        Commands::Table {
            upper,
            lower,
            step,
            format,
            output,
        } => {
            let calculator = config.calculator()?;
            let sweep = TableSweep::new(
                upper.unwrap_or(config.table.upper),
                lower.unwrap_or(config.table.lower),
                step.unwrap_or(config.table.step),
            );
            let rows = calculator.table(&sweep)?;

            let format = match format {
                Some(format) => format.parse::<ExportFormat>()?,
                None => output
                    .as_deref()
                    .and_then(ExportFormat::from_path)
                    .unwrap_or(ExportFormat::Text),
            };

            match output {
                Some(path) => {
                    export::export_table_to_file(&rows, format, &path)?;
                    println!(
                        "{} {} rows written to {}",
                        "✓".green(),
                        rows.len(),
                        path.display()
                    );
                }
                None => {
                    export::export_table(&rows, format, io::stdout().lock())?;
                }
            }
        }

        Commands::Events => {
            let calculator = config.calculator()?;
            println!(
                "{}",
                display::formula_table("Race events", calculator.solver().table())
            );
            println!(
                "{}",
                display::formula_table("Training paces", calculator.projector().table())
            );
        }

        Commands::Config { init, show } => {
            let path = cli.config.unwrap_or_else(AppConfig::default_config_path);

            if init {
                if path.exists() {
                    anyhow::bail!("Config file already exists: {}", path.display());
                }
                let mut fresh = config.clone();
                fresh.save_to_file(&path)?;
                println!("{} Wrote {}", "✓".green(), path.display());
            }

            if show || !init {
                let content = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                println!("{}", format!("# {}", path.display()).dimmed());
                println!("{}", content);
            }
        }
    }

    Ok(())
}
