use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

use readyrs::acwr::AcwrInterpretation;
use readyrs::config::AppConfig;
use readyrs::engine::ReadinessEngine;
use readyrs::logging::{init_logging, LogLevel};
use readyrs::models::{ExerciseType, ProgressionRequest};
use readyrs::server::{serve, AppState};
use readyrs::store::MemoryStore;

/// readyrs - Training Readiness & Progression Engine
///
/// Computes a normalized readiness score from training history and
/// recovery signals, and recommends the load for the next session.
#[derive(Parser)]
#[command(name = "readyrs")]
#[command(version = "0.1.0")]
#[command(about = "Training readiness and load progression engine", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON history file to serve from
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },

    /// Evaluate one progression request from a history file
    Suggest {
        /// JSON history file
        #[arg(long, value_name = "FILE")]
        history: PathBuf,

        /// User identifier
        #[arg(short, long)]
        user: String,

        /// Current session load
        #[arg(short, long)]
        load: Decimal,

        /// Exercise category (compound, isolation, cardio, power)
        #[arg(short, long, default_value = "compound")]
        exercise: ExerciseType,

        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the raw JSON response instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    Init {
        /// Destination path (defaults to the platform config dir)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    let mut log_config = config.log.clone();
    log_config.level = match cli.verbose {
        0 => log_config.level,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };
    init_logging(&log_config)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            history,
        } => {
            let store = match history {
                Some(path) => MemoryStore::from_json_file(&path)
                    .with_context(|| format!("failed to load history from {}", path.display()))?,
                None => MemoryStore::new(),
            };

            let mut server_config = config.clone();
            if let Some(host) = host {
                server_config.server.host = host;
            }
            if let Some(port) = port {
                server_config.server.port = port;
            }

            let addr = server_config
                .bind_addr()
                .parse()
                .with_context(|| format!("invalid bind address {}", server_config.bind_addr()))?;

            println!(
                "{}",
                format!("Serving readiness API on {}", addr).green().bold()
            );

            let state = AppState::new(
                ReadinessEngine::with_config(server_config.acwr.clone()),
                Arc::new(store),
            );
            serve(state, addr, &server_config.server.cors_allowed_origins).await?;
        }

        Commands::Suggest {
            history,
            user,
            load,
            exercise,
            date,
            json,
        } => {
            let store = MemoryStore::from_json_file(&history)
                .with_context(|| format!("failed to load history from {}", history.display()))?;

            let as_of = match date {
                Some(d) => d
                    .and_hms_opt(0, 0, 0)
                    .context("invalid evaluation date")?
                    .and_utc(),
                None => Utc::now(),
            };

            let request = ProgressionRequest {
                user_id: user,
                current_load: load,
                exercise_type: exercise,
                days_since_last: 1,
            };

            let engine = ReadinessEngine::with_config(config.acwr.clone());
            let response = engine.evaluate(&store, &request, as_of)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let interpretation = Decimal::from_f64(response.acwr)
                    .map(AcwrInterpretation::from_ratio)
                    .unwrap_or(AcwrInterpretation::Optimal);

                println!("{}", "Readiness assessment".blue().bold());
                println!("  Readiness index: {:.2}", response.readiness_index);
                println!(
                    "  ACWR: {:.2} ({})",
                    response.acwr,
                    interpretation.description()
                );
                println!(
                    "  Sessions: {} last 7 days, {} last 28 days",
                    response.metrics.sessions_last_7_days, response.metrics.sessions_last_28_days
                );
                println!();
                println!("{}", "Suggestion".green().bold());
                println!(
                    "  {} -> {} ({:+.2}%)",
                    request.current_load,
                    response.progression.suggested_load,
                    response.progression.load_change_percent
                );
                println!("  {}", response.progression.recommendation.bold());
                println!("  Reasoning: {}", response.progression.reasoning);
                println!(
                    "  Confidence: {:.0}%",
                    response.progression.confidence * 100.0
                );
            }
        }

        Commands::Init { path } => {
            let path = path.unwrap_or_else(AppConfig::default_path);
            AppConfig::default().save(&path)?;
            println!(
                "{}",
                format!("✓ Wrote default config to {}", path.display()).green()
            );
        }
    }

    Ok(())
}
