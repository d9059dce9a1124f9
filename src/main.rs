// src/main.rs

//! offerdesk: academic scheduling administration CLI
//!
//! Entry point wiring config, locale, and the REST client into the
//! command runners.

use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use offerdesk::commands::{
    run_fetch, run_request_create, run_request_delete, run_sections, run_validate, run_watch,
    SetOverride,
};
use offerdesk::error::{AppError, Result};
use offerdesk::models::{Config, LocaleConfig};
use offerdesk::services::ApiClient;
use offerdesk::utils::log;

#[derive(Parser, Debug)]
#[command(
    name = "offerdesk",
    version,
    about = "Administration client for academic scheduling"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[arg(long, default_value = "data/locale.toml")]
    locale: String,

    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// List entities from the scheduling service
    Fetch {
        /// One of: faculties, periods, professors, modules, subjects, requests
        target: String,
        /// Faculty id (required for the requests target)
        #[arg(long)]
        faculty: Option<String>,
    },
    /// Draft sections from a plan file and submit the batch
    Sections {
        #[arg(long, default_value = "data/plan.toml")]
        plan: String,
        /// Count override, `<number>:<kind>=<count>` (repeatable)
        #[arg(long = "set")]
        set: Vec<String>,
        /// Print the derived batch without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// Create or delete staffing requests
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },
    /// Follow the live change feed
    Watch {
        /// Warm the cache for this faculty before watching
        #[arg(long)]
        faculty: Option<String>,
        /// Mark every notification read before the final summary
        #[arg(long)]
        ack_all: bool,
    },
    /// Validate configuration and plan files
    Validate {
        #[arg(long)]
        plan: Option<String>,
    },
}

/// Staffing request actions
#[derive(Subcommand, Debug)]
enum RequestAction {
    /// Create a staffing request
    Create {
        #[arg(long)]
        faculty: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        professor: Option<String>,
    },
    /// Delete a staffing request
    Delete { id: String },
}

/// Main entry point
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    let locale = LocaleConfig::load_or_default(&cli.locale);

    if cli.quiet {
        config.logging.level = "warn".to_string();
        config.logging.show_detail = false;
    }

    // Console output goes through utils::log; the log crate macros are
    // diagnostics only and land in env_logger (RUST_LOG).
    let _ = env_logger::try_init();
    log::init(&locale, &config.logging.level);

    if let Err(e) = run(cli, config, locale).await {
        log::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config, locale: LocaleConfig) -> Result<()> {
    match cli.command {
        Command::Fetch { target, faculty } => {
            let target = target.parse().map_err(AppError::Validation)?;
            let api = make_api(&config)?;
            run_fetch(
                &api,
                &locale,
                config.logging.show_detail,
                target,
                faculty.as_deref(),
            )
            .await?;
        }
        Command::Sections { plan, set, dry_run } => {
            let overrides = parse_overrides(&set)?;
            let api = make_api(&config)?;
            run_sections(&api, &locale, Path::new(&plan), &overrides, dry_run).await?;
        }
        Command::Request { action } => {
            let api = make_api(&config)?;
            match action {
                RequestAction::Create {
                    faculty,
                    subject,
                    professor,
                } => {
                    run_request_create(&api, &locale, &faculty, &subject, professor.as_deref())
                        .await?;
                }
                RequestAction::Delete { id } => {
                    run_request_delete(&api, &locale, &id).await?;
                }
            }
        }
        Command::Watch { faculty, ack_all } => {
            let api = make_api(&config)?;
            run_watch(&api, &config, &locale, faculty.as_deref(), ack_all).await?;
        }
        Command::Validate { plan } => {
            run_validate(
                &locale,
                Path::new(&cli.config),
                Path::new(&cli.locale),
                plan.as_deref().map(Path::new),
            )?;
        }
    }

    Ok(())
}

fn make_api(config: &Config) -> Result<ApiClient> {
    config.validate()?;
    ApiClient::new(Arc::new(config.clone()))
}

fn parse_overrides(raw: &[String]) -> Result<Vec<SetOverride>> {
    raw.iter()
        .map(|s| s.parse::<SetOverride>().map_err(AppError::Validation))
        .collect()
}
