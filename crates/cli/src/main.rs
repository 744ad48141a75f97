//! ErrorCat CLI - report errors to the configured sink from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use errorcat_core::{
    ErrorCat, FingerprintPolicy, Level, ReportableError, ReporterConfig, ReportingHint,
};
use errorcat_infra_rollbar::config::{DEFAULT_ENDPOINT, DEFAULT_ENVIRONMENT};
use errorcat_infra_rollbar::{RollbarConfig, RollbarSink};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "errorcat")]
#[command(about = "ErrorCat error reporting CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    rollbar: RollbarArgs,
}

#[derive(Args)]
struct RollbarArgs {
    /// Rollbar project access token
    #[arg(long, env = "ROLLBAR_KEY", hide_env_values = true, global = true)]
    access_token: Option<String>,

    /// Environment reported with each item ("test" disables reporting)
    #[arg(long, env = "ERRORCAT_ENV", default_value = DEFAULT_ENVIRONMENT, global = true)]
    environment: String,

    /// Rollbar item endpoint
    #[arg(long, env = "ROLLBAR_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Code branch
    #[arg(long, env = "ROLLBAR_OPTIONS_BRANCH", global = true)]
    branch: Option<String>,

    /// Commit the running code was built from
    #[arg(long, env = "ERRORCAT_CODE_VERSION", global = true)]
    code_version: Option<String>,

    /// Project root directory
    #[arg(long, env = "ERRORCAT_ROOT_DIR", global = true)]
    root: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a single error
    Report(ReportArgs),

    /// List severity levels and their weights
    Levels,

    /// Show whether reporting is enabled with the current settings
    Check,
}

#[derive(Args)]
struct ReportArgs {
    /// Error message
    #[arg(short, long)]
    message: String,

    /// Error preset
    #[arg(short, long, value_enum, default_value = "base")]
    kind: KindArg,

    /// Level hint (ignored by presets that force a level)
    #[arg(short, long)]
    level: Option<String>,

    /// Grouping fingerprint (JSON values are stringified canonically)
    #[arg(short, long)]
    fingerprint: Option<String>,

    /// Extra data as a JSON object
    #[arg(long)]
    data: Option<String>,

    /// Queue name (worker presets)
    #[arg(long, default_value = "default")]
    queue: String,

    /// Job payload as JSON (worker presets)
    #[arg(long)]
    job: Option<String>,

    /// HTTP status (route preset)
    #[arg(long)]
    status: Option<u16>,

    /// Minimum level to report
    #[arg(long, default_value = "error")]
    minimum_level: String,

    /// Send `"fingerprint": null` instead of omitting the key
    #[arg(long)]
    null_fingerprint: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Base,
    Warning,
    Critical,
    Worker,
    WorkerStop,
    WorkerWarning,
    InvalidJob,
    Route,
}

#[derive(Tabled)]
struct LevelRow {
    level: String,
    weight: u8,
}

impl RollbarArgs {
    fn to_config(&self) -> RollbarConfig {
        let mut config = RollbarConfig {
            access_token: self.access_token.clone(),
            ..RollbarConfig::default()
        }
        .environment(&self.environment)
        .endpoint(&self.endpoint);

        if let Some(branch) = &self.branch {
            config = config.branch(branch);
        }
        if let Some(code_version) = &self.code_version {
            config = config.code_version(code_version);
        }
        if let Some(root) = &self.root {
            config = config.root(root);
        }
        config
    }
}

fn parse_json(raw: Option<&str>, what: &str) -> Result<Value> {
    match raw {
        Some(raw) => serde_json::from_str(raw).with_context(|| format!("Invalid JSON {}", what)),
        None => Ok(Value::Object(Default::default())),
    }
}

/// Build the error described by the `report` arguments
fn build_error(args: &ReportArgs) -> Result<ReportableError> {
    let data = parse_json(args.data.as_deref(), "data")?;
    let job = parse_json(args.job.as_deref(), "job")?;

    let message = args.message.as_str();
    let queue = args.queue.as_str();
    let error = match args.kind {
        KindArg::Base => ReportableError::new(message),
        KindArg::Warning => ReportableError::warning(message),
        KindArg::Critical => ReportableError::critical(message),
        KindArg::Worker => ReportableError::worker(message, queue, job),
        KindArg::WorkerStop => ReportableError::worker_stop(message, queue, job),
        KindArg::WorkerWarning => ReportableError::worker_warning(message, queue, job),
        KindArg::InvalidJob => ReportableError::invalid_job(message, queue, job),
        KindArg::Route => ReportableError::route(message, args.status),
    };

    let mut hint = ReportingHint::new();
    if let Some(level) = &args.level {
        hint = hint.with_level(level);
    }
    if let Some(fingerprint) = &args.fingerprint {
        // Accept JSON fingerprints, fall back to the raw string
        let value = serde_json::from_str(fingerprint)
            .unwrap_or_else(|_| Value::String(fingerprint.clone()));
        hint = hint.with_fingerprint(value);
    }

    Ok(error.with_data(data).with_hint(hint))
}

fn reporter_config(args: &ReportArgs) -> ReporterConfig {
    let policy = if args.null_fingerprint {
        FingerprintPolicy::Null
    } else {
        FingerprintPolicy::Omit
    };
    ReporterConfig::with_minimum_level(&args.minimum_level).fingerprint_policy(policy)
}

fn init_logging() -> Result<()> {
    let log_format = std::env::var("ERRORCAT_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("errorcat=info,errorcat_core=info,errorcat_infra_rollbar=info"))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            // Development: compact, colored output on stderr
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    info!("ErrorCat CLI v{}", VERSION);

    match &cli.command {
        Commands::Report(args) => {
            let error = build_error(args)?;
            let sink = RollbarSink::new(cli.rollbar.to_config())
                .context("Failed to initialize Rollbar sink")?;
            let cat = ErrorCat::with_config(std::sync::Arc::new(sink), reporter_config(args));

            if !cat.reporter().should_report(Some(&error)) {
                println!(
                    "{}",
                    "○ Not reported (sink disabled or below minimum level)".yellow()
                );
                return Ok(());
            }

            let level = cat.reporter().level_for(&error);
            cat.report(Some(&error))
                .await
                .context("Failed to report error")?;

            println!(
                "{}",
                format!("✓ Reported {} at level {}", error.kind(), level)
                    .green()
                    .bold()
            );
        }

        Commands::Levels => {
            let rows: Vec<LevelRow> = Level::ALL
                .iter()
                .map(|level| LevelRow {
                    level: level.to_string(),
                    weight: level.weight(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }

        Commands::Check => {
            let config = cli.rollbar.to_config();
            println!("{}", "Reporting Status".cyan().bold());
            println!();
            println!("  {} {}", "Environment:".bold(), config.environment);
            println!("  {} {}", "Endpoint:".bold(), config.endpoint);
            if config.can_report() {
                println!("  {} {}", "Status:".bold(), "ENABLED".green());
            } else {
                println!("  {} {}", "Status:".bold(), "DISABLED".red());
            }
        }
    }

    Ok(())
}
