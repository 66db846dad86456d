//! fieldlog CLI
//!
//! Thin wrapper around fieldlog-core for shell scripts and for checking what
//! a deployment will print.
//!
//! ## Usage
//!
//! ```bash
//! # Emit one line with the renderer the environment selects
//! fieldlog emit info "opening connection" http://localhost/health
//!
//! # Force JSON, name the logger, add a timestamp and labels
//! fieldlog emit --format json --name app.db --time -l region=eu warn "slow query"
//!
//! # Show whether this environment counts as development
//! fieldlog detect
//! ```

use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fieldlog_core::{context, ecs, env, Format, LogConfig, Loggable, Logger};

/// fieldlog - structured logging from the command line
#[derive(Parser)]
#[command(name = "fieldlog")]
#[command(version = "0.1.0")]
#[command(about = "Emit ECS-style log lines in plain, colored or JSON form")]
struct Cli {
    /// Increase verbosity of diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the values and write one log line to stdout
    Emit {
        /// Output renderer; `auto` follows FIELDLOG_FORMAT and the environment
        #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
        format: FormatArg,

        /// Logger name, dot-separated for hierarchy
        #[arg(short, long)]
        name: Option<String>,

        /// Prepend an @timestamp field
        #[arg(short, long)]
        time: bool,

        /// Label as key=value (repeatable)
        #[arg(short = 'l', long = "label", value_parser = parse_label)]
        labels: Vec<(String, String)>,

        /// Values to log: level tokens, http URLs, or message text
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Print the detected mode and the renderer it selects
    Detect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Auto,
    Plain,
    Color,
    Json,
}

impl FormatArg {
    fn format(self) -> Option<Format> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Plain => Some(Format::Plain),
            FormatArg::Color => Some(Format::Colored),
            FormatArg::Json => Some(Format::Structured),
        }
    }
}

/// Parse a `key=value` label
fn parse_label(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

/// Setup tracing based on verbosity level. Diagnostics go to stderr so they
/// never mix with emitted lines.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn emit(
    format: FormatArg,
    name: Option<String>,
    time: bool,
    labels: Vec<(String, String)>,
    values: Vec<String>,
) -> Result<()> {
    let mut config = LogConfig::from_env().with_timestamps(time);
    if let Some(format) = format.format() {
        config = config.with_format(format);
    }
    if let Some(name) = name {
        if name.split('.').any(str::is_empty) {
            bail!("invalid logger name '{}': empty segment", name);
        }
        config = config.with_name(name);
    }
    if !labels.is_empty() {
        config = config.with_field(ecs::labels(labels));
    }
    tracing::debug!(?config, "building logger");

    let logger = config.install();
    let inputs: Vec<Loggable> = values.into_iter().map(Loggable::from).collect();

    context::scope(logger, async move {
        context::current().log(inputs);
    })
    .await;

    Ok(())
}

fn detect() -> Result<()> {
    let vars = env::process_vars();
    let mode = if env::is_development_in(vars.clone()) {
        "development"
    } else {
        "production"
    };
    let format = env::default_format_in(vars);

    println!("mode: {}", mode);
    println!("format: {}", format);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Emit {
            format,
            name,
            time,
            labels,
            values,
        } => emit(format, name, time, labels, values)
            .await
            .context("failed to emit log line")?,

        Commands::Detect => detect()?,
    }

    Ok(())
}
