//! The `glaze` binary.
//!
//! Rewrites utility-class strings in component sources into semantic glass
//! tokens. Without `--write` it only reports what would change.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use glaze::config::{ConfigOverrides, GlazeConfig, LogLevel};
use glaze::error::GlazeError;
use glaze::logging::init_logging;
use glaze::report::{write_json, write_text};
use glaze::run::run;

/// Normalise utility-class strings into semantic glass tokens.
#[derive(Parser, Debug)]
#[command(name = "glaze", version, about)]
struct Args {
    /// Files or directories to scan.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,
    /// Write rewrites back instead of reporting them.
    #[arg(long)]
    write: bool,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
    /// File extension to scan; repeat to scan several. Replaces the default
    /// tsx, ts, jsx, and js set.
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,
    /// Insert `border` beside a border colour that has no border width.
    #[arg(long)]
    insert_border_keyword: bool,
    /// Give a plain `border` the default `border-white/15` colour.
    #[arg(long)]
    default_border_opacity: bool,
    /// Emit the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&GlazeConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    if let Err(e) = execute(&config, &args.paths) {
        tracing::error!(error = ?e, "glaze failed");
        std::process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<GlazeConfig, GlazeError> {
    GlazeConfig::from_env()?.apply_overrides(ConfigOverrides {
        log_level: args.log_level,
        write: args.write,
        json: args.json,
        extensions: args.extensions.clone(),
        insert_border_keyword: args.insert_border_keyword,
        default_border_opacity: args.default_border_opacity,
    })
}

fn execute(config: &GlazeConfig, paths: &[PathBuf]) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        write = config.write,
        "starting glaze"
    );
    let summary = run(config, paths).wrap_err("failed to load recipe catalog")?;

    let mut stdout = io::stdout().lock();
    if config.json {
        write_json(&mut stdout, &summary)?;
    } else {
        write_text(&mut stdout, &summary)?;
    }
    stdout.flush().wrap_err("failed to flush report to stdout")
}
