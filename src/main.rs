//! actionbar - parse and filter SkyBlock action bar lines
//!
//! Reads raw action bar lines (one per input line, legacy `§` codes intact)
//! and prints extracted stats or rewritten lines.

use actionbar::config::{Config, FilterKind};
use actionbar::core::PlayerStats;
use actionbar::{ActionBarParser, LogSink, LogSkills};
use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(ClapParser)]
#[command(name = "actionbar")]
#[command(about = "Parse and filter SkyBlock action bar text", long_about = None)]
struct Cli {
    /// Configuration file path (default: ~/.actionbar/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one JSON snapshot per input line
    Extract {
        /// Input file (default: stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Print each input line with hidden segments removed
    Rewrite {
        /// Input file (default: stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Hide a segment kind in addition to the configured filters
        #[arg(long, value_enum)]
        hide: Vec<FilterKind>,
    },
    /// Track the latest stats and print a summary after each line
    Watch {
        /// Input file (default: stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context(format!("Failed to open log file: {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false) // No color codes in log file
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path).context(format!("Failed to open input: {:?}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let skills = LogSkills;
    let errors = LogSink;
    let parser = ActionBarParser::new(&skills, &errors);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Extract { input } => {
            for line in open_input(input.as_deref())?.lines() {
                let line = line.context("Failed to read input line")?;
                let snapshot = parser.extract(&line);
                let json = serde_json::to_string(&snapshot).context("Failed to serialize snapshot")?;
                writeln!(out, "{}", json)?;
            }
        }
        Commands::Rewrite { input, hide } => {
            let mut filters = load_config(cli.config.as_deref())?.action_bar_filters;
            for kind in hide {
                filters.hide(kind);
            }
            tracing::debug!(?filters, "Rewriting with filters");

            for line in open_input(input.as_deref())?.lines() {
                let line = line.context("Failed to read input line")?;
                writeln!(out, "{}", parser.rewrite(&line, &filters))?;
            }
        }
        Commands::Watch { input } => {
            let mut stats = PlayerStats::new();
            for line in open_input(input.as_deref())?.lines() {
                let line = line.context("Failed to read input line")?;
                stats.update(parser.extract(&line));
                writeln!(out, "{}", stats.summary())?;
            }
            tracing::info!("Applied {} updates", stats.updates);
        }
        Commands::InitConfig { force } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };
            if path.exists() && !force {
                bail!("Config already exists at {:?} (use --force to overwrite)", path);
            }
            Config::default().save(&path)?;
            tracing::info!("Wrote default config to {:?}", path);
            writeln!(out, "✓ Wrote {}", path.display())?;
        }
    }

    Ok(())
}
