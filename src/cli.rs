// DIT Bridge CLI binary

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use anyhow::Result;

use dit_bridge::config::{self, AppConfig};
use dit_bridge::manifest::{self, ClipSets};
use dit_bridge::{export_all, AssignmentStrategy, BridgeError, ExportFormat, Matcher};

#[derive(Parser)]
#[command(name = "ditbridge")]
#[command(about = "DIT Bridge - relink monitor proxies to camera originals", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to DITBRIDGE_CONFIG, then the user config dir)
    #[arg(long = "config", global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Inputs {
    /// Monitor clip manifests (files or directories)
    #[arg(short, long, required = true, num_args = 1..)]
    monitor: Vec<PathBuf>,
    /// DIT clip manifests (files or directories)
    #[arg(short, long, required = true, num_args = 1..)]
    dit: Vec<PathBuf>,
    /// Override the match threshold (0-1)
    #[arg(long)]
    threshold: Option<f64>,
    /// Use each DIT clip at most once
    #[arg(long)]
    exclusive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Match clips and write bridge artifacts
    Match {
        #[command(flatten)]
        inputs: Inputs,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        /// Artifacts to write (defaults to the configured formats)
        #[arg(short, long, value_enum)]
        format: Vec<ExportFormat>,
    },

    /// Show every candidate score per monitor clip
    Inspect {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Show the effective configuration
    Config {
        /// Write it to the default config location
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    dit_bridge::logging::init(cli.verbose);

    let (app_config, source) = config::load_config(cli.config_file.as_deref())?;
    if let Some(ref path) = source {
        log::debug!("Using config {}", path.display());
    }

    match cli.command {
        Commands::Match { inputs, out, format } => cmd_match(app_config, inputs, out, format),
        Commands::Inspect { inputs } => cmd_inspect(app_config, inputs),
        Commands::Config { write } => cmd_config(app_config, source, write),
    }
}

/// Apply CLI overrides, load both sides, build the matcher
fn prepare(mut app_config: AppConfig, inputs: &Inputs) -> Result<(AppConfig, ClipSets, Matcher)> {
    if let Some(threshold) = inputs.threshold {
        app_config.matching.threshold = threshold;
    }
    if inputs.exclusive {
        app_config.matching.strategy = AssignmentStrategy::Exclusive;
    }
    app_config.validate()?;

    let sets = manifest::load_sets(&inputs.monitor, &inputs.dit)?;
    let matcher = Matcher::new(app_config.matching.clone());
    Ok((app_config, sets, matcher))
}

fn cmd_match(app_config: AppConfig, inputs: Inputs, out: PathBuf, formats: Vec<ExportFormat>) -> Result<()> {
    let (mut app_config, sets, matcher) = prepare(app_config, &inputs)?;
    if !formats.is_empty() {
        app_config.export.formats = formats;
    }

    let pairs = matcher.match_clips(&sets.monitor, &sets.dit);

    println!("Monitor clips: {}", sets.monitor.len());
    println!("DIT clips:     {}", sets.dit.len());
    println!("Matched:       {}", pairs.len());
    println!();

    match export_all(&pairs, &out, &app_config.export) {
        Ok(paths) => {
            println!("{:>6}  {:<40}  {}", "Conf", "Monitor File", "DIT File");
            println!("{}", "-".repeat(80));
            for pair in &pairs {
                println!(
                    "{:>5.0}%  {:<40}  {}",
                    pair.match_confidence * 100.0,
                    truncate(&pair.monitor_file.filename, 40),
                    pair.dit_file.filename
                );
            }
            println!();
            println!("Wrote:");
            for path in paths {
                println!("  {}", path.display());
            }
            Ok(())
        }
        Err(BridgeError::NoMatches) => {
            anyhow::bail!("No monitor clip matched a DIT clip above {:.2}. Nothing was written.", matcher.config().threshold)
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_inspect(app_config: AppConfig, inputs: Inputs) -> Result<()> {
    let (_, sets, matcher) = prepare(app_config, &inputs)?;

    for monitor in &sets.monitor {
        println!("{}", monitor.filename);

        let candidates = matcher.candidates(monitor, &sets.dit);
        if candidates.is_empty() {
            println!("  (no DIT clips)");
        }
        for c in candidates {
            let marker = if c.above_threshold { "*" } else { " " };
            let signals = if c.breakdown.signals.is_empty() {
                "-".to_string()
            } else {
                c.breakdown.signals.join(", ")
            };
            println!(
                "  {} {:>5.2}  {:<40}  {}",
                marker,
                c.breakdown.total,
                truncate(&c.dit_filename, 40),
                signals
            );
        }

        match matcher.best_candidate(monitor, &sets.dit) {
            Some((index, score)) => println!("  -> {} ({:.2})", sets.dit[index].filename, score),
            None => println!("  -> no match"),
        }
        println!();
    }

    Ok(())
}

fn cmd_config(app_config: AppConfig, source: Option<PathBuf>, write: bool) -> Result<()> {
    if write {
        let path = config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("Cannot determine a config directory for this user"))?;
        config::save_config(&app_config, &path)?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    match source {
        Some(path) => println!("# from {}", path.display()),
        None => println!("# built-in defaults"),
    }
    println!("{}", serde_json::to_string_pretty(&app_config)?);
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
