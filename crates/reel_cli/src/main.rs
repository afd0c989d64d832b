//! Reel CLI
//!
//! Trace, replay and validate scroll-driven story sections.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reel_story::SectionReport;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod trace;

use config::ReelConfig;

#[derive(Parser)]
#[command(name = "reel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scroll-synchronized story section tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./reel.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one JSON line per sample across a section's track
    Trace {
        /// Section name
        section: String,

        /// Viewport width, overriding the configuration
        #[arg(short, long)]
        width: Option<f32>,
    },

    /// Replay a viewport resize part way through a section
    Resize {
        /// Section name
        section: String,

        /// Width before the resize
        #[arg(long)]
        from: f32,

        /// Width after the resize
        #[arg(long)]
        to: f32,

        /// Progress through the track when the resize happens
        #[arg(long, default_value = "0.5")]
        at: f32,
    },

    /// Validate breakpoint coverage and lint every program
    Check,

    /// List configured sections
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ReelConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Trace { section, width } => cmd_trace(&config, &section, width),
        Commands::Resize {
            section,
            from,
            to,
            at,
        } => cmd_resize(&config, &section, from, to, at),
        Commands::Check => cmd_check(&config),
        Commands::Info => cmd_info(&config),
    }
}

fn cmd_trace(config: &ReelConfig, section: &str, width: Option<f32>) -> Result<()> {
    info!("Tracing {} over {} samples", section, config.trace.samples.max(2));
    for frame in trace::trace(config, section, width)? {
        println!("{}", serde_json::to_string(&frame)?);
    }
    Ok(())
}

fn cmd_resize(config: &ReelConfig, section: &str, from: f32, to: f32, at: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&at) {
        anyhow::bail!("--at must be between 0 and 1, got {}", at);
    }
    info!("Resizing {} from {}px to {}px at {:.0}%", section, from, to, at * 100.0);
    for frame in trace::replay_resize(config, section, from, to, at)? {
        println!("{}", serde_json::to_string(&frame)?);
    }
    Ok(())
}

/// Outcome of checking one configured section
struct SectionCheck {
    name: String,
    outcome: Result<SectionReport>,
}

impl SectionCheck {
    fn is_ok(&self) -> bool {
        matches!(&self.outcome, Ok(report) if report.is_clean())
    }
}

fn check_sections(config: &ReelConfig) -> Vec<SectionCheck> {
    config
        .sections
        .iter()
        .map(|entry| SectionCheck {
            name: entry.name.clone(),
            outcome: entry
                .to_section()
                .and_then(|section| section.check().context("Invalid section")),
        })
        .collect()
}

fn cmd_check(config: &ReelConfig) -> Result<()> {
    let mut failures = 0;

    for name in config.duplicate_names() {
        warn!("{}: declared more than once", name);
        failures += 1;
    }

    for check in check_sections(config) {
        match &check.outcome {
            Ok(report) if report.is_clean() => info!("{}: ok", check.name),
            Ok(report) => {
                if !report.coverage.is_ok() {
                    warn!("{}: {}", check.name, report.coverage);
                }
                for (variant, overlaps) in &report.overlaps {
                    for overlap in overlaps {
                        warn!("{} ({}): {}", check.name, variant, overlap);
                    }
                }
            }
            Err(err) => warn!("{}: {:#}", check.name, err),
        }
        if !check.is_ok() {
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} problem(s) found", failures);
    }
    info!("All {} sections passed", config.sections.len());
    Ok(())
}

fn cmd_info(config: &ReelConfig) -> Result<()> {
    println!("Reel {}", env!("CARGO_PKG_VERSION"));
    println!("==========");
    println!();
    println!(
        "Viewport: {}x{}",
        config.viewport.width, config.viewport.height
    );
    println!();
    println!("Sections:");
    for entry in &config.sections {
        let section = entry
            .to_section()
            .with_context(|| format!("Section '{}'", entry.name))?;
        println!(
            "  - {} ({}vh track, scrub {:?})",
            section.name, section.track_height, section.scrub
        );
        for variant in &section.variants {
            println!(
                "      {} [{}]: {} steps, {}s",
                variant.name,
                variant.breakpoint,
                variant.program.steps().len(),
                variant.program.duration()
            );
        }
    }
    Ok(())
}
