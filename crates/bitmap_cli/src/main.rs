//! Bitmap CLI
//!
//! Run and check bitmap editor scripts.

use anyhow::{Context, Result};
use bitmap_core::{CommandKind, Editor, LineSource, MAX_DIMENSION};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::BitmapConfig;

#[derive(Parser)]
#[command(name = "bitmap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bitmap editor script runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: ./bitmap.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script and print every `S` dump
    Run {
        /// Script file
        file: Option<PathBuf>,

        /// Write dumps to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a script without printing, reporting only errors
    Check {
        /// Script file
        file: Option<PathBuf>,
    },

    /// Show the command language, canvas limits and active configuration
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BitmapConfig::load(path)?,
        None => BitmapConfig::load_from_dir(&std::env::current_dir()?)?,
    };

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.log.level)
            .with_context(|| format!("Invalid log level '{}'", config.log.level))?
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run { file, output } => cmd_run(file.as_deref(), output.as_deref(), &config),
        Commands::Check { file } => cmd_check(file.as_deref()),
        Commands::Info => cmd_info(&config),
    }
}

fn cmd_run(file: Option<&Path>, output: Option<&Path>, config: &BitmapConfig) -> Result<()> {
    let source = LineSource::open(file)?;
    info!("Running {}", source.name());

    let output = output.or(config.output.path.as_deref());
    let mut out: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            debug!("Writing output to {}", path.display());
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let blank_line = config.output.trailing_blank_line;
    let mut editor = Editor::new();
    editor
        .run_with(source.lines(), |rows| {
            for row in rows {
                writeln!(out, "{}", row)?;
            }
            if blank_line {
                writeln!(out)?;
            }
            Ok(())
        })
        .with_context(|| format!("Failed to run {}", source.name()))?;

    out.flush()?;
    Ok(())
}

fn cmd_check(file: Option<&Path>) -> Result<()> {
    let source = LineSource::open(file)?;

    let mut prints = 0;
    let mut editor = Editor::new();
    editor
        .run_with(source.lines(), |_| {
            prints += 1;
            Ok(())
        })
        .with_context(|| format!("Check failed for {}", source.name()))?;

    if let Some(canvas) = editor.canvas() {
        info!(
            "{}: {} commands OK, {}x{} canvas, {} prints",
            source.name(),
            editor.applied(),
            canvas.width(),
            canvas.height(),
            prints
        );
    }

    Ok(())
}

fn cmd_info(config: &BitmapConfig) -> Result<()> {
    println!("Bitmap Editor");
    println!("=============");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Commands:");
    for kind in CommandKind::ALL {
        println!("  {:<12} {}", kind.usage(), kind.description());
    }
    println!();
    println!("Limits:");
    println!("  - Canvas width and height: 1..={}", MAX_DIMENSION);
    println!("  - Coordinates are 1-based, (1,1) is the top-left pixel");
    println!("  - Colours are single uppercase letters, default O");
    println!();
    println!("Configuration:");
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
