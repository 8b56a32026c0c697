use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use xmlbench::{
    compare_all_with, generate_sample, logger, render, sample_document, BenchConfig,
    PeakAlloc,
};

#[global_allocator]
static ALLOC: PeakAlloc = PeakAlloc;

/// Compare XML parsing strategies on one document
#[derive(Parser, Debug)]
#[command(name = "xmlbench")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, default_value = "xmlbench.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every strategy once and print the comparison report as JSON
    Compare {
        /// Document to read; the built-in sample when omitted or blank
        file: Option<PathBuf>,
    },
    /// Render the document to HTML using one strategy as source
    Render {
        /// DOM, SAX, StAX or Binding
        #[arg(short, long, default_value = "DOM")]
        strategy: String,
        file: Option<PathBuf>,
        /// Write the HTML here instead of printing the outcome as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a synthetic document with COUNT articles
    Generate {
        count: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn read_document(file: Option<&Path>) -> Result<String> {
    let content = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => String::new(),
    };
    if content.trim().is_empty() {
        info!("no document supplied, using the built-in sample");
        return Ok(sample_document().to_string());
    }
    Ok(content)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BenchConfig::load(&cli.config)
        .with_context(|| format!("invalid configuration in {}", cli.config.display()))?;
    logger::init(cli.verbose, config.log_filter.as_deref());

    match cli.command {
        Command::Compare { file } => {
            let xml = read_document(file.as_deref())?;
            let report = compare_all_with(Some(&xml), &config);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Render {
            strategy,
            file,
            output,
        } => {
            let xml = read_document(file.as_deref())?;
            let outcome = render(Some(&xml), &strategy);
            match (output, outcome.markup()) {
                (Some(path), Some(html)) => {
                    fs::write(&path, html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote rendered document");
                }
                (Some(_), None) => {
                    bail!(outcome.error().unwrap_or("render failed").to_string());
                }
                (None, _) => println!("{}", serde_json::to_string_pretty(&outcome)?),
            }
        }
        Command::Generate { count, output } => {
            let xml = generate_sample(count.unwrap_or(config.default_sample_records));
            match output {
                Some(path) => fs::write(&path, xml)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{xml}"),
            }
        }
    }
    Ok(())
}
