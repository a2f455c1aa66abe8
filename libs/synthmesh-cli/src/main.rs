//! Synthmesh CLI - writes the example meshes as VTU files.
//!
//! Without arguments every shape is written to the current directory.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use synthmesh::{write_shape, DataFormat, Shape};

/// Generate volumetric hexahedral meshes with analytic fields
#[derive(Parser, Debug)]
#[command(name = "synthmesh")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the .vtu files are written to (created if missing)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Shape to generate; repeat to select several (default: all)
    #[arg(short, long = "shape", value_parser = parse_shape)]
    shapes: Vec<Shape>,

    /// Payload encoding of the data arrays
    #[arg(short, long, default_value = "ascii", value_parser = ["ascii", "binary"])]
    format: String,

    /// List the available shapes and exit
    #[arg(long)]
    list: bool,

    /// Log generation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_shape(value: &str) -> Result<Shape, String> {
    value.parse::<Shape>().map_err(|err| err.to_string())
}

impl Cli {
    /// Shapes to write, in the canonical order, without duplicates.
    fn selected(&self) -> Vec<Shape> {
        if self.shapes.is_empty() {
            return Shape::ALL.to_vec();
        }
        Shape::ALL
            .into_iter()
            .filter(|shape| self.shapes.contains(shape))
            .collect()
    }
}

fn list() {
    println!("{}", "Available shapes:".cyan().bold());
    for shape in Shape::ALL {
        println!("  {:<18} {}", shape.name().green(), shape.description());
    }
}

fn run(cli: &Cli) -> Result<()> {
    let format: DataFormat = cli
        .format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("invalid --format")?;

    fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!("failed to create output directory {}", cli.output_dir.display())
    })?;

    println!("{} {}", "Output directory:".cyan().bold(), cli.output_dir.display());
    println!("{} {}", "Format:".cyan().bold(), format);

    let selected = cli.selected();
    for shape in &selected {
        println!("\n{} {}", "Generating".cyan().bold(), shape.description());
        let written = write_shape(*shape, &cli.output_dir, format)
            .with_context(|| format!("failed to write {shape}"))?;
        println!("{} {}", "Wrote".green().bold(), written.path.display());
        print!("{}", written.summary);
    }

    println!(
        "\n{} {} file(s) in {}",
        "SUCCESS".green().bold(),
        selected.len(),
        cli.output_dir.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.list {
        list();
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(1)
        }
    }
}
