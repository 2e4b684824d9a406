//! geofeed-tools: CLI for validating RFC 8805 geofeed files.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use geofeed_tools::{ReferenceSource, Renderer, ValidationReport, Validator};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "geofeed-tools")]
#[command(author = "Yanzheng Sun")]
#[command(version)]
#[command(about = "Validate RFC 8805 geofeed files against ISO 3166 codes", long_about = None)]
#[command(before_help = concat!("Geofeed Tools Version ", env!("CARGO_PKG_VERSION")))]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Validate a geofeed file
    #[arg(short = 'v', long = "validate", value_name = "FILEPATH")]
    validate: PathBuf,

    /// ISO 3166-1 country list (JSON) to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    countries: Option<PathBuf>,

    /// ISO 3166-2 subdivision table (JSON) to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    subdivisions: Option<PathBuf>,

    /// When to highlight output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Print line and record counts after the verdict
    #[arg(long)]
    summary: bool,

    /// Verbose logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => console::colors_enabled(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            process::exit(code);
        }
    };

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let report = match validate(&cli) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let renderer = Renderer::new(cli.color.enabled());
    if let Err(e) = print_report(&renderer, &report, cli.summary) {
        eprintln!("Error: failed to write report: {}", e);
        process::exit(1);
    }

    if !report.is_valid() {
        process::exit(1);
    }
}

fn validate(cli: &Cli) -> geofeed_tools::Result<ValidationReport> {
    let source = ReferenceSource::from_overrides(cli.countries.clone(), cli.subdivisions.clone())?;
    log::debug!("Loading reference data from {}", source.describe());

    let data = source.load()?;
    let validator = Validator::from_data(&data);

    validator.validate_path(&cli.validate)
}

fn print_report(renderer: &Renderer, report: &ValidationReport, summary: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    renderer.write_report(&mut out, report)?;
    if summary {
        writeln!(out, "{}", renderer.summary(report))?;
    }
    out.flush()
}
