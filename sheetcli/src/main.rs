use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetexport::config::Compression;
use sheetexport::{ConfigOverrides, PartNumbering, Workbook, XlsxWriter};
use std::path::{Path, PathBuf};

mod formatter;
mod input;
mod logger;

#[derive(Parser)]
#[command(name = "sheetcli")]
#[command(about = "Export JSON/TOML workbook models to .xlsx", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the workbook model (.json or .toml)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output file (defaults to the model path with an .xlsx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Author written to the document properties
    #[arg(long)]
    author: Option<String>,

    /// MIME type attached to the package
    #[arg(long)]
    mime_type: Option<String>,

    /// Number worksheet parts in sheet order instead of reversed
    #[arg(long)]
    sequential_parts: bool,

    /// Store parts without compression
    #[arg(long)]
    stored: bool,

    /// Show what would be written without creating the file
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            author: self.author.clone(),
            mime_type: self.mime_type.clone(),
            part_numbering: self.sequential_parts.then_some(PartNumbering::Sequential),
            compression: self.stored.then_some(Compression::Stored),
        }
    }
}

/// Render once, then either report the plan or write exactly those parts
fn export(
    writer: XlsxWriter,
    workbook: &Workbook,
    model: &Path,
    output: &Path,
    dry_run: bool,
) -> Result<formatter::ExportReport> {
    let parts = writer.render_parts(workbook);
    let mut report = formatter::ExportReport::new(model, output, workbook, &parts);

    if dry_run {
        report.dry_run = true;
        return Ok(report);
    }

    let blob = writer
        .assemble(&parts)
        .with_context(|| format!("Failed to export workbook: {}", model.display()))?;
    blob.save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("wrote {} bytes as {}", blob.len(), blob.mime_type());
    report.bytes = Some(blob.len());
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    // Load configuration
    let mut config = input::load_config(cli.config.as_deref())?;
    config.apply(&cli.overrides());
    config.validate().context("Invalid configuration")?;

    let workbook = input::load_workbook(&cli.file)?;
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| input::default_output(&cli.file));

    let report = export(
        XlsxWriter::new(config),
        &workbook,
        &cli.file,
        &output_path,
        cli.dry_run,
    )?;

    match cli.format {
        OutputFormat::Human => formatter::print_human(&report),
        OutputFormat::Json => formatter::print_json(&report)?,
    }

    Ok(())
}
