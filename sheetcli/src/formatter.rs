//! Output formatters for export reports

use anyhow::Result;
use colored::*;
use serde::Serialize;
use sheetexport::Workbook;
use sheetexport::writer::{Part, SharedStrings};
use std::path::{Path, PathBuf};

/// What a run did (or would do, for `--dry-run`)
#[derive(Debug, Serialize)]
pub struct ExportReport {
    pub model: PathBuf,
    pub output: PathBuf,
    pub dry_run: bool,
    pub sheets: Vec<SheetSummary>,
    pub shared_strings: StringSummary,
    pub parts: Vec<PartSummary>,
    pub bytes: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub cells: usize,
    pub merged: usize,
}

#[derive(Debug, Serialize)]
pub struct StringSummary {
    pub count: usize,
    pub unique: usize,
}

#[derive(Debug, Serialize)]
pub struct PartSummary {
    pub path: String,
    pub size: usize,
}

impl ExportReport {
    pub fn new(model: &Path, output: &Path, workbook: &Workbook, parts: &[Part]) -> Self {
        let strings = SharedStrings::from_workbook(workbook);
        Self {
            model: model.to_path_buf(),
            output: output.to_path_buf(),
            dry_run: false,
            sheets: workbook
                .sheets
                .iter()
                .map(|sheet| SheetSummary {
                    name: sheet.name.clone(),
                    rows: sheet.grid.len(),
                    cells: sheet.cells().count(),
                    merged: sheet.cells().filter(|c| c.is_merged()).count(),
                })
                .collect(),
            shared_strings: StringSummary {
                count: strings.count(),
                unique: strings.unique_count(),
            },
            parts: parts
                .iter()
                .map(|p| PartSummary {
                    path: p.path.clone(),
                    size: p.content.len(),
                })
                .collect(),
            bytes: None,
        }
    }
}

/// Print the report in human-readable format with colors
pub fn print_human(report: &ExportReport) {
    println!(
        "{}",
        format!("Exporting: {}", report.model.display()).bold()
    );
    println!();

    for sheet in &report.sheets {
        println!(
            "  {} {} rows, {} cells, {} merged",
            format!("{}:", sheet.name).cyan().bold(),
            sheet.rows,
            sheet.cells,
            sheet.merged
        );
    }
    println!(
        "  {} {} references, {} unique",
        "Shared strings:".bold(),
        report.shared_strings.count,
        report.shared_strings.unique
    );
    println!();

    if report.dry_run {
        println!("[DRY RUN] Parts that would be written:");
        for part in &report.parts {
            println!(
                "    - {} {}",
                part.path,
                format!("({} bytes)", part.size).bright_black()
            );
        }
        println!("\nOutput would be: {}", report.output.display());
        return;
    }

    println!("{}", "✓ Successfully exported workbook".green().bold());
    match report.bytes {
        Some(bytes) => println!("Output: {} ({} bytes)", report.output.display(), bytes),
        None => println!("Output: {}", report.output.display()),
    }
}

/// Print the report in JSON format
pub fn print_json(report: &ExportReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
