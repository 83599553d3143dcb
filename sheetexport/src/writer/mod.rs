//! Writer module: turns a [`Workbook`] into an OOXML spreadsheet package
//!
//! The pipeline runs in three stages: collect the shared-string table, render
//! every XML part, then zip the parts into a [`Blob`].

pub mod cell_ref;
pub mod doc_props;
pub mod package;
pub mod shared_strings;
pub mod workbook_parts;
pub mod worksheet;
mod xml;

pub use cell_ref::{CellAddress, decode_cell, encode_cell, encode_range};
pub use package::{Blob, Part};
pub use shared_strings::{SharedStrings, is_numeric};

use std::io::{Seek, Write};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};

use crate::config::{ExportConfig, XLSX_MIME_TYPE};
use crate::error::Result;
use crate::ids::{IdGenerator, SaltedSequence};
use crate::model::Workbook;
use worksheet::WorksheetLayout;

const STYLES_XML: &str = include_str!("../../assets/styles.xml");
const THEME_XML: &str = include_str!("../../assets/theme1.xml");

/// Path of the worksheet part with the given 1-based number
pub fn worksheet_path(part_number: usize) -> String {
    format!("xl/worksheets/sheet{part_number}.xml")
}

/// Serializes workbooks according to an [`ExportConfig`]
pub struct XlsxWriter {
    config: ExportConfig,
    ids: Arc<dyn IdGenerator>,
    timestamp: Option<DateTime<FixedOffset>>,
}

impl XlsxWriter {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            ids: Arc::new(SaltedSequence::new()),
            timestamp: None,
        }
    }

    /// Use a specific id sequence for generated document identifiers
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Stamp documents with a fixed time instead of the local clock
    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render every package part, in archive order
    pub fn render_parts(&self, workbook: &Workbook) -> Vec<Part> {
        let strings = SharedStrings::from_workbook(workbook);
        let names = workbook.sheet_names();
        let sheet_count = names.len();
        let numbering = self.config.layout.part_numbering;
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Local::now().fixed_offset());
        let props = &self.config.properties;

        let mut parts = Vec::with_capacity(sheet_count + 10);
        parts.push(Part::new("_rels/.rels", workbook_parts::ROOT_RELS));
        parts.push(Part::new("docProps/app.xml", doc_props::app_xml(&props.application, &names)));
        parts.push(Part::new("docProps/core.xml", doc_props::core_xml(&props.author, &timestamp)));
        parts.push(Part::new(
            "docProps/custom.xml",
            doc_props::custom_xml(&self.ids.next_id("doc_"), &props.custom),
        ));
        parts.push(Part::new(
            "xl/_rels/workbook.xml.rels",
            workbook_parts::workbook_rels_xml(sheet_count, numbering),
        ));
        parts.push(Part::new("xl/theme/theme1.xml", THEME_XML));

        for (idx, sheet) in workbook.sheets.iter().enumerate() {
            let part_number = numbering.part_number(idx, sheet_count);
            let layout = WorksheetLayout {
                tab_selected: idx == 0,
                default_col_width: self.config.col_width(&sheet.name),
                default_row_height: self.config.row_height(&sheet.name),
            };
            log::debug!(
                "sheet '{}' ({} rows) -> {}",
                sheet.name,
                sheet.grid.len(),
                worksheet_path(part_number)
            );
            parts.push(Part::new(
                worksheet_path(part_number),
                worksheet::render_worksheet(sheet, &strings, &layout),
            ));
        }

        parts.push(Part::new("xl/sharedStrings.xml", strings.to_xml()));
        parts.push(Part::new("xl/styles.xml", STYLES_XML));
        parts.push(Part::new("xl/workbook.xml", workbook_parts::workbook_xml(&names)));
        parts.push(Part::new(
            "[Content_Types].xml",
            workbook_parts::content_types_xml(sheet_count),
        ));
        parts
    }

    /// Serialize into an in-memory blob tagged with the configured MIME type
    pub fn write(&self, workbook: &Workbook) -> Result<Blob> {
        let parts = self.render_parts(workbook);
        self.assemble(&parts)
    }

    /// Package parts from [`XlsxWriter::render_parts`] without rendering them again
    pub fn assemble(&self, parts: &[Part]) -> Result<Blob> {
        let blob = package::assemble(
            parts,
            self.config.package.compression,
            &self.config.package.mime_type,
        )?;
        log::debug!(
            "wrote {} parts, {} bytes ({})",
            parts.len(),
            blob.len(),
            blob.mime_type()
        );
        Ok(blob)
    }

    /// Serialize into any seekable sink, returning it once the archive is finished
    pub fn write_to<W: Write + Seek>(&self, workbook: &Workbook, sink: W) -> Result<W> {
        let parts = self.render_parts(workbook);
        package::write_parts(sink, &parts, self.config.package.compression)
    }

    /// Serialize on a blocking task; resolves once the archive is ready
    #[cfg(feature = "async")]
    pub async fn write_async(self, workbook: Workbook) -> Result<Blob> {
        tokio::task::spawn_blocking(move || self.write(&workbook))
            .await
            .map_err(|e| crate::error::XlsxError::Task(e.to_string()))?
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

/// Serialize a workbook with default settings and the given MIME type
pub fn write_xlsx(workbook: &Workbook, mime_type: &str) -> Result<Blob> {
    let mut config = ExportConfig::default();
    config.package.mime_type = mime_type.to_string();
    XlsxWriter::new(config).write(workbook)
}

/// Asynchronous form of [`write_xlsx`]
#[cfg(feature = "async")]
pub async fn write_xlsx_async(workbook: Workbook, mime_type: &str) -> Result<Blob> {
    let mut config = ExportConfig::default();
    config.package.mime_type = mime_type.to_string();
    XlsxWriter::new(config).write_async(workbook).await
}

/// Serialize with the standard `.xlsx` MIME type
pub fn to_xlsx(workbook: &Workbook) -> Result<Blob> {
    write_xlsx(workbook, XLSX_MIME_TYPE)
}
