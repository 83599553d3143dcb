//! sheetexport: OOXML spreadsheet writer for in-memory grids
//!
//! This library turns a [`Workbook`] (sheets of positioned, possibly merged
//! cells) into a `.xlsx` package: shared strings are deduplicated, every XML
//! part is rendered, and the parts are zipped into a [`Blob`].

pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod writer;

pub use config::{ConfigOverrides, ExportConfig, PartNumbering, XLSX_MIME_TYPE};
pub use error::{Result, XlsxError};
pub use ids::{IdGenerator, SaltedSequence};
pub use model::{Cell, CellValue, Sheet, Workbook};
pub use writer::{Blob, XlsxWriter, to_xlsx, write_xlsx};

#[cfg(feature = "async")]
pub use writer::write_xlsx_async;
