//! Worksheet part rendering: dimension, cell data and merged ranges

use std::fmt::Write as _;

use super::cell_ref::{CellAddress, encode_cell, encode_range};
use super::shared_strings::{SharedStrings, is_numeric};
use super::xml::{XML_DECLARATION, escape_text};
use crate::model::{Cell, Sheet};

/// Per-sheet view and format settings
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetLayout {
    pub tab_selected: bool,
    pub default_col_width: f64,
    pub default_row_height: f64,
}

/// Merge range covered by a spanning cell, if any
pub fn merge_range(cell: &Cell) -> Option<String> {
    if !cell.is_merged() {
        return None;
    }
    let start = CellAddress::new(cell.col_index, cell.row_index);
    // Zero spans are treated like 1
    let end = CellAddress::new(
        cell.col_index.saturating_add(cell.col_span.saturating_sub(1)),
        cell.row_index.saturating_add(cell.row_span.saturating_sub(1)),
    );
    Some(encode_range(start, end))
}

/// Every merge range in the sheet, in grid order
pub fn merge_ranges(sheet: &Sheet) -> Vec<String> {
    sheet.cells().filter_map(merge_range).collect()
}

/// Declared used range: (0, 0) to (longest row - 1, row count - 1)
pub fn dimension(sheet: &Sheet) -> String {
    let last_col = sheet.max_row_len().saturating_sub(1) as u32;
    let last_row = sheet.grid.len().saturating_sub(1) as u32;
    encode_range(CellAddress::new(0, 0), CellAddress::new(last_col, last_row))
}

/// Render `xl/worksheets/sheet{N}.xml` for one sheet
pub fn render_worksheet(sheet: &Sheet, strings: &SharedStrings, layout: &WorksheetLayout) -> String {
    let mut xml = String::with_capacity(512 + sheet.grid.len() * 64);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    ));
    xml.push_str("<sheetPr/>");
    let _ = write!(xml, r#"<dimension ref="{}"/>"#, dimension(sheet));

    xml.push_str("<sheetViews>");
    if layout.tab_selected {
        xml.push_str(r#"<sheetView tabSelected="1" workbookViewId="0">"#);
    } else {
        xml.push_str(r#"<sheetView workbookViewId="0">"#);
    }
    xml.push_str(r#"<selection activeCell="A1" sqref="A1"/></sheetView></sheetViews>"#);
    let _ = write!(
        xml,
        r#"<sheetFormatPr defaultColWidth="{}" defaultRowHeight="{}"/>"#,
        layout.default_col_width, layout.default_row_height
    );

    xml.push_str("<sheetData>");
    for (idx, row) in sheet.grid.iter().enumerate() {
        if row.is_empty() {
            let _ = write!(xml, r#"<row r="{}"/>"#, idx + 1);
            continue;
        }
        let _ = write!(xml, r#"<row r="{}" spans="1:{}">"#, idx + 1, row.len());
        for cell in row {
            write_cell(&mut xml, cell, strings);
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");

    let ranges = merge_ranges(sheet);
    if !ranges.is_empty() {
        let _ = write!(xml, r#"<mergeCells count="{}">"#, ranges.len());
        for range in &ranges {
            let _ = write!(xml, r#"<mergeCell ref="{range}"/>"#);
        }
        xml.push_str("</mergeCells>");
    }

    xml.push_str(
        r#"<pageMargins left="0.75" right="0.75" top="1" bottom="1" header="0.5" footer="0.5"/>"#,
    );
    xml.push_str("<headerFooter/>");
    xml.push_str("</worksheet>");
    xml
}

fn write_cell(xml: &mut String, cell: &Cell, strings: &SharedStrings) {
    let cell_ref = encode_cell(cell.col_index, cell.row_index);
    let text = cell.value.to_text();

    if is_numeric(&text) {
        let _ = write!(xml, r#"<c r="{cell_ref}"><v>{text}</v></c>"#);
    } else if let Some(idx) = strings.index_of(&text) {
        let _ = write!(xml, r#"<c r="{cell_ref}" t="s"><v>{idx}</v></c>"#);
    } else {
        // Text missing from the table (built from another workbook) is kept inline
        let _ = write!(
            xml,
            r#"<c r="{cell_ref}" t="inlineStr"><is><t>{}</t></is></c>"#,
            escape_text(&text)
        );
    }
}
