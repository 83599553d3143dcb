//! Workbook manifest, relationship and content-type parts

use std::fmt::Write as _;

use super::xml::{XML_DECLARATION, escape_text};
use crate::config::PartNumbering;

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/custom-properties" Target="docProps/custom.xml"/>"#,
    r#"</Relationships>"#,
);

/// Render `xl/workbook.xml`; sheets keep their input order and 1-based ids
pub fn workbook_xml(sheet_names: &[&str]) -> String {
    let mut sheets = String::new();
    for (i, name) in sheet_names.iter().enumerate() {
        let _ = write!(
            sheets,
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_text(name),
            i + 1,
            i + 1
        );
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<workbookPr/>"#,
            r#"<bookViews><workbookView activeTab="0"/></bookViews>"#,
            r#"<sheets>{}</sheets>"#,
            r#"<calcPr calcId="191029"/>"#,
            r#"</workbook>"#,
        ),
        sheets
    )
}

/// Render `xl/_rels/workbook.xml.rels`
///
/// Worksheets take `rId1..rIdN`; theme, styles and shared strings follow as
/// `N+1`, `N+2`, `N+3`. With reversed numbering the worksheet entries are
/// listed last-to-first.
pub fn workbook_rels_xml(sheet_count: usize, numbering: PartNumbering) -> String {
    let mut rels = String::new();
    let _ = write!(
        rels,
        r#"<Relationship Id="rId{}" Type="{REL_TYPE_BASE}/sharedStrings" Target="sharedStrings.xml"/>"#,
        sheet_count + 3
    );
    let _ = write!(
        rels,
        r#"<Relationship Id="rId{}" Type="{REL_TYPE_BASE}/styles" Target="styles.xml"/>"#,
        sheet_count + 2
    );
    let _ = write!(
        rels,
        r#"<Relationship Id="rId{}" Type="{REL_TYPE_BASE}/theme" Target="theme/theme1.xml"/>"#,
        sheet_count + 1
    );

    let ids: Box<dyn Iterator<Item = usize>> = match numbering {
        PartNumbering::Reversed => Box::new((1..=sheet_count).rev()),
        PartNumbering::Sequential => Box::new(1..=sheet_count),
    };
    for i in ids {
        let _ = write!(
            rels,
            r#"<Relationship Id="rId{i}" Type="{REL_TYPE_BASE}/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        );
    }

    format!(r#"{XML_DECLARATION}<Relationships xmlns="{REL_NS}">{rels}</Relationships>"#)
}

/// Render `[Content_Types].xml`
pub fn content_types_xml(sheet_count: usize) -> String {
    let mut overrides = String::new();
    for i in 1..=sheet_count {
        let _ = write!(
            overrides,
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        );
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            r#"<Override PartName="/docProps/custom.xml" ContentType="application/vnd.openxmlformats-officedocument.custom-properties+xml"/>"#,
            r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
            r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
            r#"<Override PartName="/xl/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
            r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
            r#"{}"#,
            r#"</Types>"#,
        ),
        overrides
    )
}
