//! Document property parts under `docProps/`

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};

use super::xml::{XML_DECLARATION, escape_text};
use crate::config::DOCUMENT_ID_PROPERTY;

/// Format id shared by user-defined custom properties
const CUSTOM_FMTID: &str = "{D5CDD505-2E9C-101B-9397-08002B2CF9AE}";

/// W3CDTF timestamp with numeric offset, e.g. `2024-05-01T09:30:00+08:00`
pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Render `docProps/app.xml`
pub fn app_xml(application: &str, sheet_names: &[&str]) -> String {
    let mut titles = String::new();
    for name in sheet_names {
        let _ = write!(titles, "<vt:lpstr>{}</vt:lpstr>", escape_text(name));
    }

    format!(
        concat!(
            "{decl}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>{app}</Application>",
            r#"<HeadingPairs><vt:vector size="2" baseType="variant">"#,
            "<vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>",
            "<vt:variant><vt:i4>{count}</vt:i4></vt:variant>",
            "</vt:vector></HeadingPairs>",
            r#"<TitlesOfParts><vt:vector size="{count}" baseType="lpstr">{titles}</vt:vector></TitlesOfParts>"#,
            "</Properties>",
        ),
        decl = XML_DECLARATION,
        app = escape_text(application),
        count = sheet_names.len(),
        titles = titles,
    )
}

/// Render `docProps/core.xml`
pub fn core_xml(author: &str, timestamp: &DateTime<FixedOffset>) -> String {
    let author = escape_text(author);
    let time = format_timestamp(timestamp);
    format!(
        concat!(
            "{decl}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:creator>{author}</dc:creator>",
            "<cp:lastModifiedBy>{author}</cp:lastModifiedBy>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{time}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{time}</dcterms:modified>"#,
            "</cp:coreProperties>",
        ),
        decl = XML_DECLARATION,
        author = author,
        time = time,
    )
}

/// Render `docProps/custom.xml`: the document id, then configured properties
pub fn custom_xml(document_id: &str, custom: &BTreeMap<String, String>) -> String {
    let mut props = String::new();
    let entries = std::iter::once((DOCUMENT_ID_PROPERTY, document_id))
        .chain(
            custom
                .iter()
                .filter(|(k, _)| k.as_str() != DOCUMENT_ID_PROPERTY)
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
    // pid 0 and 1 are reserved by the format
    for (pid, (name, value)) in (2..).zip(entries) {
        let _ = write!(
            props,
            r#"<property fmtid="{CUSTOM_FMTID}" pid="{pid}" name="{}"><vt:lpwstr>{}</vt:lpwstr></property>"#,
            escape_text(name),
            escape_text(value)
        );
    }

    format!(
        concat!(
            "{decl}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/custom-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "{props}",
            "</Properties>",
        ),
        decl = XML_DECLARATION,
        props = props,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_time() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-05-01T09:30:00+08:00").unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&fixed_time()), "2024-05-01T09:30:00+08:00");
        let utc = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap();
        assert_eq!(format_timestamp(&utc), "2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_core_xml() {
        let xml = core_xml("nobody", &fixed_time());
        assert!(xml.contains("<dc:creator>nobody</dc:creator>"));
        assert!(xml.contains("<cp:lastModifiedBy>nobody</cp:lastModifiedBy>"));
        assert!(xml.contains(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-05-01T09:30:00+08:00</dcterms:created>"#
        ));
        assert!(xml.contains(
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">2024-05-01T09:30:00+08:00</dcterms:modified>"#
        ));
    }

    #[test]
    fn test_app_xml_lists_titles() {
        let xml = app_xml("SheetExport", &["Sheet1", "A<B"]);
        assert!(xml.contains("<vt:i4>2</vt:i4>"));
        assert!(xml.contains(
            r#"<vt:vector size="2" baseType="lpstr"><vt:lpstr>Sheet1</vt:lpstr><vt:lpstr>A&lt;B</vt:lpstr></vt:vector>"#
        ));
    }

    #[test]
    fn test_custom_xml_pids() {
        let mut custom = BTreeMap::new();
        custom.insert("Department".to_string(), "Finance".to_string());
        let xml = custom_xml("doc_1-1", &custom);

        assert!(xml.contains(r#"pid="2" name="DocumentId"><vt:lpwstr>doc_1-1</vt:lpwstr>"#));
        assert!(xml.contains(r#"pid="3" name="Department"><vt:lpwstr>Finance</vt:lpwstr>"#));
    }

    #[test]
    fn test_custom_xml_keeps_generated_document_id() {
        let mut custom = BTreeMap::new();
        custom.insert("DocumentId".to_string(), "mine".to_string());
        let xml = custom_xml("doc_1-1", &custom);

        assert_eq!(xml.matches(r#"name="DocumentId""#).count(), 1);
        assert!(xml.contains("<vt:lpwstr>doc_1-1</vt:lpwstr>"));
        assert!(!xml.contains("mine"));
    }
}
