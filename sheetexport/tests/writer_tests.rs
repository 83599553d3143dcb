use calamine::{Data, Reader as _, Xlsx, open_workbook_from_rs};
use quick_xml::Reader;
use quick_xml::events::Event;
use sheetexport::config::{Compression, ExportConfig, PartNumbering};
use sheetexport::{Cell, CellValue, SaltedSequence, Sheet, Workbook, XLSX_MIME_TYPE, XlsxWriter};
use std::io::{Cursor, Read};
use std::sync::Arc;
use zip::ZipArchive;

// Helper to read one part of a generated package as text
fn read_part(bytes: &[u8], path: &str) -> anyhow::Result<String> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;
    let mut file = zip.by_name(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

fn assert_well_formed(path: &str, xml: &str) {
    // quick-xml does not reject characters outside the XML 1.0 range
    assert!(
        !xml.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')),
        "{path} contains a control character"
    );
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!(
                "{path} is not well-formed at position {}: {e:?}",
                reader.error_position()
            ),
        }
    }
}

fn report_workbook() -> Workbook {
    Workbook::new(vec![
        Sheet::new(
            "Sheet1",
            vec![
                vec![Cell::new(0, 0, "Quarterly report").with_span(1, 3)],
                vec![
                    Cell::new(1, 0, "Region"),
                    Cell::new(1, 1, "Q1"),
                    Cell::new(1, 2, "Q2"),
                ],
                vec![
                    Cell::new(2, 0, "North & East"),
                    Cell::new(2, 1, 1200),
                    Cell::new(2, 2, "-3.5"),
                ],
            ],
        ),
        Sheet::from_values("Sheet2", vec![vec!["Region", "Owner"], vec!["South", "<none>"]]),
    ])
}

#[test]
fn test_sheet_ordering_is_reversed_in_parts() -> anyhow::Result<()> {
    let blob = XlsxWriter::default().write(&report_workbook())?;
    let bytes = blob.bytes();

    let workbook_xml = read_part(bytes, "xl/workbook.xml")?;
    let first = workbook_xml
        .find(r#"<sheet name="Sheet1" sheetId="1" r:id="rId1"/>"#)
        .expect("Sheet1 listed first");
    let second = workbook_xml
        .find(r#"<sheet name="Sheet2" sheetId="2" r:id="rId2"/>"#)
        .expect("Sheet2 listed second");
    assert!(first < second);

    // Sheet1's content lives in sheet2.xml and vice versa
    let sheet2_xml = read_part(bytes, "xl/worksheets/sheet2.xml")?;
    assert!(sheet2_xml.contains(r#"<mergeCell ref="A1:C1"/>"#));
    assert!(sheet2_xml.contains(r#"<dimension ref="A1:C3"/>"#));

    let sheet1_xml = read_part(bytes, "xl/worksheets/sheet1.xml")?;
    assert!(sheet1_xml.contains(r#"<dimension ref="A1:B2"/>"#));
    assert!(!sheet1_xml.contains("<mergeCells"));

    let rels = read_part(bytes, "xl/_rels/workbook.xml.rels")?;
    assert!(rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme""#));
    assert!(rels.contains(r#"Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles""#));
    assert!(rels.contains(r#"Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings""#));
    Ok(())
}

#[test]
fn test_shared_strings_part() -> anyhow::Result<()> {
    let blob = XlsxWriter::default().write(&report_workbook())?;
    let sst = read_part(blob.bytes(), "xl/sharedStrings.xml")?;

    // "Region" occurs twice, numeric values are inline
    assert!(sst.contains(r#"count="9" uniqueCount="8""#));
    assert!(sst.contains("<si><t>North &amp; East</t></si>"));
    assert!(sst.contains("<si><t>&lt;none&gt;</t></si>"));
    assert!(!sst.contains("<t>1200</t>"));
    assert!(!sst.contains("<t>-3.5</t>"));

    let sheet = read_part(blob.bytes(), "xl/worksheets/sheet2.xml")?;
    assert!(sheet.contains(r#"<c r="B3"><v>1200</v></c>"#));
    assert!(sheet.contains(r#"<c r="C3"><v>-3.5</v></c>"#));
    Ok(())
}

#[test]
fn test_every_part_is_well_formed() -> anyhow::Result<()> {
    let blob = XlsxWriter::default().write(&report_workbook())?;
    let mut zip = ZipArchive::new(Cursor::new(blob.bytes()))?;

    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "docProps/custom.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/sharedStrings.xml",
            "xl/styles.xml",
            "xl/theme/theme1.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
            "xl/worksheets/sheet2.xml",
        ]
    );

    for name in &names {
        let mut content = String::new();
        zip.by_name(name)?.read_to_string(&mut content)?;
        assert_well_formed(name, &content);
    }
    Ok(())
}

#[test]
fn test_sequential_package_reads_back() -> anyhow::Result<()> {
    let mut config = ExportConfig::default();
    config.layout.part_numbering = PartNumbering::Sequential;
    let blob = XlsxWriter::new(config).write(&report_workbook())?;

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(blob.into_bytes()))?;
    assert_eq!(workbook.sheet_names(), vec!["Sheet1", "Sheet2"]);

    let range = workbook.worksheet_range("Sheet1")?;
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("Quarterly report".to_string()))
    );
    assert_eq!(range.get_value((2, 1)), Some(&Data::Float(1200.0)));
    assert_eq!(range.get_value((2, 2)), Some(&Data::Float(-3.5)));

    let range = workbook.worksheet_range("Sheet2")?;
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("<none>".to_string())));
    Ok(())
}

#[test]
fn test_reversed_package_swaps_sheet_content() -> anyhow::Result<()> {
    let workbook = Workbook::new(vec![
        Sheet::from_values("Sheet1", vec![vec!["first"]]),
        Sheet::from_values("Sheet2", vec![vec!["second"]]),
    ]);
    let blob = XlsxWriter::default().write(&workbook)?;

    // rId1 points at sheet1.xml, which holds the second input sheet
    let mut reader: Xlsx<_> = open_workbook_from_rs(Cursor::new(blob.into_bytes()))?;
    let range = reader.worksheet_range("Sheet1")?;
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("second".to_string())));
    Ok(())
}

#[test]
fn test_document_properties() -> anyhow::Result<()> {
    let mut config = ExportConfig::from_toml(
        r#"
        [properties]
        author = "finance-bot"

        [properties.custom]
        Department = "Finance"
        "#,
    )?;
    config.package.compression = Compression::Stored;

    let ts = chrono::DateTime::parse_from_rfc3339("2024-05-01T09:30:00+08:00")?;
    let writer = XlsxWriter::new(config)
        .with_id_generator(Arc::new(SaltedSequence::seeded(7)))
        .with_timestamp(ts);
    let blob = writer.write(&report_workbook())?;

    let core = read_part(blob.bytes(), "docProps/core.xml")?;
    assert!(core.contains("<dc:creator>finance-bot</dc:creator>"));
    assert!(core.contains("2024-05-01T09:30:00+08:00"));

    let custom = read_part(blob.bytes(), "docProps/custom.xml")?;
    assert!(custom.contains(r#"name="DocumentId"><vt:lpwstr>doc_7-1</vt:lpwstr>"#));
    assert!(custom.contains(r#"name="Department"><vt:lpwstr>Finance</vt:lpwstr>"#));

    let app = read_part(blob.bytes(), "docProps/app.xml")?;
    assert!(app.contains("<vt:lpstr>Sheet1</vt:lpstr><vt:lpstr>Sheet2</vt:lpstr>"));
    Ok(())
}

#[test]
fn test_empty_values_reference_shared_slot() -> anyhow::Result<()> {
    let workbook = Workbook::new(vec![Sheet::from_values(
        "Sheet1",
        vec![vec![CellValue::from("a"), CellValue::Empty, CellValue::from("")]],
    )]);
    let blob = XlsxWriter::default().write(&workbook)?;

    let sst = read_part(blob.bytes(), "xl/sharedStrings.xml")?;
    assert!(sst.contains(r#"count="3" uniqueCount="2""#));
    let sheet = read_part(blob.bytes(), "xl/worksheets/sheet1.xml")?;
    assert!(sheet.contains(r#"<c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>1</v></c>"#));
    Ok(())
}

#[test]
fn test_control_characters_are_encoded() -> anyhow::Result<()> {
    let workbook = Workbook::new(vec![Sheet::from_values(
        "Sheet1",
        vec![vec!["a\u{1}b", "bell\u{7}", "４２"]],
    )]);
    let blob = XlsxWriter::default().write(&workbook)?;

    let sst = read_part(blob.bytes(), "xl/sharedStrings.xml")?;
    assert_well_formed("xl/sharedStrings.xml", &sst);
    assert!(sst.contains("<si><t>a_x0001_b</t></si>"));
    assert!(sst.contains("<si><t>bell_x0007_</t></si>"));
    assert!(sst.contains("<si><t>４２</t></si>"));

    let sheet = read_part(blob.bytes(), "xl/worksheets/sheet1.xml")?;
    assert!(sheet.contains(r#"<c r="C1" t="s"><v>2</v></c>"#));
    Ok(())
}

#[test]
fn test_save_to_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.xlsx");

    let blob = sheetexport::to_xlsx(&report_workbook())?;
    assert_eq!(blob.mime_type(), XLSX_MIME_TYPE);
    blob.save(&path)?;

    let bytes = std::fs::read(&path)?;
    assert_eq!(bytes, blob.bytes());
    Ok(())
}

#[test]
fn test_write_to_sink() -> anyhow::Result<()> {
    let sink = XlsxWriter::default().write_to(&report_workbook(), Cursor::new(Vec::new()))?;
    let bytes = sink.into_inner();
    let workbook_xml = read_part(&bytes, "xl/workbook.xml")?;
    assert!(workbook_xml.contains(r#"sheetId="2""#));
    Ok(())
}

#[tokio::test]
async fn test_write_async() -> anyhow::Result<()> {
    let blob = sheetexport::write_xlsx_async(report_workbook(), "application/octet-stream").await?;
    assert_eq!(blob.mime_type(), "application/octet-stream");

    let sst = read_part(blob.bytes(), "xl/sharedStrings.xml")?;
    assert!(sst.contains(r#"uniqueCount="8""#));
    Ok(())
}
