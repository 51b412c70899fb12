use docx_rs::*;
use incremint_core::{QuoteError, Result};
use std::io::Cursor;

use crate::document::{DocTable, HeaderBlock, QuoteDocument, Section};

// Run sizes are in half-points.
const ORGANIZATION_SIZE: usize = 28; // 14pt
const TITLE_SIZE: usize = 32; // 16pt
const HEADING_SIZE: usize = 26; // 13pt
const BODY_SIZE: usize = 22; // 11pt

// Border width is in eighths of a point.
const GRID_BORDER_SIZE: usize = 4;
const GRID_BORDER_COLOR: &str = "000000";

/// Serialize a quote to DOCX bytes.
pub fn render_docx(document: &QuoteDocument) -> Result<Vec<u8>> {
    let mut docx = Docx::new();

    for section in &document.sections {
        docx = match section {
            Section::Header(header) => add_header(docx, header),
            Section::Table { heading, table } => {
                add_heading(docx, heading).add_table(grid_table(table))
            }
            Section::Paragraph { heading, lines } => {
                let mut docx = add_heading(docx, heading);
                for text in lines {
                    for line in text.lines() {
                        docx = docx.add_paragraph(body_paragraph(line));
                    }
                }
                docx
            }
        };
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| QuoteError::Render(e.to_string()))?;

    Ok(buf.into_inner())
}

fn add_header(docx: Docx, header: &HeaderBlock) -> Docx {
    let organization = Run::new()
        .add_text(&header.organization)
        .bold()
        .size(ORGANIZATION_SIZE);
    let title = Run::new().add_text(&header.title).bold().size(TITLE_SIZE);

    let mut docx = docx
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Left)
                .add_run(organization),
        )
        .add_paragraph(Paragraph::new().align(AlignmentType::Left).add_run(title));

    if let Some(client) = &header.client_line {
        docx = docx.add_paragraph(body_paragraph(client));
    }
    docx.add_paragraph(body_paragraph(&header.date_line))
}

fn add_heading(docx: Docx, heading: &str) -> Docx {
    let run = Run::new().add_text(heading).bold().size(HEADING_SIZE);
    docx.add_paragraph(Paragraph::new().add_run(run))
}

fn body_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).size(BODY_SIZE))
}

fn cell(text: &str, bold: bool) -> TableCell {
    let mut run = Run::new().add_text(text).size(BODY_SIZE);
    if bold {
        run = run.bold();
    }
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}

/// Bold header row, then data rows, with a single-line border on every edge
/// and between every cell.
fn grid_table(table: &DocTable) -> Table {
    let mut rows = Vec::with_capacity(table.row_count());
    rows.push(TableRow::new(
        table.header.iter().map(|h| cell(h, true)).collect(),
    ));
    for row in &table.rows {
        rows.push(TableRow::new(row.iter().map(|v| cell(v, false)).collect()));
    }

    [
        TableBorderPosition::Top,
        TableBorderPosition::Left,
        TableBorderPosition::Bottom,
        TableBorderPosition::Right,
        TableBorderPosition::InsideH,
        TableBorderPosition::InsideV,
    ]
    .into_iter()
    .fold(Table::new(rows), |t, position| {
        t.set_border(
            TableBorder::new(position)
                .border_type(BorderType::Single)
                .size(GRID_BORDER_SIZE)
                .color(GRID_BORDER_COLOR),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    fn sample() -> QuoteDocument {
        let mut table = DocTable::new(["Company", "Plan"]);
        table.push_row(["AlphaLife", "TermSecure"]);

        QuoteDocument {
            sections: vec![
                Section::Header(HeaderBlock {
                    organization: "Incremint Edge Pvt Ltd".into(),
                    title: "Final Incremint Dual-Pay Term Quote".into(),
                    client_line: Some("Client: A. Sharma".into()),
                    date_line: "Date: 07-03-2026 14:05".into(),
                }),
                Section::Table {
                    heading: "Premium Comparison (Regular/10 Pay)".into(),
                    table,
                },
                Section::Paragraph {
                    heading: "Contact Now".into(),
                    lines: vec!["Agent Name: ____\nMobile: ____".into()],
                },
            ],
        }
    }

    #[test]
    fn test_render_is_zip() {
        let bytes = render_docx(&sample()).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_render_contains_text() {
        let xml = document_xml(&render_docx(&sample()).unwrap());
        assert!(xml.contains("Incremint Edge Pvt Ltd"));
        assert!(xml.contains("Client: A. Sharma"));
        assert!(xml.contains("AlphaLife"));
        assert!(xml.contains("Agent Name: ____"));
        assert!(xml.contains("Mobile: ____"));
    }

    #[test]
    fn test_render_tables_fully_gridded() {
        let xml = document_xml(&render_docx(&sample()).unwrap());
        for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
            assert!(xml.contains(edge), "missing {edge} border");
        }
        assert!(xml.contains("w:val=\"single\""));
    }

    #[test]
    fn test_render_empty_document() {
        let bytes = render_docx(&QuoteDocument::default()).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_render_special_characters() {
        let mut doc = sample();
        doc.push(Section::Paragraph {
            heading: "Advisory Note".into(),
            lines: vec!["Premium < 10% & \"fixed\" \u{26a0}\u{fe0f}".into()],
        });
        let xml = document_xml(&render_docx(&doc).unwrap());
        assert!(xml.contains("&amp;"));
    }
}
