use chrono::{Local, NaiveDateTime};
use incremint_core::QuoteTemplate;
use tracing::debug;

use crate::document::{DocTable, HeaderBlock, QuoteDocument, Section};
use crate::schema::CoverInfo;
use crate::tables::WorkbookTables;

pub const CLIENT_DETAILS_HEADING: &str = "Client Details";
pub const COVER_DETAILS_HEADING: &str = "Cover Details";
pub const PREMIUM_COMPARISON_HEADING: &str = "Premium Comparison (Regular/10 Pay)";
pub const ADVISORY_NOTE_HEADING: &str = "Advisory Note";

/// Premium table header. The blank first column is reserved for insurer logos.
pub const PREMIUM_HEADERS: [&str; 6] = [
    " ",
    "Company",
    "Plan",
    "Regular Premium",
    "10 Pay Premium",
    "Notes",
];

const DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Turns loaded workbook tables into a [`QuoteDocument`].
///
/// Building never fails: a missing optional sheet drops its section, and a
/// missing column renders as an empty cell.
pub struct QuoteBuilder<'a> {
    template: &'a QuoteTemplate,
}

impl<'a> QuoteBuilder<'a> {
    pub fn new(template: &'a QuoteTemplate) -> Self {
        Self { template }
    }

    /// Build with the current local time in the header.
    pub fn build_now(&self, tables: &WorkbookTables) -> QuoteDocument {
        self.build(tables, Local::now().naive_local())
    }

    pub fn build(&self, tables: &WorkbookTables, generated_at: NaiveDateTime) -> QuoteDocument {
        let mut doc = QuoteDocument::default();
        let client = tables.client_details();

        doc.push(Section::Header(HeaderBlock {
            organization: self.template.organization_name.clone(),
            title: self.template.title.clone(),
            client_line: client
                .as_ref()
                .and_then(|c| c.client_name.as_ref())
                .map(|name| format!("Client: {name}")),
            date_line: format!("Date: {}", generated_at.format(DATE_FORMAT)),
        }));

        if let Some(client) = &client {
            let mut table = DocTable::new(["Field", "Value"]);
            for (field, value) in &client.fields {
                table.push_row([field.as_str(), value.as_str()]);
            }
            doc.push(Section::Table {
                heading: CLIENT_DETAILS_HEADING.into(),
                table,
            });
        }

        let cover = client.map(|c| c.cover).unwrap_or_default();
        let mut cover_table = DocTable::new(CoverInfo::HEADERS);
        cover_table.push_row(cover.cells());
        doc.push(Section::Table {
            heading: COVER_DETAILS_HEADING.into(),
            table: cover_table,
        });

        if let Some(premiums) = tables.premiums() {
            let mut table = DocTable::new(PREMIUM_HEADERS);
            for row in premiums {
                table.push_row([
                    String::new(),
                    row.insurance_company.unwrap_or_default(),
                    row.plan_name.unwrap_or_default(),
                    row.regular_premium.unwrap_or_default(),
                    row.ten_pay_premium.unwrap_or_default(),
                    row.special_notes.unwrap_or_default(),
                ]);
            }
            debug!(rows = table.rows.len(), "premium comparison built");
            doc.push(Section::Table {
                heading: PREMIUM_COMPARISON_HEADING.into(),
                table,
            });
        }

        let advisory = match tables.final_notes() {
            Some(notes) => notes.0,
            None => self.template.default_advisory_note.clone(),
        };
        doc.push(Section::Paragraph {
            heading: ADVISORY_NOTE_HEADING.into(),
            lines: vec![advisory],
        });

        doc.push(Section::Paragraph {
            heading: self.template.contact_heading.clone(),
            lines: vec![
                self.template.agent_line.clone(),
                self.template.mobile_line.clone(),
            ],
        });

        doc
    }
}
