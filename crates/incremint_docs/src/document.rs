/// Top-of-document block: organization, title, client and timestamp lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub organization: String,
    pub title: String,
    /// `Client: <name>`, omitted when no client name is known.
    pub client_line: Option<String>,
    /// `Date: DD-MM-YYYY HH:MM`.
    pub date_line: String,
}

/// A fully gridded table: one header row followed by data rows of the same
/// width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DocTable {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Rows including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Header(HeaderBlock),
    Table { heading: String, table: DocTable },
    Paragraph { heading: String, lines: Vec<String> },
}

impl Section {
    pub fn heading(&self) -> Option<&str> {
        match self {
            Section::Header(_) => None,
            Section::Table { heading, .. } | Section::Paragraph { heading, .. } => {
                Some(heading.as_str())
            }
        }
    }
}

/// The rendered quote, as an ordered list of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteDocument {
    pub sections: Vec<Section>,
}

impl QuoteDocument {
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn header(&self) -> Option<&HeaderBlock> {
        self.sections.iter().find_map(|s| match s {
            Section::Header(h) => Some(h),
            _ => None,
        })
    }

    pub fn headings(&self) -> Vec<&str> {
        self.sections.iter().filter_map(Section::heading).collect()
    }

    pub fn table(&self, heading: &str) -> Option<&DocTable> {
        self.sections.iter().find_map(|s| match s {
            Section::Table { heading: h, table } if h == heading => Some(table),
            _ => None,
        })
    }

    pub fn paragraph(&self, heading: &str) -> Option<&[String]> {
        self.sections.iter().find_map(|s| match s {
            Section::Paragraph { heading: h, lines } if h == heading => Some(lines.as_slice()),
            _ => None,
        })
    }

    /// Plain-text dump, one line per header line, heading, table row or
    /// paragraph line. Table cells are separated by ` | `.
    pub fn to_plain_text(&self) -> String {
        let mut out = Vec::new();
        for section in &self.sections {
            match section {
                Section::Header(h) => {
                    out.push(h.organization.clone());
                    out.push(h.title.clone());
                    if let Some(client) = &h.client_line {
                        out.push(client.clone());
                    }
                    out.push(h.date_line.clone());
                }
                Section::Table { heading, table } => {
                    out.push(heading.clone());
                    out.push(table.header.join(" | "));
                    out.extend(table.rows.iter().map(|r| r.join(" | ")));
                }
                Section::Paragraph { heading, lines } => {
                    out.push(heading.clone());
                    out.extend(lines.iter().cloned());
                }
            }
        }
        out.join("\n")
    }
}
