//! Typed views over the known quote sheets.
//!
//! Column names are free-form in the input; each view looks up a fixed set
//! of names and ignores everything else.

use tracing::debug;

use crate::tables::{Row, Table, WorkbookTables, CLIENT_DETAILS, FINAL_NOTES, PREMIUMS};

pub mod columns {
    pub const CLIENT_NAME: &str = "Client Name";

    pub const SUM_ASSURED: &str = "Sum Assured";
    pub const POLICY_TERM: &str = "Policy Term";
    pub const COVER_TILL_AGE: &str = "Cover Till Age";
    pub const PPT: &str = "PPT";

    pub const INSURANCE_COMPANY: &str = "Insurance Company";
    pub const PLAN_NAME: &str = "Plan Name";
    pub const REGULAR_PREMIUM: &str = "Regular Premium";
    /// Preferred name of the 10-pay column.
    pub const TEN_PAY_PREMIUM: &str = "10 Pay Premium";
    /// Fallback when [`TEN_PAY_PREMIUM`] is absent.
    pub const TEN_PAY: &str = "10 Pay";
    pub const SPECIAL_NOTES: &str = "Special Notes";
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

// ---------------------------------------------------------------------------
// Client details
// ---------------------------------------------------------------------------

/// Cover fields inferred from the first client row. A field is `Some` only
/// when its column exists in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverInfo {
    pub sum_assured: Option<String>,
    pub policy_term: Option<String>,
    pub cover_till_age: Option<String>,
    pub ppt: Option<String>,
}

impl CoverInfo {
    pub const HEADERS: [&'static str; 4] = [
        columns::SUM_ASSURED,
        columns::POLICY_TERM,
        columns::COVER_TILL_AGE,
        columns::PPT,
    ];

    pub fn from_row(row: Row<'_>) -> Self {
        Self {
            sum_assured: owned(row.get(columns::SUM_ASSURED)),
            policy_term: owned(row.get(columns::POLICY_TERM)),
            cover_till_age: owned(row.get(columns::COVER_TILL_AGE)),
            ppt: owned(row.get(columns::PPT)),
        }
    }

    /// Table cells in [`Self::HEADERS`] order; absent fields are empty.
    pub fn cells(&self) -> [String; 4] {
        [
            &self.sum_assured,
            &self.policy_term,
            &self.cover_till_age,
            &self.ppt,
        ]
        .map(|v| v.clone().unwrap_or_default())
    }
}

/// First row of the "Client Details" sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDetails {
    /// Non-blank "Client Name" value, if the column exists.
    pub client_name: Option<String>,
    /// Every `(column, value)` of the first row, in column order.
    pub fields: Vec<(String, String)>,
    pub cover: CoverInfo,
}

impl ClientDetails {
    /// Returns `None` for an empty table. Rows after the first are ignored:
    /// a quote is prepared for a single client.
    pub fn from_table(table: &Table) -> Option<Self> {
        let row = table.first_row()?;
        if table.len() > 1 {
            debug!(
                ignored = table.len() - 1,
                "client details has more than one row; using the first"
            );
        }

        let client_name = row
            .get(columns::CLIENT_NAME)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Some(Self {
            client_name,
            fields: row
                .fields()
                .map(|(c, v)| (c.to_string(), v.to_string()))
                .collect(),
            cover: CoverInfo::from_row(row),
        })
    }
}

// ---------------------------------------------------------------------------
// Premiums
// ---------------------------------------------------------------------------

/// One insurer plan from the "Premiums" sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PremiumRow {
    pub insurance_company: Option<String>,
    pub plan_name: Option<String>,
    pub regular_premium: Option<String>,
    /// "10 Pay Premium", else "10 Pay".
    pub ten_pay_premium: Option<String>,
    pub special_notes: Option<String>,
}

impl PremiumRow {
    pub fn from_row(row: Row<'_>) -> Self {
        Self {
            insurance_company: owned(row.get(columns::INSURANCE_COMPANY)),
            plan_name: owned(row.get(columns::PLAN_NAME)),
            regular_premium: owned(row.get(columns::REGULAR_PREMIUM)),
            ten_pay_premium: owned(
                row.get(columns::TEN_PAY_PREMIUM)
                    .or_else(|| row.get(columns::TEN_PAY)),
            ),
            special_notes: owned(row.get(columns::SPECIAL_NOTES)),
        }
    }

    /// All rows of a premiums table, in input order.
    pub fn from_table(table: &Table) -> Vec<Self> {
        table.rows().map(Self::from_row).collect()
    }
}

// ---------------------------------------------------------------------------
// Final notes
// ---------------------------------------------------------------------------

/// Advisory text assembled from the "Final Notes" sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalNotes(pub String);

impl FinalNotes {
    /// Cells of a row are space-joined, then rows are space-joined in order.
    /// Returns `None` for an empty table.
    pub fn from_table(table: &Table) -> Option<Self> {
        if table.is_empty() {
            return None;
        }
        let text = table
            .rows()
            .map(|row| row.values().join(" "))
            .collect::<Vec<_>>()
            .join(" ");
        Some(Self(text))
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Workbook accessors
// ---------------------------------------------------------------------------

impl WorkbookTables {
    pub fn client_details(&self) -> Option<ClientDetails> {
        self.get(CLIENT_DETAILS).and_then(ClientDetails::from_table)
    }

    /// `None` when the sheet is absent; an empty vec when it has no rows.
    pub fn premiums(&self) -> Option<Vec<PremiumRow>> {
        self.get(PREMIUMS).map(PremiumRow::from_table)
    }

    pub fn final_notes(&self) -> Option<FinalNotes> {
        self.get(FINAL_NOTES).and_then(FinalNotes::from_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        Table::from_grid(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_client_details_first_row_only() {
        let t = table(&[
            &["Client Name", "Age", "Sum Assured"],
            &["A. Sharma", "35", "5000000"],
            &["B. Rao", "41", "100"],
        ]);
        let client = ClientDetails::from_table(&t).unwrap();
        assert_eq!(client.client_name.as_deref(), Some("A. Sharma"));
        assert_eq!(client.fields.len(), 3);
        assert_eq!(client.fields[1], ("Age".to_string(), "35".to_string()));
        assert_eq!(client.cover.sum_assured.as_deref(), Some("5000000"));
    }

    #[test]
    fn test_client_name_blank_or_missing() {
        let blank = table(&[&["Client Name", "Age"], &["  ", "35"]]);
        assert_eq!(ClientDetails::from_table(&blank).unwrap().client_name, None);

        let missing = table(&[&["Age"], &["35"]]);
        assert_eq!(ClientDetails::from_table(&missing).unwrap().client_name, None);

        assert!(ClientDetails::from_table(&Table::default()).is_none());
    }

    #[test]
    fn test_cover_cells_fill_missing_with_empty() {
        let t = table(&[
            &["Client Name", "Sum Assured", "Policy Term"],
            &["A. Sharma", "5000000", "20"],
        ]);
        let cover = ClientDetails::from_table(&t).unwrap().cover;
        assert_eq!(cover.cells(), ["5000000", "20", "", ""]);
        assert_eq!(cover.cover_till_age, None);
    }

    #[test]
    fn test_premium_row_ten_pay_fallback() {
        let t = table(&[
            &["Insurance Company", "Plan Name", "Regular Premium", "10 Pay"],
            &["AlphaLife", "TermSecure", "12000", "28000"],
        ]);
        let rows = PremiumRow::from_table(&t);
        assert_eq!(rows[0].ten_pay_premium.as_deref(), Some("28000"));
        assert_eq!(rows[0].special_notes, None);
    }

    #[test]
    fn test_premium_row_prefers_ten_pay_premium() {
        let t = table(&[
            &["10 Pay", "10 Pay Premium"],
            &["1", "2"],
        ]);
        let rows = PremiumRow::from_table(&t);
        assert_eq!(rows[0].ten_pay_premium.as_deref(), Some("2"));
    }

    #[test]
    fn test_final_notes_joining() {
        let t = table(&[
            &["Note", "Extra"],
            &["Prefer 10 Pay.", ""],
            &["Review yearly.", "Thanks"],
        ]);
        let notes = FinalNotes::from_table(&t).unwrap();
        assert_eq!(notes.text(), "Prefer 10 Pay.  Review yearly. Thanks");
        assert!(FinalNotes::from_table(&Table::default()).is_none());
    }

    #[test]
    fn test_workbook_accessors() {
        let tables = WorkbookTables::new().with_table(PREMIUMS, Table::default());
        assert_eq!(tables.premiums(), Some(Vec::new()));
        assert!(tables.client_details().is_none());
        assert!(tables.final_notes().is_none());
    }
}
