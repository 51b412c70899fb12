use std::collections::BTreeMap;

/// Sheet holding the single client the quote is prepared for.
pub const CLIENT_DETAILS: &str = "Client Details";
/// Sheet holding one row per insurer plan.
pub const PREMIUMS: &str = "Premiums";
/// Optional sheet whose text becomes the advisory note.
pub const FINAL_NOTES: &str = "Final Notes";

/// A worksheet reduced to text: named columns plus rows of cells.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from column names and rows. Short rows are padded with
    /// empty cells, long rows are cut to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a table from a raw grid whose first row is the header.
    ///
    /// Blank header cells become `Unnamed: <index>`. Rows with no content are
    /// skipped. A grid without data rows yields an empty table with no columns.
    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        let mut grid = grid.into_iter();
        let Some(header) = grid.next() else {
            return Self::default();
        };

        let columns: Vec<String> = header
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let name = name.trim();
                if name.is_empty() {
                    format!("Unnamed: {idx}")
                } else {
                    name.to_string()
                }
            })
            .collect();

        let rows: Vec<Vec<String>> = grid
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .collect();

        if rows.is_empty() || columns.is_empty() {
            return Self::default();
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    pub fn first_row(&self) -> Option<Row<'_>> {
        self.rows().next()
    }
}

/// Borrowed view of one table row with lookup by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell under the first column called `name`, if that column exists.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|idx| self.cells[idx].as_str())
    }

    /// Cell values in column order.
    pub fn values(&self) -> &'a [String] {
        self.cells
    }

    /// `(column, value)` pairs in column order.
    pub fn fields(self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns
            .iter()
            .zip(self.cells.iter())
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

/// Named tables read from one workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookTables {
    sheets: BTreeMap<String, Table>,
}

impl WorkbookTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.sheets.insert(name.into(), table);
    }

    pub fn with_table(mut self, name: impl Into<String>, table: Table) -> Self {
        self.insert(name, table);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.sheets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// True when the sheet exists and has at least one data row.
    pub fn has_rows(&self, name: &str) -> bool {
        self.get(name).is_some_and(|t| !t.is_empty())
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
