use crate::error::ApiError;
use core_types::RawCell;

/// A tab as received: a header row and the data rows beneath it.
///
/// Every row has exactly `width()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<RawCell>>,
}

impl Table {
    /// Builds a table, padding short rows with `Empty` cells.
    pub fn new(mut headers: Vec<String>, mut rows: Vec<Vec<RawCell>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);

        for row in &mut rows {
            row.resize(width, RawCell::Empty);
        }

        headers.resize(width, String::new());

        Self { headers, rows }
    }

    /// Parses CSV text. Rows above `header_row` are discarded.
    ///
    /// A column whose non-blank cells all read as plain floating-point numbers
    /// is typed as `Number`; any other column keeps its text. Blank cells and
    /// spreadsheet missing-value markers (`#N/A`, `NULL`, ...) are `Empty`.
    pub fn from_csv(text: &str, header_row: usize) -> Result<Self, ApiError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader
            .records()
            .skip(header_row)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();

        let Some(header) = records.next() else {
            return Ok(Self::default());
        };
        let headers = header.iter().map(|h| h.trim().to_string()).collect();

        let raw: Vec<Vec<String>> = records
            .map(|record| record.iter().map(str::to_string).collect())
            .collect();

        let mut table = Self::new(
            headers,
            raw.into_iter()
                .map(|row| row.into_iter().map(text_cell).collect())
                .collect(),
        );
        table.infer_numeric_columns();
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<RawCell>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column whose header equals `label` (surrounding whitespace ignored).
    pub fn column_by_header(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.headers.iter().position(|h| h.trim() == label)
    }

    fn infer_numeric_columns(&mut self) {
        for column in 0..self.width() {
            let mut filled = self
                .rows
                .iter()
                .map(|row| &row[column])
                .filter(|cell| !cell.is_blank())
                .peekable();
            let numeric = filled.peek().is_some() && filled.all(|cell| plain_number(cell).is_some());
            if !numeric {
                continue;
            }
            for row in &mut self.rows {
                if let Some(value) = plain_number(&row[column]) {
                    row[column] = RawCell::Number(value);
                }
            }
        }
    }
}

/// Markers that spreadsheets and CSV exports use for a missing value.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || MISSING_MARKERS.contains(&value)
}

fn text_cell(value: String) -> RawCell {
    if is_missing(&value) {
        RawCell::Empty
    } else {
        RawCell::Text(value)
    }
}

fn plain_number(cell: &RawCell) -> Option<f64> {
    cell.as_text()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
