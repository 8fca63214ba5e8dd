use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the HTTP request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("The spreadsheet export returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Expected CSV from {url} but received '{content_type}' (is the sheet shared publicly?)")]
    NotCsv { url: String, content_type: String },

    #[error("Failed to parse the CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("Sheet '{sheet}' has no {column} for field '{field}'")]
    MissingColumn {
        sheet: String,
        field: String,
        column: String,
    },
}
