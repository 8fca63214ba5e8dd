use serde::{Deserialize, Serialize};
use std::fmt;

/// An untyped spreadsheet value exactly as the ingestion layer received it.
///
/// Cells may be malformed, empty, or of a different type than the column is
/// supposed to hold. Nothing here is validated; the analytics crate decides how
/// each cell is interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl RawCell {
    /// True for `Empty` and for text made only of whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(text) => text.trim().is_empty(),
            RawCell::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawCell::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Whether `c` can separate digit groups or decimals in cell text.
///
/// Whitespace, digits and signs are part of the number itself.
pub fn is_valid_separator(c: char) -> bool {
    !(c.is_whitespace() || c.is_ascii_digit() || c == '-' || c == '+')
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => Ok(()),
            RawCell::Number(value) => write!(f, "{}", value),
            RawCell::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for RawCell {
    fn from(text: &str) -> Self {
        RawCell::Text(text.to_string())
    }
}

impl From<String> for RawCell {
    fn from(text: String) -> Self {
        RawCell::Text(text)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}
