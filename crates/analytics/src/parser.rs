use crate::error::AnalyticsError;
use core_types::{RawCell, is_valid_separator};
use std::sync::LazyLock;

static DEFAULT_LOCALE: LazyLock<NumberLocale> = LazyLock::new(NumberLocale::default);

/// The result of reading a numeric cell.
///
/// Callers that only need a number use [`ParseOutcome::value`], which maps
/// `Defaulted` to `0.0`. Callers that want diagnostics can tell a real zero
/// apart from a cell that could not be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseOutcome {
    Parsed(f64),
    Defaulted,
}

impl ParseOutcome {
    pub fn value(self) -> f64 {
        match self {
            ParseOutcome::Parsed(value) => value,
            ParseOutcome::Defaulted => 0.0,
        }
    }

    pub fn is_defaulted(self) -> bool {
        matches!(self, ParseOutcome::Defaulted)
    }

    fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            ParseOutcome::Parsed(value) => ParseOutcome::Parsed(f(value)),
            ParseOutcome::Defaulted => ParseOutcome::Defaulted,
        }
    }
}

impl From<Option<f64>> for ParseOutcome {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ParseOutcome::Defaulted, ParseOutcome::Parsed)
    }
}

/// Separator and marker conventions of the numeric text in the sheet.
///
/// The default is the Brazilian convention used by the report:
/// `R$ 1.234.567,89` and `12,5%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLocale {
    decimal_separator: char,
    thousands_separator: char,
    currency_marker: String,
    percent_marker: String,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: '.',
            currency_marker: "R$".to_string(),
            percent_marker: "%".to_string(),
        }
    }
}

impl NumberLocale {
    pub fn new(
        decimal_separator: char,
        thousands_separator: char,
        currency_marker: impl Into<String>,
        percent_marker: impl Into<String>,
    ) -> Result<Self, AnalyticsError> {
        if decimal_separator == thousands_separator {
            return Err(AnalyticsError::InvalidLocale(format!(
                "decimal and thousands separators are both '{}'",
                decimal_separator
            )));
        }
        for separator in [decimal_separator, thousands_separator] {
            if !is_valid_separator(separator) {
                return Err(AnalyticsError::InvalidLocale(format!(
                    "'{}' cannot be used as a separator",
                    separator
                )));
            }
        }

        Ok(Self {
            decimal_separator,
            thousands_separator,
            currency_marker: currency_marker.into(),
            percent_marker: percent_marker.into(),
        })
    }

    /// The process-wide default locale.
    pub fn shared() -> &'static NumberLocale {
        &DEFAULT_LOCALE
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn thousands_separator(&self) -> char {
        self.thousands_separator
    }

    /// Reads a money amount. Numeric cells are returned unchanged.
    pub fn currency(&self, cell: &RawCell) -> ParseOutcome {
        match cell {
            RawCell::Number(value) => ParseOutcome::Parsed(*value),
            RawCell::Empty => ParseOutcome::Defaulted,
            RawCell::Text(text) => self.parse_text(text, &self.currency_marker).into(),
        }
    }

    /// Reads a percentage as a fraction.
    ///
    /// Only text is divided by 100: a numeric cell is assumed to already hold
    /// a fraction and is returned unchanged.
    pub fn percent(&self, cell: &RawCell) -> ParseOutcome {
        match cell {
            RawCell::Number(value) => ParseOutcome::Parsed(*value),
            RawCell::Empty => ParseOutcome::Defaulted,
            RawCell::Text(text) => ParseOutcome::from(self.parse_text(text, &self.percent_marker))
                .map(|value| value / 100.0),
        }
    }

    fn parse_text(&self, text: &str, marker: &str) -> Option<f64> {
        let unmarked = if marker.is_empty() {
            text.to_string()
        } else {
            text.replace(marker, "")
        };

        let normalized: String = unmarked
            .chars()
            .filter(|c| !c.is_whitespace() && *c != self.thousands_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();

        // `f64::from_str` accepts "NaN" and "inf"; neither is a usable amount.
        normalized.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

/// Parses a currency cell with the default locale. Never fails: unreadable input is `0.0`.
///
/// A malformed value is indistinguishable from a true zero here; use
/// [`NumberLocale::currency`] when the difference matters.
pub fn parse_currency(cell: &RawCell) -> f64 {
    NumberLocale::shared().currency(cell).value()
}

/// Parses a percentage cell with the default locale. Never fails: unreadable input is `0.0`.
pub fn parse_percent(cell: &RawCell) -> f64 {
    NumberLocale::shared().percent(cell).value()
}
