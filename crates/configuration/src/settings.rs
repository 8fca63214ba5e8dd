use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub sheets: Sheets,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the spreadsheet lives and how its CSV export is read.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub spreadsheet_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Zero-based index of the row holding the column headers.
    #[serde(default)]
    pub header_row: usize,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

fn default_base_url() -> String {
    "https://docs.google.com/spreadsheets/d".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Freshness policy of fetched tabs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a fetched tab is reused. `0s` refetches on every request.
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
        }
    }
}

/// Number formatting used by the sheet. Defaults to Brazilian Portuguese.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub thousands_separator: char,
    pub currency_marker: String,
    pub percent_marker: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: '.',
            currency_marker: "R$".to_string(),
            percent_marker: "%".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info" or "analytics=debug").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "meridian.log".to_string(),
        }
    }
}

// ==============================================================================
// Sheet layout
// ==============================================================================

/// Locates a column of a tab, either by spreadsheet letter or by header label.
///
/// In TOML: `{ letter = "G" }` or `{ header = "Classe" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRef {
    Letter(String),
    Header(String),
}

impl ColumnRef {
    pub fn letter(letter: &str) -> Self {
        ColumnRef::Letter(letter.to_string())
    }

    pub fn header(label: &str) -> Self {
        ColumnRef::Header(label.to_string())
    }

    /// Zero-based index of a `Letter` column ("A" is 0, "AA" is 26).
    ///
    /// `None` for header references and malformed letters.
    pub fn letter_index(&self) -> Option<usize> {
        let ColumnRef::Letter(letters) = self else {
            return None;
        };
        if letters.is_empty() || letters.len() > 3 {
            return None;
        }
        letters.chars().try_fold(0usize, |acc, c| {
            let c = c.to_ascii_uppercase();
            c.is_ascii_uppercase()
                .then(|| acc * 26 + (c as usize - 'A' as usize + 1))
        })
        .map(|one_based| one_based - 1)
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        match self {
            ColumnRef::Letter(_) if self.letter_index().is_none() => Err(
                ConfigError::ValidationError(format!("{}: invalid column letter {:?}", field, self)),
            ),
            ColumnRef::Header(label) if label.trim().is_empty() => Err(
                ConfigError::ValidationError(format!("{}: empty column header", field)),
            ),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Letter(letter) => write!(f, "column {}", letter),
            ColumnRef::Header(label) => write!(f, "header \"{}\"", label),
        }
    }
}

/// The three tabs the report reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sheets {
    pub history: HistorySheet,
    pub allocation: AllocationSheet,
    pub returns: ReturnsSheet,
}

/// The NAV history tab.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistorySheet {
    pub gid: String,
    pub date: ColumnRef,
    pub nav: ColumnRef,
    pub aum: ColumnRef,
    pub benchmark: ColumnRef,
}

impl Default for HistorySheet {
    fn default() -> Self {
        Self {
            gid: "0".to_string(),
            date: ColumnRef::letter("A"),
            nav: ColumnRef::letter("B"),
            aum: ColumnRef::letter("D"),
            benchmark: ColumnRef::letter("E"),
        }
    }
}

/// The allocation tab: a category/weight block and the invested-assets listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AllocationSheet {
    pub gid: String,
    pub category: ColumnRef,
    pub weight: ColumnRef,
    pub asset: ColumnRef,
    pub description: ColumnRef,
    pub position: ColumnRef,
    pub listing_weight: ColumnRef,
}

impl Default for AllocationSheet {
    fn default() -> Self {
        Self {
            gid: "857049627".to_string(),
            category: ColumnRef::letter("G"),
            weight: ColumnRef::letter("H"),
            asset: ColumnRef::letter("A"),
            description: ColumnRef::letter("B"),
            position: ColumnRef::letter("C"),
            listing_weight: ColumnRef::letter("D"),
        }
    }
}

/// The per-asset performance tab.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReturnsSheet {
    pub gid: String,
    pub asset: ColumnRef,
    pub month_to_date: ColumnRef,
    pub year_to_date: ColumnRef,
    pub trailing_12m: ColumnRef,
}

impl Default for ReturnsSheet {
    fn default() -> Self {
        Self {
            gid: "1036617467".to_string(),
            asset: ColumnRef::letter("A"),
            month_to_date: ColumnRef::letter("B"),
            year_to_date: ColumnRef::letter("C"),
            trailing_12m: ColumnRef::letter("D"),
        }
    }
}

// ==============================================================================
// Validation
// ==============================================================================

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.spreadsheet_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.spreadsheet_id must be set".to_string(),
            ));
        }

        let locale = &self.locale;
        if locale.decimal_separator == locale.thousands_separator {
            return Err(ConfigError::ValidationError(format!(
                "locale: decimal and thousands separator are both '{}'",
                locale.decimal_separator
            )));
        }
        for separator in [locale.decimal_separator, locale.thousands_separator] {
            if !core_types::is_valid_separator(separator) {
                return Err(ConfigError::ValidationError(format!(
                    "locale: '{}' cannot be used as a separator",
                    separator
                )));
            }
        }

        let history = &self.sheets.history;
        let allocation = &self.sheets.allocation;
        let returns = &self.sheets.returns;

        for (name, gid) in [
            ("sheets.history.gid", &history.gid),
            ("sheets.allocation.gid", &allocation.gid),
            ("sheets.returns.gid", &returns.gid),
        ] {
            if gid.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{} must be set", name)));
            }
        }

        let columns = [
            ("sheets.history.date", &history.date),
            ("sheets.history.nav", &history.nav),
            ("sheets.history.aum", &history.aum),
            ("sheets.history.benchmark", &history.benchmark),
            ("sheets.allocation.category", &allocation.category),
            ("sheets.allocation.weight", &allocation.weight),
            ("sheets.allocation.asset", &allocation.asset),
            ("sheets.allocation.description", &allocation.description),
            ("sheets.allocation.position", &allocation.position),
            ("sheets.allocation.listing_weight", &allocation.listing_weight),
            ("sheets.returns.asset", &returns.asset),
            ("sheets.returns.month_to_date", &returns.month_to_date),
            ("sheets.returns.year_to_date", &returns.year_to_date),
            ("sheets.returns.trailing_12m", &returns.trailing_12m),
        ];
        for (name, column) in columns {
            column.validate(name)?;
        }

        Ok(())
    }
}
