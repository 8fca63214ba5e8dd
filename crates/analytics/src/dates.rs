use chrono::{Datelike, NaiveDate};
use core_types::RawCell;

/// Formats tried in order. The flag marks four-digit-year formats.
const FORMATS: [(&str, bool); 11] = [
    ("%Y-%m-%d", true),
    ("%Y/%m/%d", true),
    ("%d/%m/%Y", true),
    ("%d-%m-%Y", true),
    ("%d.%m.%Y", true),
    ("%d/%m/%y", false),
    ("%d-%m-%y", false),
    ("%d.%m.%y", false),
    // Month-first, for values whose day-first reading is not a calendar date.
    ("%m/%d/%Y", true),
    ("%m-%d-%Y", true),
    ("%m/%d/%y", false),
];

/// Reads a date written day-first, as in `31/12/2023`.
///
/// Accepted forms:
/// - `d/m/Y`, `d-m-Y` and `d.m.Y`, with one- or two-digit day and month;
/// - two-digit years, where 00-69 is the 2000s and 70-99 the 1900s;
/// - ISO `Y-m-d`;
/// - any of the above followed by a time (`31/12/2023 18:00:00`, `2023-12-31T00:00`),
///   which is ignored.
///
/// Day-first is a preference, not a rule: when the day-first reading is not a
/// calendar date but the month-first one is (`12/31/2023`), the latter is used.
/// Numeric cells are never dates.
pub fn parse_day_first(cell: &RawCell) -> Option<NaiveDate> {
    let text = cell.as_text()?.trim();

    FORMATS.iter().find_map(|&(format, four_digit_year)| {
        let (date, rest) = NaiveDate::parse_and_remainder(text, format).ok()?;
        if !(rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with('T')) {
            return None;
        }
        if four_digit_year && !(1000..=9999).contains(&date.year()) {
            return None;
        }
        Some(date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<NaiveDate> {
        parse_day_first(&RawCell::from(s))
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn reads_day_first_with_common_separators() {
        assert_eq!(parse("02/01/2024"), ymd(2024, 1, 2));
        assert_eq!(parse("2-1-2024"), ymd(2024, 1, 2));
        assert_eq!(parse("31.12.2023"), ymd(2023, 12, 31));
        assert_eq!(parse(" 15/12/2023 "), ymd(2023, 12, 15));
    }

    #[test]
    fn reads_iso_dates_year_first() {
        assert_eq!(parse("2024-01-02"), ymd(2024, 1, 2));
        assert_eq!(parse("2024-01-02T00:00:00"), ymd(2024, 1, 2));
    }

    #[test]
    fn ignores_trailing_time() {
        assert_eq!(parse("30/11/2023 00:00:00"), ymd(2023, 11, 30));
        assert_eq!(parse("30.11.23 12:30"), ymd(2023, 11, 30));
    }

    #[test]
    fn expands_two_digit_years() {
        assert_eq!(parse("01/02/24"), ymd(2024, 2, 1));
        assert_eq!(parse("01/02/99"), ymd(1999, 2, 1));
        assert_eq!(parse("01/02/69"), ymd(2069, 2, 1));
        assert_eq!(parse("01/02/70"), ymd(1970, 2, 1));
        assert_eq!(parse("1-2-24"), ymd(2024, 2, 1));
    }

    #[test]
    fn falls_back_to_month_first_when_day_first_is_impossible() {
        assert_eq!(parse("12/31/2023"), ymd(2023, 12, 31));
    }

    #[test]
    fn rejects_unreadable_dates() {
        for raw in ["", "Data", "31/02/2023", "2023/13/45", "1/2", "aa/bb/cccc", "123/1/2023", "1/2/123", "02/01/2024x"] {
            assert_eq!(parse(raw), None, "input {:?}", raw);
        }
        assert_eq!(parse_day_first(&RawCell::Empty), None);
        assert_eq!(parse_day_first(&RawCell::Number(45000.0)), None);
    }
}
