//! Cell interpretation shared by the workbook and CSV readers

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::columns::{ColumnIndex, ColumnNames};
use crate::error::LoadError;
use crate::models::{Money, Transaction, YearMonth};

// `%Y` also accepts two digits, so the short year has to come first
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%y", "%d.%m.%Y"];
const MIN_YEAR: i32 = 1000;
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// A single cell value, independent of the file format it came from
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell<'a> {
    Empty,
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
    /// Booleans and spreadsheet error values
    Other(String),
}

impl<'a> Cell<'a> {
    /// Classify a raw text field
    pub fn from_text(text: &'a str) -> Self {
        if text.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text)
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            Cell::Empty => "<empty>".to_string(),
            Cell::Text(text) => format!("'{}'", text),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.to_string(),
            Cell::Other(other) => other.clone(),
        }
    }
}

/// Parse a date from text in any of the accepted formats
///
/// Years before 1000 are rejected; they only come from a truncated year.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .filter(|date| date.year() >= MIN_YEAR)
}

/// Turn one data row into a transaction
///
/// `row` is the 1-based row number in the source file, used in errors.
/// Returns `Ok(None)` for rows where every required cell is empty.
pub(crate) fn parse_row(
    row: usize,
    cells: &[Cell<'_>],
    index: &ColumnIndex,
    names: &ColumnNames,
) -> Result<Option<Transaction>, LoadError> {
    let at = |i: usize| cells.get(i).cloned().unwrap_or(Cell::Empty);

    let required = [
        index.booking_date,
        index.amount,
        index.counterparty,
        index.category,
        index.sub_category,
        index.account,
        index.analysis_month,
    ];
    if required.iter().all(|&i| at(i).is_empty()) {
        return Ok(None);
    }

    let invalid = |column: &str, cell: &Cell<'_>| LoadError::InvalidCell {
        row,
        column: column.to_string(),
        value: cell.describe(),
    };

    let date_cell = at(index.booking_date);
    let booking_date = match &date_cell {
        Cell::Date(date) => Some(*date),
        Cell::Text(text) => parse_date(text),
        _ => None,
    }
    .ok_or_else(|| invalid(&names.booking_date, &date_cell))?;

    let amount_cell = at(index.amount);
    let amount = match &amount_cell {
        Cell::Number(n) => Money::from_units(*n),
        Cell::Text(text) => Money::parse(text).ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(&names.amount, &amount_cell))?;

    let month_cell = at(index.analysis_month);
    let analysis_month = match &month_cell {
        Cell::Date(date) => Some(YearMonth::from_date(*date)),
        Cell::Text(text) => YearMonth::parse(text)
            .ok()
            .or_else(|| parse_date(text).map(YearMonth::from_date)),
        _ => None,
    }
    .ok_or_else(|| invalid(&names.analysis_month, &month_cell))?;

    Ok(Some(
        Transaction::new(booking_date, amount)
            .with_counterparty(text(&at(index.counterparty)))
            .with_categories(text(&at(index.category)), text(&at(index.sub_category)))
            .with_account(text(&at(index.account)))
            .with_analysis_month(analysis_month),
    ))
}

/// Free-form text of a cell; numbers and dates are rendered as text
fn text(cell: &Cell<'_>) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(text) => text.trim().to_string(),
        Cell::Number(n) => n.to_string(),
        Cell::Date(d) => d.to_string(),
        Cell::Other(other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> (ColumnIndex, ColumnNames) {
        let names = ColumnNames::default();
        let headers = [
            "Buchungstag",
            "Betrag",
            "Beguenstigter/Auftraggeber",
            "Analyse-Hauptkategorie",
            "Analyse-Unterkategorie",
            "Name Referenzkonto",
            "Analyse-Monat",
        ];
        (names.resolve(&headers).unwrap(), names)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2025-02-14"), Some(date(2025, 2, 14)));
        assert_eq!(parse_date("14.02.2025"), Some(date(2025, 2, 14)));
        assert_eq!(parse_date("14.02.25"), Some(date(2025, 2, 14)));
        assert_eq!(parse_date("2025-02-14T00:00:00"), Some(date(2025, 2, 14)));
        assert_eq!(parse_date("2025-02-14 08:30:00"), Some(date(2025, 2, 14)));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_two_digit_years_land_in_this_century() {
        assert_eq!(parse_date("01.12.24"), Some(date(2024, 12, 1)));
        assert_eq!(parse_date(" 31.01.25 "), Some(date(2025, 1, 31)));
        assert_eq!(parse_date("25-02-14"), None);
    }

    #[test]
    fn test_short_date_analysis_month() {
        let (index, names) = index();
        let cells = [
            Cell::Text("14.02.25"),
            Cell::Text("-3,00"),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Text("14.02.25"),
        ];

        let txn = parse_row(2, &cells, &index, &names).unwrap().unwrap();
        assert_eq!(txn.booking_date, date(2025, 2, 14));
        assert_eq!(txn.analysis_month.to_string(), "2025-02");
    }

    #[test]
    fn test_parse_row_text_cells() {
        let (index, names) = index();
        let cells = [
            Cell::Text("03.02.2025"),
            Cell::Text("-12,50"),
            Cell::Text(" REWE Markt "),
            Cell::Text("Lebensmittel"),
            Cell::Text("Supermarkt"),
            Cell::Text("Girokonto"),
            Cell::Text("2025-02"),
        ];

        let txn = parse_row(2, &cells, &index, &names).unwrap().unwrap();
        assert_eq!(txn.booking_date, date(2025, 2, 3));
        assert_eq!(txn.amount.cents(), -1250);
        assert_eq!(txn.counterparty, "REWE Markt");
        assert_eq!(txn.category, "Lebensmittel");
        assert_eq!(txn.sub_category, "Supermarkt");
        assert_eq!(txn.account, "Girokonto");
        assert_eq!(txn.analysis_month.to_string(), "2025-02");
    }

    #[test]
    fn test_parse_row_native_cells() {
        let (index, names) = index();
        let cells = [
            Cell::Date(date(2025, 1, 31)),
            Cell::Number(2500.0),
            Cell::Text("Arbeitgeber GmbH"),
            Cell::Text("Einkommen"),
            Cell::Text("Gehalt"),
            Cell::Text("Girokonto"),
            Cell::Date(date(2025, 2, 1)),
        ];

        let txn = parse_row(2, &cells, &index, &names).unwrap().unwrap();
        assert_eq!(txn.amount.cents(), 250_000);
        // analysis month is taken as given, not recomputed from the booking date
        assert_eq!(txn.analysis_month.to_string(), "2025-02");
    }

    #[test]
    fn test_empty_row_is_skipped() {
        let (index, names) = index();
        let cells = [Cell::Empty, Cell::Text("  "), Cell::Empty];
        assert_eq!(parse_row(5, &cells, &index, &names).unwrap(), None);
    }

    #[test]
    fn test_empty_text_columns_allowed() {
        let (index, names) = index();
        let cells = [
            Cell::Text("2025-02-03"),
            Cell::Number(-4.2),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Text("2025-02"),
        ];

        let txn = parse_row(2, &cells, &index, &names).unwrap().unwrap();
        assert_eq!(txn.amount.cents(), -420);
        assert!(txn.category.is_empty());
    }

    #[test]
    fn test_invalid_amount_reports_row_and_column() {
        let (index, names) = index();
        let cells = [
            Cell::Text("2025-02-03"),
            Cell::Text("twelve"),
            Cell::Text("Shop"),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Text("2025-02"),
        ];

        let err = parse_row(7, &cells, &index, &names).unwrap_err();
        match err {
            LoadError::InvalidCell { row, column, value } => {
                assert_eq!(row, 7);
                assert_eq!(column, "Betrag");
                assert_eq!(value, "'twelve'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_amount_is_invalid() {
        let (index, names) = index();
        let amounts = [
            Cell::Number(1e300),
            Cell::Number(f64::NAN),
            Cell::Text("99999999999999999"),
        ];
        for amount in amounts {
            let cells = [
                Cell::Text("2025-02-03"),
                amount,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Text("2025-02"),
            ];

            let err = parse_row(4, &cells, &index, &names).unwrap_err();
            assert!(matches!(
                err,
                LoadError::InvalidCell { row: 4, ref column, .. } if column == "Betrag"
            ));
        }
    }

    #[test]
    fn test_invalid_month_is_error() {
        let (index, names) = index();
        let cells = [
            Cell::Text("2025-02-03"),
            Cell::Number(-1.0),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Other("true".into()),
        ];

        let err = parse_row(3, &cells, &index, &names).unwrap_err();
        assert!(err.to_string().contains("Analyse-Monat"));
    }
}
