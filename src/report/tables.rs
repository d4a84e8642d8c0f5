//! Tables printed in the report
//!
//! Each builder turns a derived table into rows of already formatted text
//! plus the column geometry the PDF layout needs.

use crate::models::{CategorySpending, Money, SubCategorySpending, TopSpending};

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One column of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    /// Width in millimetres
    pub width: f64,
    pub align: Align,
}

impl Column {
    fn left(header: &str, width: f64) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Left,
        }
    }

    fn right(header: &str, width: f64) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Right,
        }
    }
}

/// A formatted table ready for layout
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Total width in millimetres
    pub fn width(&self) -> f64 {
        self.columns.iter().map(|c| c.width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Top expenses of the month
    pub fn top_spending(rows: &[TopSpending], symbol: &str) -> Self {
        Self {
            columns: vec![
                Column::right("#", 8.0),
                Column::left("Date", 22.0),
                Column::left("Counterparty", 58.0),
                Column::left("Category", 34.0),
                Column::left("Sub-category", 34.0),
                Column::right("Amount", 24.0),
            ],
            rows: rows
                .iter()
                .map(|row| {
                    vec![
                        row.rank.to_string(),
                        row.booking_date.format("%d.%m.%Y").to_string(),
                        row.counterparty.clone(),
                        row.category.clone(),
                        row.sub_category.clone(),
                        amount(row.amount, symbol),
                    ]
                })
                .collect(),
        }
    }

    /// Top expenses grouped by category
    pub fn top_per_category(rows: &[TopSpending], symbol: &str) -> Self {
        Self {
            columns: vec![
                Column::left("Category", 34.0),
                Column::right("#", 8.0),
                Column::left("Date", 22.0),
                Column::left("Counterparty", 58.0),
                Column::left("Sub-category", 34.0),
                Column::right("Amount", 24.0),
            ],
            rows: rows
                .iter()
                .map(|row| {
                    vec![
                        row.category.clone(),
                        row.rank.to_string(),
                        row.booking_date.format("%d.%m.%Y").to_string(),
                        row.counterparty.clone(),
                        row.sub_category.clone(),
                        amount(row.amount, symbol),
                    ]
                })
                .collect(),
        }
    }

    /// Category totals, largest first
    pub fn categories(rows: &[CategorySpending], symbol: &str) -> Self {
        let mut sorted: Vec<&CategorySpending> = rows.iter().collect();
        sorted.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        Self {
            columns: vec![
                Column::left("Category", 70.0),
                Column::right("Total", 30.0),
                Column::right("Mean", 30.0),
                Column::right("Count", 20.0),
            ],
            rows: sorted
                .into_iter()
                .map(|row| {
                    vec![
                        row.category.clone(),
                        amount(row.total, symbol),
                        amount(row.mean, symbol),
                        row.count.to_string(),
                    ]
                })
                .collect(),
        }
    }

    /// Sub-category totals, grouped by category
    pub fn sub_categories(rows: &[SubCategorySpending], symbol: &str) -> Self {
        Self {
            columns: vec![
                Column::left("Category", 45.0),
                Column::left("Sub-category", 55.0),
                Column::right("Total", 30.0),
                Column::right("Mean", 30.0),
                Column::right("Count", 20.0),
            ],
            rows: rows
                .iter()
                .map(|row| {
                    vec![
                        row.category.clone(),
                        row.sub_category.clone(),
                        amount(row.total, symbol),
                        amount(row.mean, symbol),
                        row.count.to_string(),
                    ]
                })
                .collect(),
        }
    }
}

fn amount(value: Money, symbol: &str) -> String {
    value.format_with_symbol(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::report;

    #[test]
    fn test_top_spending_table() {
        let data = report();
        let table = TableData::top_spending(&data.top_spending, "€");

        assert_eq!(table.columns.len(), 6);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "1");
        assert_eq!(table.rows[0][1], "03.02.2025");
        assert_eq!(table.rows[0][5], "900.00 €");
        assert_eq!(table.columns[5].align, Align::Right);
    }

    #[test]
    fn test_categories_sorted_by_total() {
        let data = report();
        let table = TableData::categories(&data.categories, "");

        let names: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["Wohnen", "Lebensmittel", "Freizeit"]);
        assert_eq!(table.rows[1][1], "15.00");
        assert_eq!(table.rows[1][2], "7.50");
    }

    #[test]
    fn test_tables_fit_page_width() {
        let data = report();
        // A4 minus 15 mm margins
        let usable = 210.0 - 30.0;
        assert!(TableData::top_spending(&data.top_spending, "€").width() <= usable);
        assert!(TableData::top_per_category(&data.top_per_category, "€").width() <= usable);
        assert!(TableData::categories(&data.categories, "€").width() <= usable);
        assert!(TableData::sub_categories(&data.sub_categories, "€").width() <= usable);
    }

    #[test]
    fn test_empty_table() {
        let table = TableData::sub_categories(&[], "€");
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 5);
    }
}
