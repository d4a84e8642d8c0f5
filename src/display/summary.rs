//! Terminal summary printed after a run

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::format::{format_bar, format_percentage, percentage, truncate};
use crate::report::ReportData;

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct TopRow {
    #[tabled(rename = "#")]
    rank: u32,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Counterparty")]
    counterparty: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format the reporting month for the terminal
pub fn format_summary(data: &ReportData) -> String {
    let symbol = data.options.currency_symbol.as_str();
    let mut output = String::new();

    output.push_str(&format!("Spending summary {}\n", data.month));
    if data.is_empty() {
        output.push_str("No transactions in this month.\n");
        return output;
    }

    let spent = data.total_spent();
    output.push_str(&format!("Transactions: {}\n", data.transaction_count));
    output.push_str(&format!("Spent:        {}\n", spent.format_with_symbol(symbol)));
    if let Some(totals) = data.month_totals() {
        output.push_str(&format!(
            "Income:       {}\n",
            totals.income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Net:          {}\n",
            totals.net().format_with_symbol(symbol)
        ));
    }

    if !data.top_spending.is_empty() {
        let rows = data.top_spending.iter().map(|row| TopRow {
            rank: row.rank,
            date: row.booking_date.format("%d.%m.%Y").to_string(),
            counterparty: truncate(&row.counterparty, 30),
            category: truncate(&row.category, 20),
            amount: row.amount.format_with_symbol(symbol),
        });
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .modify(Columns::new(4..5), Alignment::right());
        output.push_str("\nTop expenses\n");
        output.push_str(&table.to_string());
        output.push('\n');
    }

    if !data.categories.is_empty() {
        let mut categories: Vec<_> = data.categories.iter().collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        let largest = categories.first().map(|c| c.total.as_units()).unwrap_or(0.0);

        let rows = categories.into_iter().map(|row| CategoryRow {
            category: truncate(&row.category, 30),
            total: row.total.format_with_symbol(symbol),
            count: row.count,
            share: format_percentage(percentage(row.total.cents(), spent.cents())),
            bar: format_bar(row.total.as_units(), largest, BAR_WIDTH),
        });
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .modify(Columns::new(1..4), Alignment::right());
        output.push_str("\nCategories\n");
        output.push_str(&table.to_string());
        output.push('\n');
    }

    if !data.unmatched_months.is_empty() {
        let labels: Vec<String> = data.unmatched_months.iter().map(ToString::to_string).collect();
        output.push_str(&format!(
            "\nNote: {} left out of the income/expense chart (only income or only expenses)\n",
            labels.join(", ")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{month, spend};
    use crate::report::fixtures::{options, report};

    #[test]
    fn test_summary_contents() {
        let summary = format_summary(&report());

        assert!(summary.starts_with("Spending summary 2025-02"));
        assert!(summary.contains("Transactions: 5"));
        assert!(summary.contains("927.99 €"));
        assert!(summary.contains("Income:       2500.00 €"));
        assert!(summary.contains("Top expenses"));
        assert!(summary.contains("Wohnen"));
        assert!(summary.contains("97%"));
        assert!(!summary.contains("Note:"));
    }

    #[test]
    fn test_summary_empty_month() {
        let data = ReportData::derive(month("2025-03"), &options(), &[]);
        let summary = format_summary(&data);
        assert!(summary.contains("No transactions in this month."));
    }

    #[test]
    fn test_summary_notes_unmatched_months() {
        let transactions = vec![spend((2025, 2, 1), 1000, "A", "a")];
        let data = ReportData::derive(month("2025-02"), &options(), &transactions);
        let summary = format_summary(&data);
        assert!(summary.contains("Note: 2025-02 left out"));
    }
}
