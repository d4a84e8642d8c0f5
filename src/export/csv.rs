//! CSV Export functionality
//!
//! Writes each derived table to its own CSV file. Amounts are written in
//! currency units with two decimals so the files open cleanly in a
//! spreadsheet.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::error::{ReportError, ReportResult};
use crate::models::{Money, TopSpending};
use crate::report::ReportData;

/// Tables written by the CSV export, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Balance,
    IncomeExpense,
    TopSpending,
    TopPerCategory,
    Categories,
    SubCategories,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Balance,
        Table::IncomeExpense,
        Table::TopSpending,
        Table::TopPerCategory,
        Table::Categories,
        Table::SubCategories,
    ];

    /// File name inside the export directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Table::Balance => "balance.csv",
            Table::IncomeExpense => "income_expense.csv",
            Table::TopSpending => "top_spending.csv",
            Table::TopPerCategory => "top_per_category.csv",
            Table::Categories => "categories.csv",
            Table::SubCategories => "sub_categories.csv",
        }
    }
}

/// Export one table as CSV
pub fn export_table_csv<W: Write>(data: &ReportData, table: Table, writer: W) -> ReportResult<()> {
    let mut csv = Writer::from_writer(writer);

    match table {
        Table::Balance => {
            write(&mut csv, &["Month", "Date", "Spent", "Cumulative"])?;
            for row in &data.balance {
                write(
                    &mut csv,
                    &[
                        row.month.to_string(),
                        row.date.to_string(),
                        units(row.spent),
                        units(row.cumulative),
                    ],
                )?;
            }
        }
        Table::IncomeExpense => {
            write(&mut csv, &["Month", "Income", "Expense", "Net"])?;
            for row in &data.income_expense {
                write(
                    &mut csv,
                    &[
                        row.month.to_string(),
                        units(row.income),
                        units(row.expense),
                        units(row.net()),
                    ],
                )?;
            }
        }
        Table::TopSpending => write_ranked(&mut csv, &data.top_spending)?,
        Table::TopPerCategory => write_ranked(&mut csv, &data.top_per_category)?,
        Table::Categories => {
            write(&mut csv, &["Month", "Category", "Total", "Mean", "Count"])?;
            for row in &data.categories {
                write(
                    &mut csv,
                    &[
                        row.month.to_string(),
                        row.category.clone(),
                        units(row.total),
                        units(row.mean),
                        row.count.to_string(),
                    ],
                )?;
            }
        }
        Table::SubCategories => {
            write(
                &mut csv,
                &["Month", "Category", "Sub-category", "Total", "Mean", "Count"],
            )?;
            for row in &data.sub_categories {
                write(
                    &mut csv,
                    &[
                        row.month.to_string(),
                        row.category.clone(),
                        row.sub_category.clone(),
                        units(row.total),
                        units(row.mean),
                        row.count.to_string(),
                    ],
                )?;
            }
        }
    }

    csv.flush().map_err(|e| ReportError::Export(e.to_string()))?;
    Ok(())
}

/// Export every table into `dir`, one file per table
pub fn export_report_csv(data: &ReportData, dir: &Path) -> ReportResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| {
        ReportError::Export(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;

    Table::ALL
        .iter()
        .map(|table| {
            let path = dir.join(table.file_name());
            let file = File::create(&path).map_err(|e| {
                ReportError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            export_table_csv(data, *table, file)?;
            Ok(path)
        })
        .collect()
}

fn write_ranked<W: Write>(csv: &mut Writer<W>, rows: &[TopSpending]) -> ReportResult<()> {
    write(
        csv,
        &[
            "Month",
            "Rank",
            "Date",
            "Counterparty",
            "Category",
            "Sub-category",
            "Amount",
        ],
    )?;
    for row in rows {
        write(
            csv,
            &[
                row.month.to_string(),
                row.rank.to_string(),
                row.booking_date.to_string(),
                row.counterparty.clone(),
                row.category.clone(),
                row.sub_category.clone(),
                units(row.amount),
            ],
        )?;
    }
    Ok(())
}

fn write<W: Write, S: AsRef<[u8]>>(csv: &mut Writer<W>, record: &[S]) -> ReportResult<()> {
    csv.write_record(record)
        .map_err(|e| ReportError::Export(e.to_string()))
}

fn units(amount: Money) -> String {
    amount.to_string()
}
