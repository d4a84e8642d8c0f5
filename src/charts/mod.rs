//! Chart rendering
//!
//! Charts are rendered into in-memory RGB images. The PDF assembler only sees
//! the `ChartRenderer` trait, so layout can be exercised without rasterising
//! anything.

pub mod palette;
pub mod plotting;
pub mod series;

pub use plotting::PlottersRenderer;

use crate::models::{CategorySpending, DailyBalance, IncomeExpense, SubCategorySpending, YearMonth};

/// An RGB8 raster image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triplets
    pub pixels: Vec<u8>,
}

impl ChartImage {
    /// A white image of the given size
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * 3],
        }
    }

    /// Check if every pixel is white
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&b| b == 255)
    }
}

/// A chart to render, borrowing the table it shows
#[derive(Debug, Clone, Copy)]
pub enum Chart<'a> {
    /// Cumulative spending per day of month
    Balance {
        month: YearMonth,
        reference_months: &'a [YearMonth],
        rows: &'a [DailyBalance],
    },
    /// Income and expense bars per month
    IncomeExpense { rows: &'a [IncomeExpense] },
    /// Spending per main category
    Category {
        rows: &'a [CategorySpending],
        axis_max: Option<f64>,
    },
    /// Spending per sub-category, coloured by main category
    SubCategory {
        rows: &'a [SubCategorySpending],
        axis_max: Option<f64>,
    },
}

impl Chart<'_> {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Chart::Balance { .. } => "balance",
            Chart::IncomeExpense { .. } => "income_expense",
            Chart::Category { .. } => "category",
            Chart::SubCategory { .. } => "sub_category",
        }
    }

    /// Caption drawn above the chart
    pub fn title(&self) -> String {
        match self {
            Chart::Balance { month, .. } => format!("Cumulative spending {}", month),
            Chart::IncomeExpense { .. } => "Income and expenses".to_string(),
            Chart::Category { .. } => "Spending by category".to_string(),
            Chart::SubCategory { .. } => "Spending by sub-category".to_string(),
        }
    }
}

/// Turns a chart description into an image
///
/// Implementations never fail: a chart that cannot be drawn comes back as a
/// blank image.
pub trait ChartRenderer {
    fn render(&self, chart: &Chart<'_>) -> ChartImage;
}
