//! Data preparation for the charts
//!
//! Converts derived tables into the plain numeric series the plotting code
//! draws. Kept apart from the drawing so it can be checked without a backend.

use std::collections::HashMap;

use crate::models::{CategorySpending, DailyBalance, SubCategorySpending, YearMonth};

/// Cumulative spending of one month by day of month
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSeries {
    pub month: YearMonth,
    pub highlighted: bool,
    pub points: Vec<(u32, f64)>,
}

/// One bar of a bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    /// Value drawn, already clipped to the axis
    pub value: f64,
    /// Index into the category palette
    pub color_index: usize,
}

/// Series of the balance chart, reference months first and oldest first
///
/// Months without rows are skipped. The reporting month comes last so it is
/// drawn on top.
pub fn balance_series(
    rows: &[DailyBalance],
    month: YearMonth,
    reference_months: &[YearMonth],
) -> Vec<BalanceSeries> {
    let mut references: Vec<YearMonth> = reference_months
        .iter()
        .copied()
        .filter(|m| *m != month)
        .collect();
    references.sort();

    references
        .into_iter()
        .map(|m| (m, false))
        .chain(std::iter::once((month, true)))
        .filter_map(|(m, highlighted)| {
            let points: Vec<(u32, f64)> = rows
                .iter()
                .filter(|row| row.month == m)
                .map(|row| (row.day(), row.cumulative.as_units()))
                .collect();
            (!points.is_empty()).then_some(BalanceSeries {
                month: m,
                highlighted,
                points,
            })
        })
        .collect()
}

/// Category bars sorted by total, largest first
pub fn category_bars(rows: &[CategorySpending], axis_max: Option<f64>) -> Vec<Bar> {
    sorted_categories(rows)
        .into_iter()
        .enumerate()
        .map(|(i, row)| Bar {
            label: row.category.clone(),
            value: clip(row.total.as_units(), axis_max),
            color_index: i,
        })
        .collect()
}

/// Sub-category bars grouped by category, largest category first
///
/// Also returns the number of distinct categories, which sizes the palette.
pub fn sub_category_bars(rows: &[SubCategorySpending], axis_max: Option<f64>) -> (Vec<Bar>, usize) {
    let mut category_totals: HashMap<&str, i64> = HashMap::new();
    for row in rows {
        *category_totals.entry(row.category.as_str()).or_default() += row.total.cents();
    }

    let mut categories: Vec<(&str, i64)> = category_totals.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let order: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (*name, i))
        .collect();

    let mut sorted: Vec<&SubCategorySpending> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        order[a.category.as_str()]
            .cmp(&order[b.category.as_str()])
            .then_with(|| b.total.cmp(&a.total))
            .then_with(|| a.sub_category.cmp(&b.sub_category))
    });

    let bars = sorted
        .into_iter()
        .map(|row| Bar {
            label: row.sub_category.clone(),
            value: clip(row.total.as_units(), axis_max),
            color_index: order[row.category.as_str()],
        })
        .collect();

    (bars, categories.len())
}

/// Upper end of the value axis
///
/// A fixed limit wins; otherwise the largest value plus some headroom.
pub fn axis_upper(values: impl IntoIterator<Item = f64>, axis_max: Option<f64>) -> f64 {
    match axis_max {
        Some(limit) => limit,
        None => {
            let max = values.into_iter().fold(0.0_f64, f64::max);
            if max > 0.0 {
                max * 1.1
            } else {
                1.0
            }
        }
    }
}

/// Draw values beyond the axis at the limit
pub fn clip(value: f64, axis_max: Option<f64>) -> f64 {
    match axis_max {
        Some(limit) => value.min(limit),
        None => value,
    }
}

fn sorted_categories(rows: &[CategorySpending]) -> Vec<&CategorySpending> {
    let mut sorted: Vec<&CategorySpending> = rows.iter().collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{month, spend};
    use crate::analysis::{category_spending, monthly_running_balance, sub_category_spending};

    #[test]
    fn test_balance_series_order() {
        let rows = monthly_running_balance(&[
            spend((2025, 2, 1), 1000, "A", "a"),
            spend((2025, 2, 2), 500, "A", "a"),
            spend((2025, 1, 3), 700, "A", "a"),
            spend((2024, 12, 3), 100, "A", "a"),
        ]);

        let series = balance_series(
            &rows,
            month("2025-02"),
            &[month("2025-01"), month("2024-12"), month("2024-11")],
        );

        let months: Vec<String> = series.iter().map(|s| s.month.to_string()).collect();
        assert_eq!(months, vec!["2024-12", "2025-01", "2025-02"]);
        assert!(series[2].highlighted);
        assert!(!series[0].highlighted);
        assert_eq!(series[2].points, vec![(1, 10.0), (2, 15.0)]);
    }

    #[test]
    fn test_balance_series_without_current_month() {
        let rows = monthly_running_balance(&[spend((2025, 1, 3), 700, "A", "a")]);
        let series = balance_series(&rows, month("2025-02"), &[month("2025-01")]);
        assert_eq!(series.len(), 1);
        assert!(!series[0].highlighted);
    }

    #[test]
    fn test_category_bars_sorted_and_clipped() {
        let rows = category_spending(&[
            spend((2025, 2, 1), 20_000, "Lebensmittel", "Supermarkt"),
            spend((2025, 2, 2), 95_000, "Wohnen", "Miete"),
            spend((2025, 2, 3), 5_000, "Freizeit", "Kino"),
        ]);

        let bars = category_bars(&rows, Some(750.0));
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Wohnen", "Lebensmittel", "Freizeit"]);
        assert_eq!(bars[0].value, 750.0);
        assert_eq!(bars[1].value, 200.0);
        assert_eq!(bars[2].color_index, 2);
    }

    #[test]
    fn test_sub_category_bars_colored_by_category() {
        let rows = sub_category_spending(&[
            spend((2025, 2, 1), 2_000, "Lebensmittel", "Supermarkt"),
            spend((2025, 2, 2), 500, "Lebensmittel", "Bäckerei"),
            spend((2025, 2, 3), 90_000, "Wohnen", "Miete"),
        ]);

        let (bars, colors) = sub_category_bars(&rows, None);
        assert_eq!(colors, 2);
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Miete", "Supermarkt", "Bäckerei"]);
        assert_eq!(bars[0].color_index, 0);
        assert_eq!(bars[1].color_index, 1);
        assert_eq!(bars[2].color_index, 1);
    }

    #[test]
    fn test_axis_upper() {
        assert_eq!(axis_upper([1.0, 5.0], Some(750.0)), 750.0);
        assert!((axis_upper([10.0, 50.0], None) - 55.0).abs() < 1e-9);
        assert_eq!(axis_upper(std::iter::empty(), None), 1.0);
    }
}
