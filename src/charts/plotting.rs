//! Chart rasterisation with plotters
//!
//! Every chart is drawn onto an in-memory RGB buffer through the bitmap
//! backend. Drawing errors (a missing font, for instance) are logged and
//! replaced by a blank image so a report is still produced.

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, warn};

use super::palette::{self, CURRENT_MONTH, EXPENSE, INCOME, REFERENCE_MONTH};
use super::series::{axis_upper, balance_series, category_bars, sub_category_bars, Bar, BalanceSeries};
use super::{Chart, ChartImage, ChartRenderer};
use crate::display::truncate;
use crate::models::IncomeExpense;

/// Default image size, the 16 x 12 cm chart slot at 150 dpi
pub const DEFAULT_SIZE: (u32, u32) = (945, 709);

const FONT: &str = "sans-serif";
// rough width of one label character at the label font size
const LABEL_CHAR_PX: u32 = 8;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;
type Plot<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Renders charts with the plotters bitmap backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlottersRenderer {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_SIZE.0, DEFAULT_SIZE.1)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, chart: &Chart<'_>) -> ChartImage {
        let mut pixels = vec![255; self.width as usize * self.height as usize * 3];

        let result = {
            let root = BitMapBackend::with_buffer(&mut pixels, (self.width, self.height))
                .into_drawing_area();
            draw(&root, chart).and_then(|()| root.present())
        };

        match result {
            Ok(()) => {
                debug!(chart = chart.kind(), "Rendered chart");
                ChartImage {
                    width: self.width,
                    height: self.height,
                    pixels,
                }
            }
            Err(err) => {
                warn!(
                    chart = chart.kind(),
                    error = %err,
                    "Chart could not be drawn, leaving a blank image"
                );
                ChartImage::blank(self.width, self.height)
            }
        }
    }
}

fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &Chart<'_>) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let title = chart.title();

    match *chart {
        Chart::Balance {
            month,
            reference_months,
            rows,
        } => draw_balance(root, &title, &balance_series(rows, month, reference_months)),
        Chart::IncomeExpense { rows } => draw_income_expense(root, &title, rows),
        Chart::Category { rows, axis_max } => {
            let bars = category_bars(rows, axis_max);
            let colors = palette::viridis(bars.len());
            draw_bars(root, &title, &bars, &colors, axis_max)
        }
        Chart::SubCategory { rows, axis_max } => {
            let (bars, categories) = sub_category_bars(rows, axis_max);
            draw_bars(root, &title, &bars, &palette::viridis(categories), axis_max)
        }
    }
}

fn draw_balance<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    series: &[BalanceSeries],
) -> DrawResult<DB> {
    let y_max = axis_upper(
        series.iter().flat_map(|s| s.points.iter().map(|&(_, v)| v)),
        None,
    );

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 32).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(1.0..31.0, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Day of month")
        .y_desc("Spent")
        .x_labels(16)
        .y_labels(8)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .label_style((FONT, 16).into_font())
        .draw()?;

    for s in series {
        let points: Vec<(f64, f64)> = s.points.iter().map(|&(day, v)| (day as f64, v)).collect();
        if s.highlighted {
            chart
                .draw_series(LineSeries::new(points.clone(), CURRENT_MONTH.stroke_width(3)))?
                .label(s.month.to_string())
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], CURRENT_MONTH.stroke_width(3))
                });
            chart.draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, 4, CURRENT_MONTH.filled())),
            )?;
        } else {
            chart
                .draw_series(LineSeries::new(points, REFERENCE_MONTH.stroke_width(1)))?
                .label(s.month.to_string())
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], REFERENCE_MONTH.stroke_width(1))
                });
        }
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, 16).into_font())
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

fn draw_income_expense<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    rows: &[IncomeExpense],
) -> DrawResult<DB> {
    let slots = rows.len().max(1) as f64;
    let y_max = axis_upper(
        rows.iter()
            .flat_map(|r| [r.income.as_units(), r.expense.as_units()]),
        None,
    );

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 32).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..slots, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Amount")
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|y| format!("{:.0}", y))
        .label_style((FONT, 16).into_font())
        .draw()?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            let x = i as f64;
            Rectangle::new([(x + 0.1, 0.0), (x + 0.5, row.income.as_units())], INCOME.filled())
        }))?
        .label("Income")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], INCOME.filled()));

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            let x = i as f64;
            Rectangle::new([(x + 0.5, 0.0), (x + 0.9, row.expense.as_units())], EXPENSE.filled())
        }))?
        .label("Expenses")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], EXPENSE.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, 16).into_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    let labels: Vec<(f64, String)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (i as f64 + 0.5, row.month.to_string()))
        .collect();
    draw_x_labels(root, &chart, &labels)
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    bars: &[Bar],
    colors: &[RGBColor],
    axis_max: Option<f64>,
) -> DrawResult<DB> {
    let slots = bars.len().max(1) as f64;
    let y_max = axis_upper(bars.iter().map(|b| b.value), axis_max);

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 32).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..slots, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Spent")
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|y| format!("{:.0}", y))
        .label_style((FONT, 16).into_font())
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        let color = colors.get(bar.color_index).copied().unwrap_or(CURRENT_MONTH);
        Rectangle::new([(x + 0.1, 0.0), (x + 0.9, bar.value)], color.filled())
    }))?;

    let labels: Vec<(f64, String)> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| (i as f64 + 0.5, bar.label.clone()))
        .collect();
    draw_x_labels(root, &chart, &labels)
}

/// Centre a label under each slot, shortened to the slot width
fn draw_x_labels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Plot<'_, DB>,
    labels: &[(f64, String)],
) -> DrawResult<DB> {
    if labels.is_empty() {
        return Ok(());
    }

    let (plot_width, _) = chart.plotting_area().dim_in_pixel();
    let slot_px = plot_width / labels.len() as u32;
    let max_chars = (slot_px / LABEL_CHAR_PX).max(3) as usize;

    let style = TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for (x, label) in labels {
        let (px, py) = chart.backend_coord(&(*x, 0.0));
        root.draw(&Text::new(truncate(label, max_chars), (px, py + 8), style.clone()))?;
    }
    Ok(())
}
