//! Colours used by the charts

use plotters::style::colors::colormaps::ViridisRGB;
use plotters::style::RGBColor;

/// Highlighted reporting month
pub const CURRENT_MONTH: RGBColor = RGBColor(31, 119, 180);
/// Reference months in the balance chart
pub const REFERENCE_MONTH: RGBColor = RGBColor(170, 170, 170);
pub const INCOME: RGBColor = RGBColor(44, 160, 44);
pub const EXPENSE: RGBColor = RGBColor(214, 39, 40);

/// `count` colours evenly spaced along the viridis colour map
pub fn viridis(count: usize) -> Vec<RGBColor> {
    match count {
        0 => Vec::new(),
        1 => vec![ViridisRGB::get_color(0.0)],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| ViridisRGB::get_color_normalized(i as f64, 0.0, last))
                .collect()
        }
    }
}
