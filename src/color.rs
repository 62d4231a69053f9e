use palette::{Hsl, IntoColor, Lighten, Srgb};
use plotters::style::RGBColor;

use crate::plot::PlotError;

// ---------------------------------------------------------------------------
// Hex → plotters colour
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` (or `rrggbb`) into a plotters colour.
pub fn parse_hex(hex: &str) -> Result<RGBColor, PlotError> {
    let rgb: Srgb<u8> = hex
        .parse()
        .map_err(|e| PlotError::InvalidData(format!("bad colour '{hex}': {e}")))?;
    Ok(to_plotters(rgb))
}

/// Lighten a colour in HSL space. `amount` is the fraction of the remaining
/// distance to white (0.0 = unchanged, 1.0 = white).
pub fn lighten(color: RGBColor, amount: f32) -> RGBColor {
    let rgb: Srgb<f32> = Srgb::new(color.0, color.1, color.2).into_format();
    let hsl: Hsl = rgb.into_color();
    let lighter: Srgb = hsl.lighten(amount).into_color();
    to_plotters(lighter.into_format())
}

fn to_plotters(rgb: Srgb<u8>) -> RGBColor {
    RGBColor(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Colours used by both charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct PlotColors {
    /// Bar fill and scatter marker colour.
    pub series: RGBColor,
    /// Bar outline.
    pub edge: RGBColor,
    /// Mesh lines.
    pub grid: RGBColor,
}

impl PlotColors {
    /// Derive the chart colours from the series colour.
    pub fn from_series_hex(series_hex: &str) -> Result<Self, PlotError> {
        let series = parse_hex(series_hex)?;
        Ok(PlotColors {
            series,
            edge: RGBColor(0, 0, 0),
            grid: lighten(series, 0.8),
        })
    }
}
