//! In-memory drawing surface and PNG output.
//!
//! Charts are drawn into an RGB buffer instead of straight to a file so the
//! PNG can carry a `pHYs` chunk with the figure DPI, which plotters' own
//! bitmap encoder does not write.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{Figure, PlotError, Result};

const METRES_PER_INCH: f64 = 0.0254;

/// Pixels per metre for a resolution given in dots per inch.
pub fn pixels_per_metre(dpi: u32) -> u32 {
    (dpi as f64 / METRES_PER_INCH).round() as u32
}

/// An 8-bit RGB raster sized for one [`Figure`].
pub struct Canvas {
    figure: Figure,
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Canvas {
    /// A white canvas for `figure`.
    pub fn new(figure: Figure) -> Self {
        let (width, height) = figure.pixel_size();
        Canvas {
            figure,
            width,
            height,
            buffer: vec![255; width as usize * height as usize * 3],
        }
    }

    #[cfg(test)]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGB bytes, row-major.
    #[cfg(test)]
    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    /// Run `paint` on a fresh drawing area backed by this canvas.
    ///
    /// The drawing area is presented and dropped before this returns, so the
    /// buffer holds the finished chart.
    pub fn draw<F>(&mut self, paint: F) -> Result<()>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
    {
        let size = (self.width, self.height);
        let root = BitMapBackend::with_buffer(&mut self.buffer, size).into_drawing_area();

        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        paint(&root)?;

        root.present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// Encode the canvas as PNG with the figure DPI recorded.
    pub fn write_png<W: Write>(&self, out: W) -> Result<()> {
        let mut encoder = png::Encoder::new(out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let ppm = pixels_per_metre(self.figure.dpi);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.buffer)?;
        writer.finish()?;
        Ok(())
    }

    /// Write the canvas to `path`, replacing any existing file.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_png(&mut out)?;
        out.flush()?;
        log::debug!(
            "Wrote {}x{} PNG at {} DPI to {}",
            self.width,
            self.height,
            self.figure.dpi,
            path.display()
        );
        Ok(())
    }
}
