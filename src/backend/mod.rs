//! Drawing seam between the layout engine and concrete output formats.
//!
//! The layout engine emits primitive commands through [`DrawBackend`] and
//! never touches PDF syntax itself. Coordinates on this trait are top-down
//! page points: x grows right from the left page edge, y grows down from the
//! top, and text y is the baseline. The PDF implementation flips to PDF's
//! bottom-up space.

mod pdf;

pub use pdf::PdfBackend;

use crate::error::Error;
use crate::fonts::FontVariant;
use crate::model::ImageData;

pub trait DrawBackend {
    /// Close out the current page and begin a fresh one.
    fn start_new_page(&mut self);

    /// Select the font used by subsequent `draw_text` calls.
    fn set_font(&mut self, font: FontVariant, size: f32);

    /// Select the color used by subsequent `draw_text` and `fill_rect` calls.
    fn set_fill_color(&mut self, rgb: [u8; 3]);

    /// Draw `text` with its baseline at `(x, y)`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str);

    /// Place an image with its top-left corner at `(x, y)`, scaled to
    /// `w × h` points. Undecodable bytes are an error the caller may skip.
    fn draw_image(&mut self, x: f32, y: f32, w: f32, h: f32, data: &ImageData)
    -> Result<(), Error>;

    /// Fill the axis-aligned rectangle with top-left corner `(x, y)`.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32);
}

/// Capability for turning a pictographic glyph (emoji and friends, which the
/// base-14 fonts cannot draw) into an image. The production caller backs this
/// with an external raster service; when rasterization fails the symbol is
/// skipped but its horizontal space is still consumed.
pub trait SymbolRasterizer {
    /// Render `symbol` into a square bitmap roughly `px` pixels tall.
    /// `None` means the symbol could not be rasterized.
    fn rasterize(&mut self, symbol: &str, px: u32) -> Option<ImageData>;
}

/// Rasterizer that renders nothing. Layout stays identical; pictographic
/// symbols leave a gap.
pub struct NoRaster;

impl SymbolRasterizer for NoRaster {
    fn rasterize(&mut self, _symbol: &str, _px: u32) -> Option<ImageData> {
        None
    }
}
