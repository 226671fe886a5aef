//! Flow layout and pagination engine.
//!
//! Takes a linear sequence of extracted content segments (styled text runs,
//! images, code blocks, tables) and flows them into paginated, multi-column
//! pages, emitting primitive drawing commands. The crate ships a PDF backend
//! built on `pdf-writer`; any other output can implement [`DrawBackend`].
//!
//! ```no_run
//! use pageflow::model::{RenderConfig, Segment, TextRun};
//!
//! let segments = vec![Segment::Text(TextRun {
//!     text: "Hello world".into(),
//!     ..Default::default()
//! })];
//! let pdf = pageflow::render_to_pdf(&segments, &RenderConfig::default()).unwrap();
//! std::fs::write("hello.pdf", pdf).unwrap();
//! ```

mod backend;
mod error;
mod fonts;
mod layout;
pub mod model;

pub use backend::{DrawBackend, NoRaster, PdfBackend, SymbolRasterizer};
pub use error::Error;
pub use fonts::FontVariant;
pub use layout::{Flow, LayoutState, PageGeometry};

use std::path::Path;
use std::time::Instant;

use model::{JobInput, RenderConfig, Segment};

/// Render segments to PDF bytes with default collaborators: no symbol
/// rasterizer, no progress reporting.
pub fn render_to_pdf(segments: &[Segment], config: &RenderConfig) -> Result<Vec<u8>, Error> {
    render_to_pdf_with(segments, config, &mut NoRaster, None)
}

/// Render segments to PDF bytes. `raster` supplies bitmaps for pictographic
/// glyphs; `progress` is invoked with 0–100 as batches complete.
pub fn render_to_pdf_with(
    segments: &[Segment],
    config: &RenderConfig,
    raster: &mut dyn SymbolRasterizer,
    progress: Option<&mut dyn FnMut(u8)>,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let cfg = config.normalized();
    let geom = PageGeometry::resolve(&cfg);
    let mut backend = PdfBackend::new(geom.page_width, geom.page_height);
    layout::run_layout(segments, &cfg, &geom, &mut backend, raster, progress);
    let bytes = backend.finish();

    log::info!(
        "Rendered {} segments into {} bytes in {:.1}ms",
        segments.len(),
        bytes.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(bytes)
}

/// Drive the layout engine against an arbitrary backend. This is the seam
/// alternate outputs and tests plug into; coordinates handed to the backend
/// are top-down page points.
pub fn render_into(
    segments: &[Segment],
    config: &RenderConfig,
    backend: &mut dyn DrawBackend,
    raster: &mut dyn SymbolRasterizer,
    progress: Option<&mut dyn FnMut(u8)>,
) {
    let cfg = config.normalized();
    let geom = PageGeometry::resolve(&cfg);
    layout::run_layout(segments, &cfg, &geom, backend, raster, progress);
}

/// File-level convenience: read a JSON job (config + segments), write a PDF.
pub fn convert_segments_to_pdf(input: &Path, output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let raw = std::fs::read(input)?;
    let job: JobInput = serde_json::from_slice(&raw)?;
    let t_parse = t0.elapsed();

    let bytes = render_to_pdf(&job.segments, &job.config)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes)?;

    log::info!(
        "Converted {} -> {}: parse={:.1}ms, render={:.1}ms, write={:.1}ms",
        input.display(),
        output.display(),
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t0.elapsed() - t_render).as_secs_f64() * 1000.0,
    );
    Ok(())
}
