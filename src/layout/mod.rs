//! The layout engine: drives segments through the flow cursor and the
//! per-kind renderers, batching work and reporting progress.

mod code;
pub mod cursor;
pub mod geometry;
mod image;
mod table;
mod text;

pub use cursor::{Flow, LayoutState};
pub use geometry::PageGeometry;

use crate::backend::{DrawBackend, SymbolRasterizer};
use crate::model::{FontMode, RenderConfig, Segment};

/// Segments processed between progress reports. In the original interactive
/// setting this was also the cooperative yield point.
pub(crate) const CHUNK_SIZE: usize = 50;

/// Font size for a run after applying the configured font mode, clamped to
/// a sane range so extractor garbage cannot produce unreadable output.
pub(crate) fn effective_font_size(cfg: &RenderConfig, run_size: Option<f32>) -> f32 {
    let size = match cfg.font_mode {
        FontMode::Fixed => cfg.font_size,
        FontMode::Original => run_size.unwrap_or(12.0),
        FontMode::Relative => run_size.unwrap_or(12.0) + cfg.font_scale,
    };
    size.clamp(6.0, 72.0)
}

/// Lay out all segments onto the backend. Config must already be normalized
/// and `geom` resolved from it. A failing segment is logged and skipped;
/// the flow continues from wherever the cursor stands.
pub fn run_layout(
    segments: &[Segment],
    cfg: &RenderConfig,
    geom: &PageGeometry,
    backend: &mut dyn DrawBackend,
    raster: &mut dyn SymbolRasterizer,
    mut progress: Option<&mut dyn FnMut(u8)>,
) {
    let mut flow = Flow::new(geom, cfg);
    flow.paint_background(backend);
    backend.set_fill_color(cfg.text_color.0);

    let total = segments.len();
    for (chunk_idx, chunk) in segments.chunks(CHUNK_SIZE).enumerate() {
        for (i, seg) in chunk.iter().enumerate() {
            let result = match seg {
                Segment::Text(run) => {
                    text::render_text(run, &mut flow, backend, raster);
                    Ok(())
                }
                Segment::Image(img) => image::render_image(img, &mut flow, backend),
                Segment::Code(block) => {
                    code::render_code(block, &mut flow, backend);
                    Ok(())
                }
                Segment::Table(t) => {
                    table::render_table(t, &mut flow, backend);
                    Ok(())
                }
            };
            if let Err(e) = result {
                log::warn!("skipping segment {}: {e}", chunk_idx * CHUNK_SIZE + i);
            }
        }
        if let Some(cb) = progress.as_deref_mut() {
            let done = chunk_idx * CHUNK_SIZE + chunk.len();
            let pct = if total == 0 {
                100
            } else {
                (done * 100 / total) as u8
            };
            cb(pct);
        }
    }

    if cfg.show_page_numbers {
        flow.stamp_page_number(backend);
    }
}
