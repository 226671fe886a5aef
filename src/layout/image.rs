//! Inline and block image placement.

use crate::backend::DrawBackend;
use crate::error::Error;
use crate::model::ImageSegment;

use super::cursor::Flow;

pub fn render_image(
    seg: &ImageSegment,
    flow: &mut Flow,
    backend: &mut dyn DrawBackend,
) -> Result<(), Error> {
    if seg.is_inline {
        render_inline(seg, flow, backend)
    } else {
        render_block(seg, flow, backend)
    }
}

/// Small image flowing with the text, like an icon or formula. Capped at
/// 1.5× the line's font size so it cannot blow up the line.
fn render_inline(
    seg: &ImageSegment,
    flow: &mut Flow,
    backend: &mut dyn DrawBackend,
) -> Result<(), Error> {
    // The cap tracks the configured body size, not the per-run resolution.
    let size = flow.cfg.font_size;
    let mut w = seg.data.width_pt();
    let mut h = seg.data.height_pt();
    if w <= 0.0 || h <= 0.0 {
        return Err(Error::Image("non-positive image dimensions".into()));
    }

    let cap = size * 1.5;
    if h > cap {
        w *= cap / h;
        h = cap;
    }

    if flow.state.x + w > flow.column_right() {
        let break_h = if flow.state.line_max_h > 0.0 {
            flow.state.line_max_h
        } else {
            flow.default_line_height()
        };
        flow.new_line(break_h);
    }
    let line_h = if flow.state.line_max_h > 0.0 {
        flow.state.line_max_h
    } else {
        flow.default_line_height()
    };
    flow.ensure_space(line_h.max(h), backend);

    // Bottom of the image sits near the baseline.
    let top = flow.state.y - 0.8 * h;
    backend.draw_image(flow.state.x, top, w, h, &seg.data)?;

    flow.state.x += w + 0.2 * size;
    if h > flow.state.line_max_h {
        flow.state.line_max_h = h;
    }
    flow.state.at_line_start = false;
    Ok(())
}

/// Standalone image on its own lines, shrunk to the column width.
fn render_block(
    seg: &ImageSegment,
    flow: &mut Flow,
    backend: &mut dyn DrawBackend,
) -> Result<(), Error> {
    let mut w = seg.data.width_pt();
    let mut h = seg.data.height_pt();
    if w <= 0.0 || h <= 0.0 {
        return Err(Error::Image("non-positive image dimensions".into()));
    }

    if !flow.state.at_line_start {
        let break_h = if flow.state.line_max_h > 0.0 {
            flow.state.line_max_h
        } else {
            flow.default_line_height()
        };
        flow.new_line(break_h + 5.0);
    }

    if w > flow.geom.column_width {
        h *= flow.geom.column_width / w;
        w = flow.geom.column_width;
    }

    flow.ensure_space(h + 10.0, backend);
    backend.draw_image(flow.column_x(), flow.state.y, w, h, &seg.data)?;

    flow.state.y += h + 10.0;
    flow.state.x = flow.column_x();
    flow.state.line_max_h = 0.0;
    flow.state.at_line_start = true;
    Ok(())
}
