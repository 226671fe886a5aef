//! Table rendering: equal-width cells, bordered, rows atomic across pages.

use crate::backend::DrawBackend;
use crate::fonts::{FontVariant, sanitize};
use crate::model::TableSegment;

use super::cursor::Flow;

const CELL_PAD: f32 = 4.0;
const BORDER_W: f32 = 0.5;
const LEADING_GAP: f32 = 5.0;
const TRAILING_GAP: f32 = 10.0;

pub fn render_table(table: &TableSegment, flow: &mut Flow, backend: &mut dyn DrawBackend) {
    // A table with no rows or no declared columns draws nothing at all.
    if table.rows.is_empty() || table.column_count == 0 {
        return;
    }

    let font = FontVariant::regular(flow.cfg.font_family);
    let size = flow.cfg.font_size;
    let line_h = size * flow.cfg.line_height;
    let cols = table.column_count;
    let cell_w = flow.geom.column_width / cols as f32;
    let wrap_w = cell_w - 2.0 * CELL_PAD;

    if !flow.state.at_line_start {
        let break_h = if flow.state.line_max_h > 0.0 {
            flow.state.line_max_h
        } else {
            flow.default_line_height()
        };
        flow.new_line(break_h);
    }
    flow.state.y += LEADING_GAP;

    backend.set_font(font, size);

    for row in &table.rows {
        // Cells past the declared column count are dropped, short rows keep
        // their borders only for the cells they have.
        let wrapped: Vec<Vec<String>> = row
            .iter()
            .take(cols)
            .map(|cell| font.wrap(&sanitize(cell), size, wrap_w))
            .collect();

        let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let row_h = (max_lines as f32 * line_h + 2.0 * CELL_PAD).max(size + 2.0 * CELL_PAD);

        // Rows never split: if this one does not fit, it moves whole to the
        // next column or page.
        flow.ensure_space(row_h, backend);

        let row_top = flow.state.y - size;
        let col_x = flow.column_x();

        for (ci, cell_lines) in wrapped.iter().enumerate() {
            let x = col_x + ci as f32 * cell_w;
            draw_cell_border(backend, x, row_top, cell_w, row_h);
            let mut y = row_top + CELL_PAD + size;
            for line in cell_lines {
                backend.draw_text(x + CELL_PAD, y, line);
                y += line_h;
            }
        }

        flow.state.y += row_h;
    }

    flow.state.y += TRAILING_GAP;
    flow.state.x = flow.column_x();
    flow.state.line_max_h = 0.0;
    flow.state.at_line_start = true;
    flow.state.prev_ended_with_space = true;
}

fn draw_cell_border(backend: &mut dyn DrawBackend, x: f32, y: f32, w: f32, h: f32) {
    backend.stroke_line(x, y, x + w, y, BORDER_W);
    backend.stroke_line(x, y + h, x + w, y + h, BORDER_W);
    backend.stroke_line(x, y, x, y + h, BORDER_W);
    backend.stroke_line(x + w, y, x + w, y + h, BORDER_W);
}
