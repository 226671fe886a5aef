//! Preformatted code blocks: shaded box, monospace, accumulate-and-flush
//! across column and page boundaries.

use crate::backend::DrawBackend;
use crate::fonts::{FontVariant, sanitize};
use crate::model::{CodeBlock, FontFamily};

use super::cursor::Flow;

const BG_GRAY: [u8; 3] = [245, 245, 245];
const TOP_PAD: f32 = 4.0;
const BOTTOM_PAD: f32 = 6.0;
const TEXT_INSET: f32 = 5.0;
const TRAILING: f32 = 15.0;

/// Wrap code without collapsing whitespace. Indentation and interior runs of
/// spaces are significant here, so overlong lines break at character level
/// instead of reflowing words.
fn wrap_code(font: &FontVariant, text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.split('\n') {
        let line = raw.trim_end();
        if font.text_width(line, size) <= max_width {
            out.push(line.to_string());
            continue;
        }
        let mut current = String::new();
        let mut w = 0.0f32;
        for c in line.chars() {
            let cw = font.text_width(c.encode_utf8(&mut [0u8; 4]), size);
            if w + cw > max_width && !current.is_empty() {
                out.push(std::mem::take(&mut current));
                w = 0.0;
            }
            current.push(c);
            w += cw;
        }
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

pub fn render_code(block: &CodeBlock, flow: &mut Flow, backend: &mut dyn DrawBackend) {
    let font = FontVariant::regular(FontFamily::Courier);
    let code_size = (flow.cfg.font_size - 2.0).max(6.0);
    let line_h = code_size * 1.15;
    let wrap_width = flow.geom.column_width - 2.0 * TEXT_INSET;

    let text = sanitize(&block.text.replace('\t', "    "));
    let lines = wrap_code(&font, &text, code_size, wrap_width);

    if !flow.state.at_line_start {
        let break_h = if flow.state.line_max_h > 0.0 {
            flow.state.line_max_h
        } else {
            flow.default_line_height()
        };
        flow.new_line(break_h);
    }

    // At least the first line plus padding must fit, otherwise start the
    // whole box in a fresh column.
    let fits = flow.ensure_space(TOP_PAD + code_size + BOTTOM_PAD, backend);

    let text_color = flow.cfg.text_color.0;
    let column_width = flow.geom.column_width;
    let mut col_x = flow.column_x();
    let mut baseline = if fits {
        flow.state.y
    } else {
        flow.state.y + TOP_PAD
    };

    // Lines buffered for the current page; flushed as one shaded box so the
    // background bounds exactly the lines drawn there.
    let mut buffered: Vec<(f32, &str)> = Vec::new();

    let flush = |buffered: &mut Vec<(f32, &str)>, col_x: f32, backend: &mut dyn DrawBackend| {
        let Some(&(first_y, _)) = buffered.first() else {
            return;
        };
        let n = buffered.len();
        let box_top = first_y - code_size - TOP_PAD;
        let box_h = TOP_PAD + (n - 1) as f32 * line_h + code_size + BOTTOM_PAD;
        backend.set_fill_color(BG_GRAY);
        backend.fill_rect(col_x, box_top, column_width, box_h);
        backend.set_fill_color(text_color);
        backend.set_font(font, code_size);
        for &(y, line) in buffered.iter() {
            backend.draw_text(col_x + TEXT_INSET, y, line);
        }
        buffered.clear();
    };

    for line in &lines {
        if baseline + line_h > flow.geom.content_bottom() {
            flush(&mut buffered, col_x, backend);
            flow.advance_column_or_page(backend);
            col_x = flow.column_x();
            baseline = flow.state.y + TOP_PAD;
        }
        buffered.push((baseline, line));
        baseline += line_h;
    }
    flush(&mut buffered, col_x, backend);

    // Cursor lands below the box bottom with trailing spacing.
    flow.state.y = baseline - line_h + BOTTOM_PAD + TRAILING;
    flow.state.x = col_x;
    flow.state.line_max_h = 0.0;
    flow.state.at_line_start = true;
    flow.state.prev_ended_with_space = true;
}
