//! Flowing text: tokenization, wrapping, styled runs, pictographic symbols.

use crate::backend::{DrawBackend, SymbolRasterizer};
use crate::fonts::{FontVariant, sanitize};
use crate::model::TextRun;

use super::cursor::Flow;
use super::effective_font_size;

/// Codepoint ranges drawn via the raster path. The base-14 fonts have no
/// glyphs here; covers emoji, dingbats, arrows and private-use icons.
const PICTOGRAPHIC_RANGES: [(u32, u32); 5] = [
    (0x2011, 0x26FF),
    (0x2700, 0x27BF),
    (0xE000, 0xF8FF),
    (0x1F000, 0x1F7FF),
    (0x1F910, 0x1F9FF),
];

pub(crate) fn is_pictographic(c: char) -> bool {
    let cp = c as u32;
    PICTOGRAPHIC_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

enum Token<'a> {
    Literal(&'a str),
    /// A single pictographic character; each one is its own token.
    Symbol(&'a str),
}

fn split_word(word: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in word.char_indices() {
        if is_pictographic(c) {
            if i > start {
                out.push(Token::Literal(&word[start..i]));
            }
            let end = i + c.len_utf8();
            out.push(Token::Symbol(&word[i..end]));
            start = end;
        }
    }
    if start < word.len() {
        out.push(Token::Literal(&word[start..]));
    }
    out
}

pub fn render_text(
    run: &TextRun,
    flow: &mut Flow,
    backend: &mut dyn DrawBackend,
    raster: &mut dyn SymbolRasterizer,
) {
    if run.line_break {
        let h = if flow.state.line_max_h > 0.0 {
            flow.state.line_max_h
        } else {
            flow.default_line_height()
        };
        flow.new_line(h);
        flow.state.prev_ended_with_space = true;
        return;
    }

    let base_size = effective_font_size(flow.cfg, run.font_size);
    let size = if run.sub || run.sup {
        base_size * 0.65
    } else {
        base_size
    };
    let y_off = if run.sub {
        base_size * 0.4
    } else if run.sup {
        -base_size * 0.4
    } else {
        0.0
    };
    let seg_line_h = base_size * flow.cfg.line_height;

    // Sub/superscripts ride on the line without growing it.
    if !(run.sub || run.sup) {
        if seg_line_h > flow.state.line_max_h {
            flow.state.line_max_h = seg_line_h;
        }
    } else if flow.state.line_max_h == 0.0 {
        flow.state.line_max_h = seg_line_h;
    }

    let font = FontVariant {
        family: flow.cfg.font_family,
        bold: run.bold,
        italic: run.italic,
    };
    backend.set_font(font, size);

    let words: Vec<&str> = run.text.split_whitespace().collect();
    if words.is_empty() {
        if run.ends_with_space || run.text.chars().any(char::is_whitespace) {
            flow.state.prev_ended_with_space = true;
        }
        return;
    }

    for (wi, word) in words.iter().enumerate() {
        for (ti, tok) in split_word(word).into_iter().enumerate() {
            // A space is owed before the first sub-token of every word after
            // the first, and before the first word when either side of the
            // run boundary carried one. Never at the start of a line.
            let leading_space = !flow.state.at_line_start
                && ti == 0
                && (wi > 0 || run.starts_with_space || flow.state.prev_ended_with_space);
            match tok {
                Token::Literal(s) => {
                    // Only the WinAnsi-representable part is measured and
                    // drawn; a token with nothing representable is dropped
                    // whole instead of stacking zero-width draws.
                    let clean = sanitize(s);
                    if clean.is_empty() {
                        continue;
                    }
                    draw_word(flow, backend, font, size, y_off, seg_line_h, &clean, leading_space, run.underline);
                }
                Token::Symbol(s) => {
                    draw_symbol(flow, backend, raster, font, size, y_off, seg_line_h, s, leading_space);
                }
            }
        }
    }

    flow.state.prev_ended_with_space = run.ends_with_space;
}

/// Break height for a mid-segment wrap: whatever the line has claimed so
/// far, or this segment's own line height on an empty line.
fn wrap_height(flow: &Flow, seg_line_h: f32) -> f32 {
    if flow.state.line_max_h > 0.0 {
        flow.state.line_max_h
    } else {
        seg_line_h
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_word(
    flow: &mut Flow,
    backend: &mut dyn DrawBackend,
    font: FontVariant,
    size: f32,
    y_off: f32,
    seg_line_h: f32,
    word: &str,
    leading_space: bool,
    underline: bool,
) {
    let mut piece: String = if leading_space {
        format!(" {word}")
    } else {
        word.to_string()
    };
    let mut w = font.text_width(&piece, size);

    if flow.state.x + w > flow.column_right() {
        let h = wrap_height(flow, seg_line_h);
        flow.new_line(h);
        flow.state.line_max_h = seg_line_h;
        piece = word.to_string();
        w = font.text_width(&piece, size);
    }
    // Reserve the full line height so descenders stay above the margin.
    if !flow.ensure_space(wrap_height(flow, seg_line_h), backend) {
        flow.state.line_max_h = seg_line_h;
        piece = word.to_string();
        w = font.text_width(&piece, size);
    }

    // A word wider than the whole column is split at character level so the
    // column edge is never crossed.
    while w > flow.geom.column_width {
        let avail = flow.column_right() - flow.state.x;
        let mut split = 0;
        let mut split_w = 0.0;
        for (i, c) in piece.char_indices() {
            let cw = font.text_width(&piece[i..i + c.len_utf8()], size);
            if split > 0 && split_w + cw > avail {
                break;
            }
            split = i + c.len_utf8();
            split_w += cw;
        }
        let (head, tail) = piece.split_at(split);
        backend.draw_text(flow.state.x, flow.state.y + y_off, head);
        if underline {
            let y = flow.state.y + y_off + 1.0;
            backend.stroke_line(flow.state.x, y, flow.state.x + split_w, y, size / 20.0);
        }
        flow.new_line(seg_line_h);
        flow.state.line_max_h = seg_line_h;
        flow.ensure_space(seg_line_h, backend);
        piece = tail.to_string();
        w = font.text_width(&piece, size);
    }

    let x = flow.state.x;
    let y = flow.state.y + y_off;
    backend.draw_text(x, y, &piece);
    if underline {
        backend.stroke_line(x, y + 1.0, x + w, y + 1.0, size / 20.0);
    }
    flow.state.x += w;
    flow.state.at_line_start = false;
}

#[allow(clippy::too_many_arguments)]
fn draw_symbol(
    flow: &mut Flow,
    backend: &mut dyn DrawBackend,
    raster: &mut dyn SymbolRasterizer,
    font: FontVariant,
    size: f32,
    y_off: f32,
    seg_line_h: f32,
    symbol: &str,
    leading_space: bool,
) {
    // A symbol occupies one em regardless of whether rasterization succeeds,
    // so layout does not depend on the raster service.
    let w = size;
    let mut lead = if leading_space {
        font.space_width(size)
    } else {
        0.0
    };

    if flow.state.x + lead + w > flow.column_right() {
        let h = wrap_height(flow, seg_line_h);
        flow.new_line(h);
        flow.state.line_max_h = seg_line_h;
        lead = 0.0;
    }
    if !flow.ensure_space(wrap_height(flow, seg_line_h), backend) {
        flow.state.line_max_h = seg_line_h;
        lead = 0.0;
    }

    let x = flow.state.x + lead;
    match raster.rasterize(symbol, (size * 2.0) as u32) {
        Some(img) => {
            let top = flow.state.y + y_off - size * 0.8;
            if let Err(e) = backend.draw_image(x, top, size, size, &img) {
                log::warn!("skipping symbol {symbol:?}: {e}");
            }
        }
        None => log::debug!("no raster for symbol {symbol:?}"),
    }
    flow.state.x = x + w;
    flow.state.at_line_start = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_around_symbols() {
        let toks = split_word("ok\u{1F600}go");
        assert_eq!(toks.len(), 3);
        assert!(matches!(&toks[0], Token::Literal("ok")));
        assert!(matches!(&toks[1], Token::Symbol("\u{1F600}")));
        assert!(matches!(&toks[2], Token::Literal("go")));
    }

    #[test]
    fn adjacent_symbols_stay_separate() {
        let toks = split_word("\u{1F600}\u{1F601}");
        assert_eq!(toks.len(), 2);
        assert!(toks.iter().all(|t| matches!(t, Token::Symbol(_))));
    }

    #[test]
    fn plain_word_is_one_literal() {
        let toks = split_word("hello");
        assert_eq!(toks.len(), 1);
        assert!(matches!(&toks[0], Token::Literal("hello")));
    }
}
