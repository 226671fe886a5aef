//! The 2D layout cursor and the column/page allocator.
//!
//! All renderers share one [`Flow`]: it owns the mutable cursor state and is
//! the only code allowed to start new columns or pages. Coordinates are
//! top-down page points and `y` is the current text baseline.

use crate::backend::DrawBackend;
use crate::fonts::FontVariant;
use crate::model::RenderConfig;

use super::geometry::PageGeometry;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutState {
    /// Zero-based index of the column the cursor is in.
    pub column: u32,
    pub x: f32,
    /// Baseline of the current line, measured down from the page top.
    pub y: f32,
    /// Tallest line height claimed on the current line. Wrapping advances by
    /// this, so a large inline element pushes the whole line down.
    pub line_max_h: f32,
    pub at_line_start: bool,
    /// Whether the previous text run ended in whitespace, for joining
    /// adjacent runs without doubling or losing spaces.
    pub prev_ended_with_space: bool,
    pub page_number: u32,
}

pub struct Flow<'a> {
    pub geom: &'a PageGeometry,
    pub cfg: &'a RenderConfig,
    pub state: LayoutState,
}

impl<'a> Flow<'a> {
    pub fn new(geom: &'a PageGeometry, cfg: &'a RenderConfig) -> Self {
        Flow {
            geom,
            cfg,
            state: LayoutState {
                column: 0,
                x: geom.column_x(0),
                y: geom.margin_top + cfg.font_size,
                line_max_h: 0.0,
                at_line_start: true,
                prev_ended_with_space: false,
                page_number: 1,
            },
        }
    }

    /// Left edge of the current column.
    pub fn column_x(&self) -> f32 {
        self.geom.column_x(self.state.column)
    }

    /// Right edge of the current column; nothing may be drawn past it.
    pub fn column_right(&self) -> f32 {
        self.column_x() + self.geom.column_width
    }

    /// Line advance for body text at the base size.
    pub fn default_line_height(&self) -> f32 {
        self.cfg.font_size * self.cfg.line_height
    }

    /// Check that `needed` points of vertical space remain below the
    /// baseline. Returns true when they do; otherwise advances to the next
    /// column or page first and returns false so the caller re-plans from
    /// the fresh cursor.
    pub fn ensure_space(&mut self, needed: f32, backend: &mut dyn DrawBackend) -> bool {
        if self.state.y + needed <= self.geom.content_bottom() {
            return true;
        }
        self.advance_column_or_page(backend);
        false
    }

    /// Move to the top of the next column, or the first column of a new page
    /// when the current column is the last.
    pub fn advance_column_or_page(&mut self, backend: &mut dyn DrawBackend) {
        if self.state.column + 1 < self.geom.columns {
            self.state.column += 1;
        } else {
            if self.cfg.show_page_numbers {
                self.stamp_page_number(backend);
            }
            backend.start_new_page();
            self.state.page_number += 1;
            self.state.column = 0;
            self.paint_background(backend);
        }
        self.state.x = self.column_x();
        self.state.y = self.geom.margin_top + self.cfg.font_size;
        self.state.line_max_h = 0.0;
        self.state.at_line_start = true;
    }

    /// Finish the current line: x back to the column start, baseline down by
    /// `line_height`.
    pub fn new_line(&mut self, line_height: f32) {
        self.state.x = self.column_x();
        self.state.y += line_height;
        self.state.line_max_h = 0.0;
        self.state.at_line_start = true;
    }

    /// Fill the page with the configured background color. Called for every
    /// fresh page, including the first; skipped for white.
    pub fn paint_background(&self, backend: &mut dyn DrawBackend) {
        if self.cfg.bg_color.is_white() {
            return;
        }
        backend.set_fill_color(self.cfg.bg_color.0);
        backend.fill_rect(0.0, 0.0, self.geom.page_width, self.geom.page_height);
        backend.set_fill_color(self.cfg.text_color.0);
    }

    /// Centered page-number footer on the page currently being drawn.
    pub fn stamp_page_number(&self, backend: &mut dyn DrawBackend) {
        let font = FontVariant::regular(self.cfg.font_family);
        let label = self.state.page_number.to_string();
        let w = font.text_width(&label, 10.0);
        let x = (self.geom.page_width - w) / 2.0;
        let y = self.geom.page_height - 15.0;
        backend.set_font(font, 10.0);
        backend.draw_text(x, y, &label);
    }
}
