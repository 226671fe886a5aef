//! Shared test helpers: a backend that records the command stream instead of
//! producing PDF syntax, plus segment builders.

#![allow(dead_code)]

use pageflow::model::{
    CodeBlock, ImageData, ImageFormat, ImageSegment, RenderConfig, Segment, TableSegment, TextRun,
};
use pageflow::{DrawBackend, Error, FontVariant, NoRaster};

/// One primitive drawing command, in top-down page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    NewPage,
    SetFont { base: &'static str, size: f32 },
    SetFill([u8; 3]),
    Text { x: f32, y: f32, text: String },
    Image { x: f32, y: f32, w: f32, h: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, width: f32 },
}

#[derive(Default)]
pub struct RecordingBackend {
    pub commands: Vec<Command>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `Text` commands, excluding page-number stamps.
    pub fn body_texts(&self) -> Vec<(f32, f32, &str)> {
        let mut out = Vec::new();
        let mut size = 0.0f32;
        for cmd in &self.commands {
            match cmd {
                Command::SetFont { size: s, .. } => size = *s,
                Command::Text { x, y, text } => {
                    let is_page_number = size == 10.0 && text.parse::<u32>().is_ok();
                    if !is_page_number {
                        out.push((*x, *y, text.as_str()));
                    }
                }
                _ => {}
            }
        }
        out
    }

    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    pub fn page_count(&self) -> usize {
        1 + self.count(|c| matches!(c, Command::NewPage))
    }
}

impl DrawBackend for RecordingBackend {
    fn start_new_page(&mut self) {
        self.commands.push(Command::NewPage);
    }

    fn set_font(&mut self, font: FontVariant, size: f32) {
        self.commands.push(Command::SetFont {
            base: font.base_font(),
            size,
        });
    }

    fn set_fill_color(&mut self, rgb: [u8; 3]) {
        self.commands.push(Command::SetFill(rgb));
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        self.commands.push(Command::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn draw_image(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        _data: &ImageData,
    ) -> Result<(), Error> {
        self.commands.push(Command::Image { x, y, w, h });
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(Command::Rect { x, y, w, h });
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        self.commands.push(Command::Line {
            x1,
            y1,
            x2,
            y2,
            width,
        });
    }
}

/// Render into a fresh recording backend.
pub fn record(segments: &[Segment], config: &RenderConfig) -> RecordingBackend {
    let mut backend = RecordingBackend::new();
    pageflow::render_into(segments, config, &mut backend, &mut NoRaster, None);
    backend
}

pub fn text(s: &str) -> Segment {
    Segment::Text(TextRun {
        text: s.to_string(),
        ..Default::default()
    })
}

pub fn line_break() -> Segment {
    Segment::Text(TextRun {
        line_break: true,
        ..Default::default()
    })
}

pub fn code(s: &str) -> Segment {
    Segment::Code(CodeBlock {
        text: s.to_string(),
    })
}

pub fn table(rows: &[&[&str]], column_count: usize) -> Segment {
    Segment::Table(TableSegment {
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
        column_count,
    })
}

/// `width`/`height` are CSS pixels, as the extractor reports them.
pub fn image(width: f32, height: f32, is_inline: bool) -> Segment {
    Segment::Image(ImageSegment {
        data: ImageData {
            bytes: PNG_1X1.to_vec(),
            format: ImageFormat::Png,
            width,
            height,
        },
        is_inline,
    })
}

/// Smallest valid PNG: 1×1, RGBA.
pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];
