//! Text measurement over the base-14 PDF font metrics.
//!
//! The engine never embeds fonts (out of scope); it measures against
//! compiled-in approximate width tables for the Helvetica, Times and Courier
//! families and draws with the matching built-in Type1 fonts. Strings are
//! encoded as WinAnsi (Windows-1252); characters outside that repertoire are
//! dropped before measuring or drawing, except pictographic symbols which the
//! text renderer routes to the raster path instead.

use crate::model::FontFamily;

/// A concrete base font: family plus bold/italic variant. This is the
/// measurement adapter the renderers call and the font selector the drawing
/// backend receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontVariant {
    pub family: FontFamily,
    pub bold: bool,
    pub italic: bool,
}

impl FontVariant {
    pub fn regular(family: FontFamily) -> Self {
        FontVariant {
            family,
            bold: false,
            italic: false,
        }
    }

    /// PostScript base font name understood by every PDF viewer.
    pub fn base_font(&self) -> &'static str {
        match (self.family, self.bold, self.italic) {
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Times, false, false) => "Times-Roman",
            (FontFamily::Times, true, false) => "Times-Bold",
            (FontFamily::Times, false, true) => "Times-Italic",
            (FontFamily::Times, true, true) => "Times-BoldItalic",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }

    /// Width of a single character at 1000 units/em, 0 for unmappable chars.
    fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte < 32 {
            return 0.0;
        }
        match self.family {
            FontFamily::Courier => 600.0,
            FontFamily::Helvetica => helvetica_width_1000(byte, self.bold),
            FontFamily::Times => times_width_1000(byte, self.bold),
        }
    }

    /// Measured width of a string at the given size, in points.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }

    /// Greedy word wrap of `text` into lines that fit `max_width` points.
    /// Existing newlines are preserved; a word wider than the box is broken
    /// at the last character that still fits. Always returns at least one
    /// (possibly empty) line.
    pub fn wrap(&self, text: &str, font_size: f32, max_width: f32) -> Vec<String> {
        let space_w = self.space_width(font_size);
        let mut lines: Vec<String> = Vec::new();

        for raw in text.split('\n') {
            let raw = raw.trim_end();
            let mut line = String::new();
            let mut line_w = 0.0f32;

            for word in raw.split_whitespace() {
                let word_w = self.text_width(word, font_size);
                let sep = if line.is_empty() { 0.0 } else { space_w };

                if line_w + sep + word_w <= max_width {
                    if sep > 0.0 {
                        line.push(' ');
                    }
                    line.push_str(word);
                    line_w += sep + word_w;
                    continue;
                }

                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_w = 0.0;
                }

                if word_w <= max_width {
                    line.push_str(word);
                    line_w = word_w;
                } else {
                    // Word alone exceeds the box: split at character level.
                    for ch in word.chars() {
                        let cw = self.char_width_1000(ch) * font_size / 1000.0;
                        if line_w + cw > max_width && !line.is_empty() {
                            lines.push(std::mem::take(&mut line));
                            line_w = 0.0;
                        }
                        line.push(ch);
                        line_w += cw;
                    }
                }
            }

            lines.push(line);
        }

        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi bytes 32..=255.
fn helvetica_width_1000(byte: u8, bold: bool) -> f32 {
    match byte {
        32 => 278.0,                          // space
        33..=47 => 333.0,                     // punctuation
        48..=57 => 556.0,                     // digits
        58..=64 => 333.0,                     // more punctuation
        73 | 74 => 278.0,                     // I J (narrow uppercase)
        77 | 87 => 889.0,                     // M W (wide)
        65..=90 => {
            if bold {
                722.0
            } else {
                667.0
            }
        }
        91..=96 => 333.0,                     // brackets etc.
        102 | 105 | 106 | 108 | 116 => {
            if bold {
                333.0
            } else {
                278.0 // narrow lowercase: f i j l t
            }
        }
        109 | 119 => 833.0,                   // m w (wide)
        97..=122 => {
            if bold {
                611.0
            } else {
                556.0
            }
        }
        _ => 556.0,
    }
}

/// Approximate Times widths at 1000 units/em for WinAnsi bytes 32..=255.
fn times_width_1000(byte: u8, bold: bool) -> f32 {
    match byte {
        32 => 250.0,
        33..=47 => 333.0,
        48..=57 => 500.0,
        58..=64 => 333.0,
        73 => 333.0,
        74 => 389.0,
        77 => 889.0,
        87 => 944.0,
        65..=90 => {
            if bold {
                722.0
            } else {
                667.0
            }
        }
        91..=96 => 333.0,
        102 | 105 | 106 | 108 | 116 => 278.0,
        109 => 778.0,
        119 => 722.0,
        97..=122 => 500.0,
        _ => 500.0,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str
/// encoding. Unmappable characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| {
            let b = char_to_winansi(c);
            (b >= 32).then_some(b)
        })
        .collect()
}

/// Strip characters the WinAnsi repertoire cannot represent, keeping
/// newlines. Tabs become single spaces; code blocks expand them beforehand.
pub(crate) fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            _ if char_to_winansi(c) >= 32 => Some(c),
            _ => None,
        })
        .collect()
}
