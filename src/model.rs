use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Margins are configured in centimeters; layout runs in points.
pub const CM_TO_PT: f32 = 28.35;

/// CSS pixel to point conversion applied to extracted image dimensions.
pub const PX_TO_PT: f32 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    /// Portrait dimensions in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.28, 841.89),
            PaperSize::A5 => (419.53, 595.28),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

/// How per-run font sizes from the extractor are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontMode {
    /// Every run renders at the configured base size.
    #[default]
    Fixed,
    /// Runs keep the size the extractor measured.
    Original,
    /// Extracted size plus a configured delta.
    Relative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);

    pub fn is_white(self) -> bool {
        self == Color::WHITE
    }

    fn parse(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color([r, g, b]))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [r, g, b] = self.0;
        serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color {s:?}, expected #rrggbb")))
    }
}

pub(crate) mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

/// Encoded raster bytes plus the extracted on-screen dimensions in CSS pixels.
/// The capture service produced these before the render started; the engine
/// only scales and places them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    #[serde(rename = "src", with = "base64_bytes")]
    pub bytes: Vec<u8>,
    #[serde(default)]
    pub format: ImageFormat,
    pub width: f32,
    pub height: f32,
}

impl ImageData {
    pub fn width_pt(&self) -> f32 {
        self.width * PX_TO_PT
    }

    pub fn height_pt(&self) -> f32 {
        self.height * PX_TO_PT
    }
}

/// One styled run of text, or a forced line break when `line_break` is set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextRun {
    pub text: String,
    /// Size the extractor measured, in points. `None` falls back to 12pt
    /// when a non-fixed font mode asks for it.
    pub font_size: Option<f32>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub sub: bool,
    pub sup: bool,
    #[serde(rename = "newline")]
    pub line_break: bool,
    pub starts_with_space: bool,
    pub ends_with_space: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSegment {
    #[serde(flatten)]
    pub data: ImageData,
    #[serde(default)]
    pub is_inline: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSegment {
    pub rows: Vec<Vec<String>>,
    #[serde(rename = "maxCols")]
    pub column_count: usize,
}

/// One atomic unit of extracted content. Produced once by the extractor,
/// consumed in order; the engine never reorders segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text(TextRun),
    Image(ImageSegment),
    Code(CodeBlock),
    Table(TableSegment),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            top: 1.0,
            bottom: 1.0,
            left: 1.0,
            right: 1.0,
        }
    }
}

/// The durable configuration record supplied at job start. Read-only for the
/// duration of one render. Out-of-range values are clamped, never rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Centimeters.
    pub margins: Margins,
    pub column_count: u32,
    pub font_family: FontFamily,
    /// Base body size in points (used directly in `Fixed` mode).
    pub font_size: f32,
    pub line_height: f32,
    pub font_mode: FontMode,
    /// Point delta applied in `Relative` mode.
    pub font_scale: f32,
    pub bg_color: Color,
    pub text_color: Color,
    pub show_page_numbers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            paper_size: PaperSize::default(),
            orientation: Orientation::default(),
            margins: Margins::default(),
            column_count: 1,
            font_family: FontFamily::default(),
            font_size: 12.0,
            line_height: 1.15,
            font_mode: FontMode::default(),
            font_scale: 0.0,
            bg_color: Color::WHITE,
            text_color: Color::BLACK,
            show_page_numbers: true,
        }
    }
}

impl RenderConfig {
    /// Clamp out-of-range settings to safe bounds. A render never aborts
    /// because of bad configuration.
    pub fn normalized(&self) -> RenderConfig {
        let mut cfg = self.clone();
        cfg.column_count = cfg.column_count.max(1);
        cfg.margins.top = cfg.margins.top.max(0.0);
        cfg.margins.bottom = cfg.margins.bottom.max(0.0);
        cfg.margins.left = cfg.margins.left.max(0.0);
        cfg.margins.right = cfg.margins.right.max(0.0);
        if !cfg.font_size.is_finite() || cfg.font_size <= 0.0 {
            cfg.font_size = 12.0;
        }
        if !cfg.line_height.is_finite() || cfg.line_height <= 0.0 {
            cfg.line_height = 1.15;
        }
        if !cfg.font_scale.is_finite() {
            cfg.font_scale = 0.0;
        }
        cfg
    }
}

/// Top-level input document: the extracted segment sequence plus the
/// configuration record it was captured with.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInput {
    pub config: RenderConfig,
    pub segments: Vec<Segment>,
}
