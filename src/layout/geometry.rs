use crate::model::{CM_TO_PT, Orientation, RenderConfig};

/// Horizontal gap between adjacent columns, points.
pub const COLUMN_GAP: f32 = 15.0;

/// Floor for column width when margins and gaps exceed the page. Degenerate
/// output, but layout stays finite.
const MIN_COLUMN_WIDTH: f32 = 10.0;

/// Immutable page frame resolved once per job: physical page size, margins
/// in points and the derived column grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub columns: u32,
    pub column_width: f32,
}

impl PageGeometry {
    pub fn resolve(cfg: &RenderConfig) -> Self {
        let (w, h) = cfg.paper_size.dimensions();
        let (page_width, page_height) = match cfg.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        };

        let margin_top = cfg.margins.top * CM_TO_PT;
        let margin_bottom = cfg.margins.bottom * CM_TO_PT;
        let margin_left = cfg.margins.left * CM_TO_PT;
        let margin_right = cfg.margins.right * CM_TO_PT;

        let columns = cfg.column_count.max(1);
        let content_width = page_width - margin_left - margin_right;
        let column_width = ((content_width - (columns - 1) as f32 * COLUMN_GAP)
            / columns as f32)
            .max(MIN_COLUMN_WIDTH);

        PageGeometry {
            page_width,
            page_height,
            margin_top,
            margin_bottom,
            margin_left,
            margin_right,
            columns,
            column_width,
        }
    }

    /// Left edge of column `col` (zero-based).
    pub fn column_x(&self, col: u32) -> f32 {
        self.margin_left + col as f32 * (self.column_width + COLUMN_GAP)
    }

    /// Lowest usable y in top-down coordinates.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }
}
