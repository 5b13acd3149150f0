use crate::engine::{Point, Rect, Size};

/// Column/row layout of a sprite sheet, both always >= 1
///
/// ┌──────────── image ────────────┐
/// │ (0,0)   │ (1,0)   │ (2,0)     │   columns = 3
/// ├─────────┼─────────┼───────────┤   rows    = 2
/// │ (0,1)   │ (1,1)   │ (2,1)     │
/// └─────────┴─────────┴───────────┘
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameGrid {
    columns: u32,
    rows: u32,
}

impl Default for FrameGrid {
    fn default() -> Self {
        FrameGrid {
            columns: 1,
            rows: 1,
        }
    }
}

impl FrameGrid {
    /// Values below 1 are raised to 1
    pub fn new(columns: u32, rows: u32) -> Self {
        FrameGrid {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Size of one cell for an image of `image` pixels
    pub fn frame_size(&self, image: Size) -> Size {
        Size {
            width: image.width / f64::from(self.columns),
            height: image.height / f64::from(self.rows),
        }
    }

    /// Source rectangle of cell `frame` inside the sheet
    pub fn source_rect(&self, frame: Point, frame_size: Size) -> Rect {
        Rect {
            x: f64::from(frame.x) * frame_size.width,
            y: f64::from(frame.y) * frame_size.height,
            width: frame_size.width,
            height: frame_size.height,
        }
    }
}
