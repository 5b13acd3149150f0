use crate::attribute;
use crate::engine::{Point, Rect, Size};
use crate::sprite::sheet::FrameGrid;

pub const DEFAULT_SCALE: f64 = 1.0;

/// Normalized construction parameters of a [`super::Sprite`]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteParams {
    pub grid: FrameGrid,
    pub position: Point,
    pub scale: f64,
}

impl Default for SpriteParams {
    fn default() -> Self {
        SpriteParams {
            grid: FrameGrid::default(),
            position: Point::default(),
            scale: DEFAULT_SCALE,
        }
    }
}

impl SpriteParams {
    /// Reads raw attribute values, any of which may be absent
    /// - columns/rows : leading integer, 1 when missing or < 1
    /// - x/y          : leading integer, 0 when missing
    /// - scale        : leading number, 1.0 when missing or <= 0
    pub fn from_attributes(
        columns: Option<&str>,
        rows: Option<&str>,
        x: Option<&str>,
        y: Option<&str>,
        scale: Option<&str>,
    ) -> Self {
        SpriteParams {
            grid: FrameGrid::new(grid_dimension(columns), grid_dimension(rows)),
            position: Point {
                x: x.and_then(attribute::leading_int).unwrap_or(0),
                y: y.and_then(attribute::leading_int).unwrap_or(0),
            },
            scale: scale
                .and_then(attribute::leading_float)
                .filter(|scale| *scale > 0.0)
                .unwrap_or(DEFAULT_SCALE),
        }
    }

    /// Screen rectangle of one frame, unscaled
    pub fn bounding_box(&self, frame_size: Size) -> Rect {
        Rect::new(self.position, frame_size)
    }

    /// Where one frame lands on the canvas, scale applied
    pub fn destination(&self, frame_size: Size) -> Rect {
        Rect::new(self.position, frame_size.scaled(self.scale))
    }
}

fn grid_dimension(value: Option<&str>) -> u32 {
    value
        .and_then(attribute::leading_int)
        .and_then(|count| u32::try_from(count).ok())
        .map_or(1, |count| count.max(1))
}
