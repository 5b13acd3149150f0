// ┌──────────────────────────────────────────────────────────────┐
// │ sprite/                                                      │
// ├────────────┬─────────────────────────────────────────────────┤
// │ mod.rs     │ Sprite : image element + load state             │
// │ params.rs  │ attribute normalization, draw rectangles        │
// │ sheet.rs   │ frame grid math                                 │
// └────────────┴─────────────────────────────────────────────────┘
pub mod params;
pub mod sheet;

pub use params::SpriteParams;
pub use sheet::FrameGrid;

use crate::engine::{self, LoadSignal, Point, Rect, Renderer, Size};
use anyhow::{Context, Result};
use std::cell::Cell;
use std::rc::Rc;
use web_sys::HtmlImageElement;

/// Image backed, frame gridded drawable
///
/// Loading starts on construction. Until the image arrives the sprite has
/// no frame size, reports `is_loaded() == false` and draws nothing.
pub struct Sprite {
    image: HtmlImageElement,
    params: SpriteParams,
    // cell of the grid being shown, never advanced
    frame: Point,
    frame_size: Rc<Cell<Option<Size>>>,
    ready: LoadSignal,
}

impl Sprite {
    pub fn new(source: &str, params: SpriteParams) -> Result<Self> {
        let frame_size = Rc::new(Cell::new(None));
        let loaded_size = frame_size.clone();
        let grid = params.grid;

        let (image, ready) = engine::request_image(source, move |image| {
            loaded_size.set(Some(grid.frame_size(Size {
                width: image.natural_width().into(),
                height: image.natural_height().into(),
            })));
        })
        .with_context(|| format!("Failed to create sprite image for : {}", source))?;

        Ok(Sprite {
            image,
            params,
            frame: Point::default(),
            frame_size,
            ready,
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.frame_size.get().is_some()
    }

    /// Resolves once, when the image loads or fails
    pub fn ready(&self) -> LoadSignal {
        self.ready.clone()
    }

    pub fn source(&self) -> String {
        self.image.src()
    }

    pub fn params(&self) -> &SpriteParams {
        &self.params
    }

    pub fn frame(&self) -> Point {
        self.frame
    }

    pub fn frame_size(&self) -> Option<Size> {
        self.frame_size.get()
    }

    /// Position and frame size, without scale (zero sized until loaded)
    pub fn bounding_box(&self) -> Rect {
        self.params
            .bounding_box(self.frame_size.get().unwrap_or_default())
    }

    pub fn draw(&self, renderer: &Renderer) -> Result<()> {
        if let Some(frame_size) = self.frame_size.get() {
            renderer.draw_image(
                &self.image,
                &self.params.grid.source_rect(self.frame, frame_size),
                &self.params.destination(frame_size),
            )?;
        }
        Ok(())
    }
}
