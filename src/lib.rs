// ==================== Imports ====================
use wasm_bindgen::prelude::*;

#[macro_use]
mod browser;
pub mod api;
pub mod attribute;
pub mod bootstrap;
pub mod engine;
pub mod sprite;
pub mod surface;

pub use api::{Canvas2d, Canvas2dPage, RenderHandle, Sprite2d};
pub use bootstrap::{Page, Registry, ScanWarning};
pub use engine::{AnimationLoop, AssetError, LoopHandle};
pub use sprite::{FrameGrid, Sprite, SpriteParams};
pub use surface::{PanelSide, Surface, SurfaceOptions};

// ==================== Main Functions ====================
/// Main entry for the Webassembly module
/// - installs the panic hook
/// - scans the document for declared canvases and sprites
/// - hands what it built back to the page script
#[wasm_bindgen]
pub fn main_js() -> Result<Canvas2dPage, JsValue> {
    // better panic messages in the console
    console_error_panic_hook::set_once();

    let page = browser::document()
        .and_then(|document| Page::scan(&document))
        .map_err(api::to_js)?;
    log!(
        "canvas2d: {} canvas(es), {} sprite(s), {} warning(s)",
        page.surfaces().len(),
        page.bindings().len(),
        page.warnings().len()
    );

    Ok(page.into())
}
