//! Classes exported to page scripts.
//!
//! Markup covers the common case. These let a script build the same
//! surfaces and sprites by hand and drive the toolboxes afterwards.

use crate::bootstrap::Page;
use crate::engine::LoopHandle;
use crate::sprite::{Sprite, SpriteParams};
use crate::surface::{Surface, SurfaceOptions};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

#[wasm_bindgen]
pub struct Canvas2d {
    surface: Rc<Surface>,
}

#[wasm_bindgen]
impl Canvas2d {
    /// `options` is `undefined` or `{ w?, h? }`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, options: JsValue) -> Result<Canvas2d, JsValue> {
        let options = if options.is_undefined() || options.is_null() {
            SurfaceOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let surface = Surface::new(canvas, options).map_err(to_js)?;
        Ok(Canvas2d {
            surface: Rc::new(surface),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Class name of the active theme
    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.surface.theme().class_name().to_string()
    }

    #[wasm_bindgen(js_name = changeWidth)]
    pub fn change_width(&self, w: i32) -> Result<(), JsValue> {
        self.surface.resize_width(w).map_err(to_js)
    }

    #[wasm_bindgen(js_name = changeHeight)]
    pub fn change_height(&self, h: i32) -> Result<(), JsValue> {
        self.surface.resize_height(h).map_err(to_js)
    }

    #[wasm_bindgen(js_name = selectTheme1)]
    pub fn select_theme1(&self) -> Result<(), JsValue> {
        self.surface.select_theme1().map_err(to_js)
    }

    #[wasm_bindgen(js_name = showToolbox)]
    pub fn show_toolbox(&self, side: &str) -> Result<(), JsValue> {
        self.surface.show_panel(side).map_err(to_js)
    }

    #[wasm_bindgen(js_name = hideToolbox)]
    pub fn hide_toolbox(&self, side: &str) -> Result<(), JsValue> {
        self.surface.hide_panel(side).map_err(to_js)
    }

    #[wasm_bindgen(js_name = openToolbox)]
    pub fn open_toolbox(&self, side: &str) -> Result<(), JsValue> {
        self.surface.open_panel(side).map_err(to_js)
    }

    #[wasm_bindgen(js_name = closeToolbox)]
    pub fn close_toolbox(&self, side: &str) -> Result<(), JsValue> {
        self.surface.close_panel(side).map_err(to_js)
    }

    #[wasm_bindgen(js_name = drawSprite)]
    pub fn draw_sprite(&self, sprite: &Sprite2d) -> Result<RenderHandle, JsValue> {
        self.surface
            .start_rendering(Rc::clone(&sprite.sprite))
            .map(|handle| RenderHandle { handle })
            .map_err(to_js)
    }
}

#[derive(Serialize)]
struct SpriteRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

#[wasm_bindgen]
pub struct Sprite2d {
    sprite: Rc<Sprite>,
}

#[wasm_bindgen]
impl Sprite2d {
    #[wasm_bindgen(constructor)]
    pub fn new(
        image: &str,
        x_frames: Option<String>,
        y_frames: Option<String>,
        pos_x: Option<String>,
        pos_y: Option<String>,
        scale: Option<String>,
    ) -> Result<Sprite2d, JsValue> {
        let params = SpriteParams::from_attributes(
            x_frames.as_deref(),
            y_frames.as_deref(),
            pos_x.as_deref(),
            pos_y.as_deref(),
            scale.as_deref(),
        );
        let sprite = Sprite::new(image, params).map_err(to_js)?;
        Ok(Sprite2d {
            sprite: Rc::new(sprite),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn loaded(&self) -> bool {
        self.sprite.is_loaded()
    }

    #[wasm_bindgen(getter)]
    pub fn src(&self) -> String {
        self.sprite.source()
    }

    #[wasm_bindgen(getter, js_name = frameX)]
    pub fn frame_x(&self) -> i32 {
        self.sprite.frame().x
    }

    #[wasm_bindgen(getter, js_name = frameY)]
    pub fn frame_y(&self) -> i32 {
        self.sprite.frame().y
    }

    /// `{ x, y, w, h }` of the current frame, scale not applied
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        let rect = self.sprite.bounding_box();
        let rect = SpriteRect {
            x: rect.x,
            y: rect.y,
            w: rect.width,
            h: rect.height,
        };
        Ok(serde_wasm_bindgen::to_value(&rect)?)
    }
}

#[wasm_bindgen]
pub struct RenderHandle {
    handle: LoopHandle,
}

#[wasm_bindgen]
impl RenderHandle {
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn stop(&self) {
        self.handle.stop();
    }
}

/// What the markup scan built, kept alive by the page script
#[wasm_bindgen]
pub struct Canvas2dPage {
    page: Page,
}

impl From<Page> for Canvas2dPage {
    fn from(page: Page) -> Self {
        Canvas2dPage { page }
    }
}

#[wasm_bindgen]
impl Canvas2dPage {
    #[wasm_bindgen(js_name = surfaceNames)]
    pub fn surface_names(&self) -> Vec<JsValue> {
        self.page
            .surfaces()
            .names()
            .map(JsValue::from)
            .collect()
    }

    pub fn surface(&self, name: &str) -> Option<Canvas2d> {
        self.page
            .surface(name)
            .map(|surface| Canvas2d { surface })
    }

    #[wasm_bindgen(js_name = spriteCount)]
    pub fn sprite_count(&self) -> usize {
        self.page.bindings().len()
    }

    pub fn warnings(&self) -> Vec<JsValue> {
        self.page
            .warnings()
            .iter()
            .map(|warning| JsValue::from(warning.to_string()))
            .collect()
    }

    pub fn stop(&self) {
        self.page.stop();
    }
}
