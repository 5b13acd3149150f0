use anyhow::{anyhow, Result};
use std::future::Future;
use wasm_bindgen::closure::{Closure, WasmClosureFnOnce};
use wasm_bindgen::JsCast;

#[rustfmt::skip]
use web_sys::{
    CanvasRenderingContext2d,
    CssStyleDeclaration,
    Document,
    Element,
    HtmlCanvasElement,
    HtmlElement,
    HtmlImageElement,
    Window,
};

macro_rules! log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format!($($t)*).into())
    }
}

macro_rules! warn {
    ($($t:tt)*) => {
        web_sys::console::warn_1(&format!($($t)*).into())
    }
}

// ==================== Constants ====================
// Markup contract: element selectors, attribute names and css classes
pub mod html {
    pub const CONTEXT_2D: &str = "2d";
    pub const DIV: &str = "div";

    pub const SURFACE_SELECTOR: &str = "canvas[canvas2d]";
    pub const SURFACE_NAME: &str = "canvas2d";
    pub const OPEN_LEFT: &str = "open-left";
    pub const OPEN_RIGHT: &str = "open-right";

    pub const SPRITE_SELECTOR: &str = "img[sprite2d]";
    pub const SPRITE_TARGET: &str = "canvas";
    pub const X_FRAMES: &str = "x-frames";
    pub const Y_FRAMES: &str = "y-frames";
    pub const X_POS: &str = "x-pos";
    pub const Y_POS: &str = "y-pos";
    pub const SCALE: &str = "scale";

    pub const WRAPPER_CLASS: &str = "canvas-wrapper";
    pub const LEFT_TOOLBOX_CLASS: &str = "canvas-left-toolbox";
    pub const RIGHT_TOOLBOX_CLASS: &str = "canvas-right-toolbox";
    pub const THEME1: &str = "theme1";
    pub const OPEN: &str = "open";
    pub const CLOSE: &str = "close";
}

pub type LoopClosure = Closure<dyn FnMut(f64)>;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

pub fn new_image() -> Result<HtmlImageElement> {
    HtmlImageElement::new()
        .map_err(|err| anyhow!("Could not create image element : {:#?}", err))
}

/// Creates a detached element of `tag` carrying a single css `class`
pub fn create_element(tag: &str, class: &str) -> Result<HtmlElement> {
    let element = document()?
        .create_element(tag)
        .map_err(|err| anyhow!("Could not create <{}> element : {:#?}", tag, err))?;
    element.set_class_name(class);
    element
        .dyn_into::<HtmlElement>()
        .map_err(|element| anyhow!("Error converting {:#?} to HtmlElement", element))
}

/// Every element under `document` matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|err| anyhow!("Invalid selector '{}' : {:#?}", selector, err))?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context(html::CONTEXT_2D)
        // Result<Option<Object>, JsValue>
        // - map error(JsValue) to anyhow
        // - map the None case to an error too
        .map_err(|js_value| anyhow!("Error getting context : {:#?}", js_value))?
        .ok_or_else(|| anyhow!("No 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "Error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

pub fn computed_style(element: &Element) -> Result<CssStyleDeclaration> {
    window()?
        .get_computed_style(element)
        .map_err(|err| anyhow!("Error reading computed style : {:#?}", err))?
        .ok_or_else(|| anyhow!("No computed style for element"))
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<()> {
    element
        .style()
        .set_property(property, value)
        .map_err(|err| anyhow!("Could not set style {} = {} : {:#?}", property, value, err))
}

pub fn closure_once<F, A, R>(f: F) -> Closure<F::FnMut>
where
    F: 'static + WasmClosureFnOnce<A, R>,
{
    Closure::once(f)
}

pub fn create_raf_closure(f: impl FnMut(f64) + 'static) -> LoopClosure {
    Closure::wrap(Box::new(f) as Box<dyn FnMut(f64)>)
}

pub fn request_animation_frame(callback: &LoopClosure) -> Result<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot request animation frame {:#?}", err))
}

pub fn cancel_animation_frame(id: i32) -> Result<()> {
    window()?
        .cancel_animation_frame(id)
        .map_err(|err| anyhow!("Cannot cancel animation frame {} : {:#?}", id, err))
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
