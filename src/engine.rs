use crate::browser::{self, LoopClosure};
use anyhow::{anyhow, Result};
// web assembly is single threaded, so Rc RefCell > Mutex
use futures::channel::oneshot::channel;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::{
    // unchecked_ref casts the closure to a js Function
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn scaled(self, factor: f64) -> Size {
        Size {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect {
            x: position.x.into(),
            y: position.y.into(),
            width: size.width,
            height: size.height,
        }
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer { context }
    }

    /// Clears the whole drawing buffer of the bound canvas
    pub fn clear_all(&self) {
        let (width, height) = match self.context.canvas() {
            Some(canvas) => (canvas.width(), canvas.height()),
            None => return,
        };
        self.context
            .clear_rect(0.0, 0.0, width.into(), height.into());
    }

    pub fn draw_image(
        &self,
        image: &HtmlImageElement,
        frame: &Rect,
        destination: &Rect,
    ) -> Result<()> {
        self.context
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                destination.x,
                destination.y,
                destination.width,
                destination.height,
            )
            .map_err(|err| anyhow!("Error drawing image : {:#?}", err))
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssetError {
    #[error("could not load image '{url}' : {reason}")]
    Load { url: String, reason: String },
    #[error("image '{0}' was dropped before it finished loading")]
    Abandoned(String),
}

/// Fulfilled exactly once, when the image loads or fails
pub type LoadSignal = Shared<LocalBoxFuture<'static, Result<(), AssetError>>>;

/// Starts loading `source` into a new image element
/// # Arguments
/// * `source` - path/url of the image
/// * `on_load` - runs with the loaded image before the signal resolves
/// # Returns
/// * the image element, still loading
/// * a cloneable signal resolving to the load result
pub fn request_image(
    source: &str,
    on_load: impl FnOnce(&HtmlImageElement) + 'static,
) -> Result<(HtmlImageElement, LoadSignal)> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), AssetError>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let loaded = image.clone();
    let success_callback = browser::closure_once(move || {
        on_load(&loaded);
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let failed_source = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(AssetError::Load {
                url: failed_source,
                reason: format!("{:?}", err),
            }));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until the image loads or errors
    success_callback.forget();
    error_callback.forget();

    let abandoned = source.to_string();
    let signal = async move {
        // Result<Result<(), AssetError>, oneshot::Canceled>
        rx.await
            .unwrap_or_else(|_| Err(AssetError::Abandoned(abandoned)))
    }
    .boxed_local()
    .shared();

    Ok((image, signal))
}

type SharedLoopClosure = Rc<RefCell<Option<LoopClosure>>>;

/// Calls a frame callback on every display refresh until stopped
pub struct AnimationLoop;

impl AnimationLoop {
    pub fn start(mut frame: impl FnMut(f64) + 'static) -> Result<LoopHandle> {
        let running = Rc::new(Cell::new(true));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        let loop_running = running.clone();
        let loop_pending = pending.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            loop_pending.set(None);
            if !loop_running.get() {
                return;
            }
            frame(perf);
            // frame() may have stopped us
            if !loop_running.get() {
                return;
            }
            if let Some(closure) = f.borrow().as_ref() {
                match browser::request_animation_frame(closure) {
                    Ok(id) => loop_pending.set(Some(id)),
                    Err(err) => warn!("Animation loop halted : {:#}", err),
                }
            }
        }));

        let id = browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("AnimationLoop: Loop is None"))?,
        )?;
        pending.set(Some(id));

        Ok(LoopHandle {
            running,
            pending,
            closure: g,
        })
    }
}

/// Stop handle for an [`AnimationLoop`]
///
/// Dropping the handle leaves the loop running for the page lifetime.
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    closure: SharedLoopClosure,
}

impl LoopHandle {
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.pending.take() {
            if let Err(err) = browser::cancel_animation_frame(id) {
                warn!("{:#}", err);
            }
        }
        // the closure may be executing right now, release it afterwards
        let closure = self.closure.clone();
        browser::spawn_local(async move {
            closure.borrow_mut().take();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rect_from_point_and_size() {
        let rect = Rect::new(
            Point { x: 10, y: -20 },
            Size {
                width: 32.0,
                height: 16.5,
            },
        );
        assert_relative_eq!(rect.x, 10.0);
        assert_relative_eq!(rect.y, -20.0);
        assert_relative_eq!(rect.width, 32.0);
        assert_relative_eq!(rect.height, 16.5);
    }

    #[test]
    fn scaled_size_multiplies_both_axes() {
        let size = Size {
            width: 32.0,
            height: 12.5,
        }
        .scaled(2.0);
        assert_relative_eq!(size.width, 64.0);
        assert_relative_eq!(size.height, 25.0);
    }

    #[test]
    fn asset_error_names_the_source() {
        let err = AssetError::Load {
            url: "hero.png".into(),
            reason: "404".into(),
        };
        assert_eq!(err.to_string(), "could not load image 'hero.png' : 404");
    }
}
