pub mod layout;
pub mod panel;

pub use layout::SurfaceOptions;
pub use panel::{Panel, PanelSide};

use crate::browser::{self, html};
use crate::engine::{AnimationLoop, LoopHandle, Renderer};
use crate::sprite::Sprite;
use anyhow::{anyhow, Context, Result};
use layout::{px, Borders};
use std::cell::Cell;
use std::rc::Rc;
use web_sys::{HtmlCanvasElement, HtmlElement};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Theme {
    Theme1,
}

impl Theme {
    pub fn class_name(&self) -> &'static str {
        match self {
            Theme::Theme1 => html::THEME1,
        }
    }
}

/// A canvas wrapped with its layout chrome
///
/// TABLE
/// ┌──────────── before ────────────┐   ┌──────────── after ──────────────────┐
/// │ <body>                         │   │ <body>                              │
/// │   <p/>                         │   │   <p/>                              │
/// │   <canvas canvas2d="stage"/>   │   │   <div class="canvas-wrapper">      │
/// │   <p/>                         │   │     <canvas class="theme1"/>        │
/// │                                │   │     <div canvas-right-toolbox/>     │
/// │                                │   │     <div canvas-left-toolbox/>      │
/// │                                │   │   </div>                            │
/// │                                │   │   <p/>                              │
/// └────────────────────────────────┘   └─────────────────────────────────────┘
pub struct Surface {
    canvas: HtmlCanvasElement,
    wrapper: HtmlElement,
    left: Panel,
    right: Panel,
    renderer: Renderer,
    // outer size, borders included
    width: Cell<i32>,
    height: Cell<i32>,
    theme: Cell<Theme>,
}

impl Surface {
    /// Wraps `canvas` in place and sizes it to `options`
    pub fn new(canvas: HtmlCanvasElement, options: SurfaceOptions) -> Result<Self> {
        // before any dom change, so a canvas without 2d support stays put
        let renderer = Renderer::new(browser::context(&canvas)?);
        let wrapper = browser::create_element(html::DIV, html::WRAPPER_CLASS)?;
        let right = Panel::new(PanelSide::Right)?;
        let left = Panel::new(PanelSide::Left)?;

        // wrapper takes the canvas' spot, then adopts it
        if let Some(parent) = canvas.parent_node() {
            parent
                .insert_before(&wrapper, Some(canvas.as_ref()))
                .map_err(|err| anyhow!("Could not insert canvas wrapper : {:#?}", err))?;
        }
        let canvas_element: &HtmlElement = &canvas;
        for child in [canvas_element, right.element(), left.element()] {
            wrapper
                .append_child(child)
                .map_err(|err| anyhow!("Could not fill canvas wrapper : {:#?}", err))?;
        }

        let surface = Surface {
            canvas,
            wrapper,
            left,
            right,
            renderer,
            width: Cell::new(options.w),
            height: Cell::new(options.h),
            theme: Cell::new(Theme::Theme1),
        };

        // borders depend on the theme, apply it before measuring
        surface.select_theme1()?;
        surface.resize_width(options.w)?;
        surface.resize_height(options.h)?;

        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn wrapper(&self) -> &HtmlElement {
        &self.wrapper
    }

    pub fn width(&self) -> i32 {
        self.width.get()
    }

    pub fn height(&self) -> i32 {
        self.height.get()
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn resize_width(&self, width: i32) -> Result<()> {
        let borders = self.borders("border-left-width", "border-right-width")?;
        browser::set_style(&self.canvas, "width", &px(borders.content(width)))?;
        browser::set_style(&self.wrapper, "width", &px(width))?;
        self.width.set(width);
        Ok(())
    }

    pub fn resize_height(&self, height: i32) -> Result<()> {
        let borders = self.borders("border-top-width", "border-bottom-width")?;
        browser::set_style(&self.canvas, "height", &px(borders.content(height)))?;
        browser::set_style(&self.wrapper, "height", &px(height))?;
        self.height.set(height);
        Ok(())
    }

    pub fn select_theme1(&self) -> Result<()> {
        self.canvas
            .class_list()
            .add_1(Theme::Theme1.class_name())
            .map_err(|err| anyhow!("Could not apply theme : {:#?}", err))?;
        self.theme.set(Theme::Theme1);
        Ok(())
    }

    pub fn panel(&self, side: PanelSide) -> &Panel {
        match side {
            PanelSide::Left => &self.left,
            PanelSide::Right => &self.right,
        }
    }

    pub fn show_panel(&self, side: &str) -> Result<()> {
        self.with_panel(side, Panel::show)
    }

    pub fn hide_panel(&self, side: &str) -> Result<()> {
        self.with_panel(side, Panel::hide)
    }

    pub fn open_panel(&self, side: &str) -> Result<()> {
        self.with_panel(side, Panel::open)
    }

    pub fn close_panel(&self, side: &str) -> Result<()> {
        self.with_panel(side, Panel::close)
    }

    /// Clears the canvas and draws `sprite`, once it has loaded
    pub fn present(&self, sprite: &Sprite) -> Result<()> {
        if !sprite.is_loaded() {
            return Ok(());
        }
        self.renderer.clear_all();
        sprite.draw(&self.renderer)
    }

    /// Presents `sprite` on every display refresh until the handle is stopped
    pub fn start_rendering(self: &Rc<Self>, sprite: Rc<Sprite>) -> Result<LoopHandle> {
        let surface = Rc::clone(self);
        AnimationLoop::start(move |_| {
            if let Err(err) = surface.present(&sprite) {
                warn!("{:#}", err);
            }
        })
        .context("Failed to start rendering")
    }

    // unknown sides are ignored
    fn with_panel(&self, side: &str, action: impl FnOnce(&Panel) -> Result<()>) -> Result<()> {
        match PanelSide::parse(side) {
            Some(side) => action(self.panel(side)),
            None => Ok(()),
        }
    }

    // re-read on every call, the theme may have changed them
    fn borders(&self, start: &str, end: &str) -> Result<Borders> {
        let style = browser::computed_style(&self.canvas)?;
        let read = |property: &str| {
            style
                .get_property_value(property)
                .map_err(|err| anyhow!("Could not read {} : {:#?}", property, err))
        };
        Ok(Borders::from_css(&read(start)?, &read(end)?))
    }
}
