//! One-time scan of the document for declared surfaces and sprites.
//!
//! Every problem found is a shape problem of the markup. It is reported as
//! a console warning, recorded on the [`Page`], and the offending element
//! is skipped. The scan itself never stops early.

use crate::browser::{self, html};
use crate::engine::{AssetError, LoopHandle};
use crate::sprite::{Sprite, SpriteParams};
use crate::surface::{PanelSide, Surface, SurfaceOptions};
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlImageElement};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScanWarning {
    #[error("\"canvas2d\" attribute for canvas cannot be empty.")]
    EmptySurfaceName,
    #[error("Canvas with attribute \"canvas2d\" equal to {0} already defined. Only the first one defined will be considered.")]
    DuplicateSurface(String),
    #[error("\"canvas\" attribute for image {0} not defined or empty.")]
    MissingTarget(String),
    #[error("Canvas with name \"{name}\" does not exist (image: {image}).")]
    UnknownSurface { name: String, image: String },
    #[error("Canvas \"{name}\" could not be set up : {reason}")]
    SurfaceSetup { name: String, reason: String },
    #[error("Sprite {image} could not be set up : {reason}")]
    SpriteSetup { image: String, reason: String },
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Name keyed store, first registration wins
///
/// Names are compared as-is, no case folding.
#[derive(Debug)]
pub struct Registry<T> {
    entries: HashMap<String, T>,
    // registration order, for listing
    order: Vec<String>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> Registry<T> {
    /// Checks that `name` could be registered, without registering it
    pub fn check_available(&self, name: &str) -> Result<(), ScanWarning> {
        if name.is_empty() {
            Err(ScanWarning::EmptySurfaceName)
        } else if self.entries.contains_key(name) {
            Err(ScanWarning::DuplicateSurface(name.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn register(&mut self, name: &str, value: T) -> Result<&T, ScanWarning> {
        self.check_available(name)?;
        self.order.push(name.to_string());
        Ok(&*self.entries.entry(name.to_string()).or_insert(value))
    }

    /// Looks up the surface a sprite declared as its target
    pub fn resolve(&self, target: Option<&str>, image: &str) -> Result<&T, ScanWarning> {
        match target {
            None | Some("") => Err(ScanWarning::MissingTarget(image.to_string())),
            Some(name) => self.get(name).ok_or_else(|| ScanWarning::UnknownSurface {
                name: name.to_string(),
                image: image.to_string(),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A sprite attached to a surface by the scan, with its render loop
pub struct Binding {
    pub surface: String,
    pub sprite: Rc<Sprite>,
    pub handle: LoopHandle,
}

/// Everything the scan built
#[derive(Default)]
pub struct Page {
    surfaces: Registry<Rc<Surface>>,
    bindings: Vec<Binding>,
    warnings: Rc<RefCell<Vec<ScanWarning>>>,
}

impl Page {
    /// Scans `document` once: surfaces first, then the sprites targeting them
    pub fn scan(document: &Document) -> Result<Page> {
        let mut page = Page::default();
        for element in browser::query_all(document, html::SURFACE_SELECTOR)? {
            page.declare_surface(element);
        }
        for element in browser::query_all(document, html::SPRITE_SELECTOR)? {
            page.declare_sprite(element);
        }
        Ok(page)
    }

    pub fn surfaces(&self) -> &Registry<Rc<Surface>> {
        &self.surfaces
    }

    pub fn surface(&self, name: &str) -> Option<Rc<Surface>> {
        self.surfaces.get(name).cloned()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Warnings so far, including image failures reported after the scan
    pub fn warnings(&self) -> Vec<ScanWarning> {
        self.warnings.borrow().clone()
    }

    /// Stops every render loop the scan started
    pub fn stop(&self) {
        for binding in &self.bindings {
            binding.handle.stop();
        }
    }

    fn declare_surface(&mut self, element: Element) {
        let name = element.get_attribute(html::SURFACE_NAME).unwrap_or_default();
        if let Err(warning) = self.surfaces.check_available(&name) {
            self.warn(warning);
            return;
        }

        let open_left = element.has_attribute(html::OPEN_LEFT);
        let open_right = element.has_attribute(html::OPEN_RIGHT);
        let built = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|element| anyhow!("{:#?} is not a canvas", element))
            .and_then(|canvas| Surface::new(canvas, SurfaceOptions::default()))
            .and_then(|surface| {
                if open_right {
                    open_on_start(&surface, PanelSide::Right)?;
                }
                if open_left {
                    open_on_start(&surface, PanelSide::Left)?;
                }
                Ok(surface)
            });

        match built {
            Ok(surface) => {
                let registered = self.surfaces.register(&name, Rc::new(surface)).map(|_| ());
                if let Err(warning) = registered {
                    self.warn(warning);
                }
            }
            Err(err) => self.warn(ScanWarning::SurfaceSetup {
                name,
                reason: format!("{:#}", err),
            }),
        }
    }

    fn declare_sprite(&mut self, element: Element) {
        let image = match element.dyn_into::<HtmlImageElement>() {
            Ok(image) => image,
            Err(_) => return,
        };
        let source = image.src();
        let target = image.get_attribute(html::SPRITE_TARGET);
        let surface = match self.surfaces.resolve(target.as_deref(), &source) {
            Ok(surface) => Rc::clone(surface),
            Err(warning) => {
                self.warn(warning);
                return;
            }
        };

        let attribute = |name: &str| image.get_attribute(name);
        let params = SpriteParams::from_attributes(
            attribute(html::X_FRAMES).as_deref(),
            attribute(html::Y_FRAMES).as_deref(),
            attribute(html::X_POS).as_deref(),
            attribute(html::Y_POS).as_deref(),
            attribute(html::SCALE).as_deref(),
        );

        let bound = Sprite::new(&source, params).map(Rc::new).and_then(|sprite| {
            let handle = surface.start_rendering(Rc::clone(&sprite))?;
            Ok((sprite, handle))
        });
        match bound {
            Ok((sprite, handle)) => {
                self.report_load_failure(&sprite);
                self.bindings.push(Binding {
                    surface: target.unwrap_or_default(),
                    sprite,
                    handle,
                });
            }
            Err(err) => self.warn(ScanWarning::SpriteSetup {
                image: source,
                reason: format!("{:#}", err),
            }),
        }
    }

    fn report_load_failure(&self, sprite: &Sprite) {
        let ready = sprite.ready();
        let warnings = Rc::clone(&self.warnings);
        browser::spawn_local(async move {
            if let Err(err) = ready.await {
                let warning = ScanWarning::from(err);
                warn!("{}", warning);
                warnings.borrow_mut().push(warning);
            }
        });
    }

    fn warn(&self, warning: ScanWarning) {
        warn!("{}", warning);
        self.warnings.borrow_mut().push(warning);
    }
}

fn open_on_start(surface: &Surface, side: PanelSide) -> Result<()> {
    let panel = surface.panel(side);
    panel.show()?;
    panel.open()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_wins() {
        let mut registry = Registry::default();
        assert_eq!(registry.register("stage", 1).copied(), Ok(1));
        assert_eq!(
            registry.register("stage", 2).copied(),
            Err(ScanWarning::DuplicateSurface("stage".into()))
        );
        assert_eq!(registry.get("stage"), Some(&1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut registry = Registry::default();
        assert_eq!(
            registry.register("", 1).copied(),
            Err(ScanWarning::EmptySurfaceName)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut registry = Registry::default();
        registry.register("Stage", 1).unwrap();
        registry.register("stage", 2).unwrap();
        assert_eq!(registry.get("Stage"), Some(&1));
        assert_eq!(registry.get("stage"), Some(&2));
        assert_eq!(registry.get("STAGE"), None);
    }

    #[test]
    fn names_list_in_registration_order() {
        let mut registry = Registry::default();
        for name in ["b", "a", "c"] {
            registry.register(name, ()).unwrap();
        }
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn check_available_does_not_register() {
        let registry: Registry<u8> = Registry::default();
        assert_eq!(registry.check_available("stage"), Ok(()));
        assert!(registry.get("stage").is_none());
    }

    #[test]
    fn missing_or_empty_target_is_rejected() {
        let registry: Registry<u8> = Registry::default();
        for target in [None, Some("")] {
            assert_eq!(
                registry.resolve(target, "hero.png"),
                Err(ScanWarning::MissingTarget("hero.png".into()))
            );
        }
    }

    #[test]
    fn unknown_target_is_rejected() {
        let mut registry = Registry::default();
        registry.register("stage", 1).unwrap();
        assert_eq!(
            registry.resolve(Some("backstage"), "hero.png"),
            Err(ScanWarning::UnknownSurface {
                name: "backstage".into(),
                image: "hero.png".into()
            })
        );
        assert_eq!(registry.resolve(Some("stage"), "hero.png"), Ok(&1));
    }

    #[test]
    fn warnings_read_like_console_messages() {
        assert_eq!(
            ScanWarning::EmptySurfaceName.to_string(),
            "\"canvas2d\" attribute for canvas cannot be empty."
        );
        assert_eq!(
            ScanWarning::UnknownSurface {
                name: "stage".into(),
                image: "hero.png".into()
            }
            .to_string(),
            "Canvas with name \"stage\" does not exist (image: hero.png)."
        );
    }
}
