use crate::browser::{self, html};
use anyhow::{anyhow, Result};
use web_sys::HtmlElement;

/// Which toolbox a panel call addresses
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PanelSide {
    Left,
    Right,
}

impl PanelSide {
    /// Case-insensitive, anything but left/right is `None`
    pub fn parse(side: &str) -> Option<Self> {
        match side.to_ascii_lowercase().as_str() {
            "left" => Some(PanelSide::Left),
            "right" => Some(PanelSide::Right),
            _ => None,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            PanelSide::Left => html::LEFT_TOOLBOX_CLASS,
            PanelSide::Right => html::RIGHT_TOOLBOX_CLASS,
        }
    }
}

/// A side toolbox next to the canvas
pub struct Panel {
    element: HtmlElement,
}

impl Panel {
    pub fn new(side: PanelSide) -> Result<Self> {
        Ok(Panel {
            element: browser::create_element(html::DIV, side.class_name())?,
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn show(&self) -> Result<()> {
        browser::set_style(&self.element, "display", "inherit")
    }

    pub fn hide(&self) -> Result<()> {
        browser::set_style(&self.element, "display", "none")
    }

    pub fn open(&self) -> Result<()> {
        self.swap_state(html::CLOSE, html::OPEN)
    }

    pub fn close(&self) -> Result<()> {
        self.swap_state(html::OPEN, html::CLOSE)
    }

    // open and close never coexist
    fn swap_state(&self, from: &str, to: &str) -> Result<()> {
        let classes = self.element.class_list();
        classes
            .remove_1(from)
            .and_then(|_| classes.add_1(to))
            .map_err(|err| anyhow!("Could not set panel state '{}' : {:#?}", to, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_names_ignore_case() {
        for raw in ["left", "Left", "LEFT", "lEfT"] {
            assert_eq!(PanelSide::parse(raw), Some(PanelSide::Left));
        }
        for raw in ["right", "Right", "RIGHT"] {
            assert_eq!(PanelSide::parse(raw), Some(PanelSide::Right));
        }
    }

    #[test]
    fn unknown_sides_are_none() {
        for raw in ["", "top", " left", "rightt"] {
            assert_eq!(PanelSide::parse(raw), None);
        }
    }

    #[test]
    fn sides_map_to_toolbox_classes() {
        assert_eq!(PanelSide::Left.class_name(), "canvas-left-toolbox");
        assert_eq!(PanelSide::Right.class_name(), "canvas-right-toolbox");
    }
}
