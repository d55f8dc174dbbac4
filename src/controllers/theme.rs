use log::debug;

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value of `data-color-scheme` on the document root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Icon for the action the toggle performs: moon switches to dark, sun to light.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "\u{1f319}",
            Theme::Dark => "\u{2600}\u{fe0f}",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Light/dark switch. Not persisted: every load starts light.
#[derive(Debug)]
pub struct ThemeController {
    theme: Theme,
    toggle: Option<NodeId>,
}

impl ThemeController {
    pub fn init(doc: &mut Document) -> Self {
        let ctl = ThemeController {
            theme: Theme::default(),
            toggle: doc.get_by_id("theme-toggle"),
        };
        ctl.apply(doc);
        ctl
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn handle_click(&mut self, node: NodeId, doc: &mut Document) -> bool {
        if self.toggle != Some(node) {
            return false;
        }
        self.toggle(doc);
        true
    }

    pub fn toggle(&mut self, doc: &mut Document) {
        self.theme = self.theme.toggled();
        debug!("Theme switched to {}", self.theme.as_str());
        self.apply(doc);
    }

    fn apply(&self, doc: &mut Document) {
        let root = doc.root();
        doc.set_attr(root, "data-color-scheme", self.theme.as_str());
        let icon = self
            .toggle
            .and_then(|t| doc.find(t, |el| el.has_class("theme-toggle__icon")));
        if let Some(icon) = icon {
            doc.set_text(icon, self.theme.icon());
        }
    }
}
