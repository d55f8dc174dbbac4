use log::debug;

use super::{Ctx, Task};
use crate::config::NavConfig;
use crate::dom::{Document, NodeId};
use crate::scheduler::TimerId;

/// A scroll the page should perform on behalf of a nav link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTo {
    pub top: f64,
    pub smooth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavClick {
    MenuToggled,
    /// Default navigation was prevented; scroll if the link had a target.
    FollowLink(Option<ScrollTo>),
}

#[derive(Debug)]
pub struct NavigationController {
    toggle: Option<NodeId>,
    menu: Option<NodeId>,
    header: Option<NodeId>,
    links: Vec<NodeId>,
    sections: Vec<NodeId>,
    throttle: Option<TimerId>,
}

impl NavigationController {
    pub fn init(doc: &Document) -> Self {
        let toggle = doc.get_by_id("nav-toggle");
        let menu = doc.get_by_id("nav-menu");
        let sections = doc.find_all(doc.root(), |el| el.tag() == "section" && el.id().is_some());
        NavigationController {
            // the hamburger only works when both halves exist
            toggle: toggle.filter(|_| menu.is_some()),
            menu,
            header: doc.first_by_class("header"),
            links: doc.by_class("nav__link"),
            sections,
            throttle: None,
        }
    }

    pub fn handle_click(&mut self, node: NodeId, doc: &mut Document, cfg: &NavConfig) -> Option<NavClick> {
        if self.toggle == Some(node) {
            self.toggle_mobile_menu(doc);
            return Some(NavClick::MenuToggled);
        }
        if self.links.contains(&node) {
            return Some(NavClick::FollowLink(self.follow_link(node, doc, cfg)));
        }
        None
    }

    pub fn toggle_mobile_menu(&self, doc: &mut Document) {
        if let Some(menu) = self.menu {
            let open = doc.toggle_class(menu, "show");
            debug!("Mobile menu {}", if open { "opened" } else { "closed" });
        }
    }

    fn follow_link(&self, link: NodeId, doc: &mut Document, cfg: &NavConfig) -> Option<ScrollTo> {
        let href = doc.get(link).attr("href")?.to_string();
        let id = href.strip_prefix('#')?;
        let target = doc.get_by_id(id)?;
        let header_height = match self.header {
            Some(h) => doc.get(h).layout().map(|b| b.height).unwrap_or(0.0),
            None => cfg.default_header_height,
        };
        let target_top = doc.get(target).layout().map(|b| b.top).unwrap_or(0.0);
        if let Some(menu) = self.menu {
            doc.remove_class(menu, "show");
        }
        debug!("Scrolling to {}", href);
        Some(ScrollTo {
            top: (target_top - header_height).max(0.0),
            smooth: true,
        })
    }

    /// Scroll hook. Recomputes immediately unless throttling is configured,
    /// in which case one trailing refresh per window is queued.
    pub fn on_scroll(&mut self, scroll_y: f64, ctx: &mut Ctx) {
        let window = ctx.config.nav.scroll_throttle_ms;
        if window == 0 {
            self.update_active(scroll_y, ctx.doc, &ctx.config.nav);
            return;
        }
        if self.throttle.map(|t| ctx.timers.is_pending(t)).unwrap_or(false) {
            return;
        }
        self.throttle = Some(ctx.timers.schedule(window, Task::RefreshActiveNav));
    }

    pub fn refresh(&mut self, scroll_y: f64, doc: &mut Document, cfg: &NavConfig) {
        self.throttle = None;
        self.update_active(scroll_y, doc, cfg);
    }

    /// Mark the link of every section containing `scrollY + offset`; with
    /// non-overlapping sections that is at most one. No match leaves links as they are.
    pub fn update_active(&self, scroll_y: f64, doc: &mut Document, cfg: &NavConfig) {
        let position = scroll_y + cfg.scroll_offset;
        for &section in &self.sections {
            let (Some(layout), Some(id)) = (doc.get(section).layout(), doc.get(section).id()) else {
                continue;
            };
            if position >= layout.top && position < layout.bottom() {
                let href = format!("#{}", id);
                for &link in &self.links {
                    doc.remove_class(link, "active");
                    if doc.get(link).attr("href") == Some(href.as_str()) {
                        doc.add_class(link, "active");
                    }
                }
            }
        }
    }

    pub fn active_link(&self, doc: &Document) -> Option<NodeId> {
        self.links
            .iter()
            .copied()
            .find(|&l| doc.get(l).has_class("active"))
    }
}
