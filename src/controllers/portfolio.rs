use log::{debug, warn};
use std::sync::Arc;

use super::{Ctx, Task};
use crate::dom::{Document, NodeId};
use crate::models::catalog::Catalog;
use crate::models::project::{Project, ProjectCategory};
use crate::scheduler::TimerId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(ProjectCategory),
    /// A `data-filter` value naming no category. Matches nothing.
    Unknown(String),
}

impl Filter {
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            return Filter::All;
        }
        match ProjectCategory::parse(value) {
            Some(c) => Filter::Category(c),
            None => Filter::Unknown(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Category(c) => c.as_str(),
            Filter::Unknown(v) => v,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => project.category == *c,
            Filter::Unknown(_) => false,
        }
    }
}

/// Projects shown for `filter`, in catalog order.
pub fn select<'a>(catalog: &'a Catalog, filter: &Filter) -> Vec<&'a Project> {
    catalog
        .projects()
        .iter()
        .filter(|p| filter.matches(p))
        .collect()
}

/// Project grid with category filter buttons.
#[derive(Debug)]
pub struct PortfolioRenderer {
    catalog: Arc<Catalog>,
    grid: Option<NodeId>,
    buttons: Vec<NodeId>,
    filter: Filter,
    pending: Vec<TimerId>,
}

impl PortfolioRenderer {
    /// Paints the full catalog. Without `#portfolio-grid` nothing is rendered
    /// and filter buttons are left unbound.
    pub fn init(catalog: Arc<Catalog>, ctx: &mut Ctx) -> Self {
        let grid = ctx.doc.get_by_id("portfolio-grid");
        let buttons = if grid.is_some() {
            ctx.doc.by_class("filter-btn")
        } else {
            Vec::new()
        };
        let mut renderer = PortfolioRenderer {
            catalog,
            grid,
            buttons,
            filter: Filter::All,
            pending: Vec::new(),
        };
        renderer.render(Filter::All, ctx);
        renderer
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Replace the grid's contents with the cards matching `filter`.
    /// Reveals still queued from the previous render are cancelled.
    pub fn render(&mut self, filter: Filter, ctx: &mut Ctx) -> usize {
        let Some(grid) = self.grid else {
            return 0;
        };
        for id in self.pending.drain(..) {
            ctx.timers.cancel(id);
        }
        if let Filter::Unknown(v) = &filter {
            warn!("Unknown portfolio filter '{}', grid will be empty", v);
        }

        ctx.doc.clear_children(grid);
        let stagger = ctx.config.timing.project_stagger_ms;
        let projects = select(&self.catalog, &filter);
        for (index, project) in projects.iter().enumerate() {
            let card = build_card(ctx.doc, project);
            ctx.doc.append(grid, card);
            let timer = ctx
                .timers
                .schedule((index as u64).saturating_mul(stagger), Task::RevealCard(card));
            self.pending.push(timer);
        }
        debug!("Rendered {} projects for filter '{}'", projects.len(), filter.as_str());
        let count = projects.len();
        self.filter = filter;
        count
    }

    pub fn handle_click(&mut self, node: NodeId, ctx: &mut Ctx) -> bool {
        if !self.buttons.contains(&node) {
            return false;
        }
        for &b in &self.buttons {
            ctx.doc.remove_class(b, "active");
        }
        ctx.doc.add_class(node, "active");
        let filter = Filter::parse(ctx.doc.get(node).attr("data-filter").unwrap_or(""));
        self.render(filter, ctx);
        true
    }

    /// Timer callback: fade a card in. Cards no longer on the page are skipped.
    pub fn reveal(&mut self, card: NodeId, doc: &mut Document) {
        if !doc.is_attached(card) {
            return;
        }
        doc.set_style(card, "opacity", "1");
        doc.set_style(card, "transform", "translateY(0)");
    }

    pub fn forget_timer(&mut self, id: TimerId) {
        self.pending.retain(|&t| t != id);
    }
}

fn build_card(doc: &mut Document, project: &Project) -> NodeId {
    let card = doc.create("div");
    doc.add_class(card, "portfolio__item");
    doc.set_attr(card, "data-category", project.category.as_str());
    doc.set_style(card, "opacity", "0");
    doc.set_style(card, "transform", "translateY(20px)");
    doc.set_style(card, "transition", "all 0.5s ease");

    let image = doc.append_new(card, "div", "portfolio__image");
    doc.append_text(image, "span", "", "Project Image");
    let overlay = doc.append_new(image, "div", "portfolio__overlay");
    doc.append_text(overlay, "button", "btn btn--primary btn--sm", "View Project");
    doc.append_text(overlay, "button", "btn btn--outline btn--sm", "View Code");

    let content = doc.append_new(card, "div", "portfolio__content");
    doc.append_text(content, "h3", "portfolio__title", &project.title);
    doc.append_text(content, "p", "portfolio__description", &project.description);
    let tech = doc.append_new(content, "div", "portfolio__tech");
    for t in &project.technologies {
        doc.append_text(tech, "span", "tech-tag", t);
    }
    card
}
