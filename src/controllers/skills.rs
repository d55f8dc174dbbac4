use log::debug;
use std::sync::Arc;

use super::{AnimationState, Ctx, Task, Watch};
use crate::dom::{Document, NodeId};
use crate::models::catalog::Catalog;
use crate::models::skill::{Skill, SkillCategory};

/// Skills split into the three page buckets, in bucket order.
pub fn partition(catalog: &Catalog) -> Vec<(SkillCategory, Vec<&Skill>)> {
    SkillCategory::ALL
        .into_iter()
        .map(|c| (c, catalog.skills_in(c)))
        .collect()
}

/// Skill bars grouped by category, filled once when `#skills` first scrolls into view.
#[derive(Debug)]
pub struct SkillsRenderer {
    catalog: Arc<Catalog>,
    state: AnimationState,
}

impl SkillsRenderer {
    pub fn init(catalog: Arc<Catalog>, ctx: &mut Ctx) -> Self {
        let renderer = SkillsRenderer {
            catalog,
            state: AnimationState::NotAnimated,
        };
        renderer.render(ctx.doc);
        if let Some(section) = ctx.doc.get_by_id("skills") {
            ctx.watcher
                .observe(section, ctx.config.observers.skills, Watch::SkillsSection);
        }
        renderer
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Fill each bucket's container, clearing it first. Missing containers are skipped.
    pub fn render(&self, doc: &mut Document) {
        for (category, skills) in partition(&self.catalog) {
            let Some(container) = doc.get_by_id(category.container_id()) else {
                continue;
            };
            doc.clear_children(container);
            for skill in &skills {
                build_skill(doc, container, skill);
            }
            debug!("Rendered {} {} skills", skills.len(), category.label());
        }
    }

    /// Viewport callback for `#skills`. Bars are staggered in document order;
    /// later entries are ignored.
    pub fn on_enter(&mut self, ctx: &mut Ctx) -> bool {
        if !self.state.begin() {
            return false;
        }
        let stagger = ctx.config.timing.skill_stagger_ms;
        let bars = ctx.doc.by_class("skill-progress");
        debug!("Animating {} skill bars", bars.len());
        for (index, bar) in bars.into_iter().enumerate() {
            ctx.timers
                .schedule((index as u64).saturating_mul(stagger), Task::FillSkillBar(bar));
        }
        true
    }

    /// Timer callback: widen a bar to its `data-level`.
    pub fn fill_bar(&self, bar: NodeId, doc: &mut Document) {
        let Some(level) = doc.get(bar).attr("data-level").map(|l| l.to_string()) else {
            return;
        };
        doc.set_style(bar, "width", &format!("{}%", level));
    }
}

fn build_skill(doc: &mut Document, container: NodeId, skill: &Skill) {
    let item = doc.append_new(container, "div", "skill-item");
    let header = doc.append_new(item, "div", "skill-header");
    doc.append_text(header, "span", "skill-name", &skill.name);
    doc.append_text(header, "span", "skill-level", &format!("{}%", skill.level));
    let bar = doc.append_new(item, "div", "skill-bar");
    let progress = doc.append_new(bar, "div", "skill-progress");
    doc.set_attr(progress, "data-level", &skill.level.to_string());
}
