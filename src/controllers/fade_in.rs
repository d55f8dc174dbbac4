use log::debug;
use std::collections::HashMap;

use super::{AnimationState, Ctx, Watch};
use crate::dom::{Document, NodeId};

/// Classes whose elements fade in on first sight.
pub const FADE_CANDIDATES: &[&str] = &["about__content", "section-header", "contact__content"];

/// One-shot fade-in for flagged elements as they scroll into view.
#[derive(Debug, Default)]
pub struct FadeInController {
    states: HashMap<NodeId, AnimationState>,
}

impl FadeInController {
    pub fn init(ctx: &mut Ctx) -> Self {
        let mut states = HashMap::new();
        for el in ctx.doc.by_any_class(FADE_CANDIDATES) {
            ctx.doc.set_style(el, "opacity", "0");
            ctx.doc.set_style(el, "transform", "translateY(30px)");
            ctx.doc.set_style(el, "transition", "all 0.8s ease");
            ctx.watcher
                .observe(el, ctx.config.observers.fade_in, Watch::FadeCandidate);
            states.insert(el, AnimationState::NotAnimated);
        }
        debug!("Watching {} fade-in candidates", states.len());
        FadeInController { states }
    }

    pub fn state(&self, node: NodeId) -> Option<AnimationState> {
        self.states.get(&node).copied()
    }

    /// Viewport callback. Returns whether the element was animated by this call.
    pub fn on_enter(&mut self, node: NodeId, doc: &mut Document) -> bool {
        let Some(state) = self.states.get_mut(&node) else {
            return false;
        };
        if !state.begin() {
            return false;
        }
        doc.set_style(node, "opacity", "1");
        doc.set_style(node, "transform", "translateY(0)");
        true
    }
}
