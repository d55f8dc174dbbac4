use super::{Ctx, Task};
use crate::config::NavConfig;
use crate::dom::{Document, NodeId};

/// Header backdrop that deepens once the page is scrolled, and the
/// body fade-in right after load.
#[derive(Debug)]
pub struct HeaderEffects {
    header: Option<NodeId>,
}

impl HeaderEffects {
    pub fn init(ctx: &mut Ctx) -> Self {
        let body = ctx.doc.body();
        ctx.doc.set_style(body, "opacity", "0");
        ctx.timers
            .schedule(ctx.config.timing.body_reveal_ms, Task::RevealBody);
        HeaderEffects {
            header: ctx.doc.first_by_class("header"),
        }
    }

    pub fn on_scroll(&self, scroll_y: f64, doc: &mut Document, cfg: &NavConfig) {
        let Some(header) = self.header else {
            return;
        };
        let blur = if scroll_y > cfg.header_blur_after {
            "blur(20px)"
        } else {
            "blur(10px)"
        };
        doc.set_style(header, "background-color", "var(--color-surface)");
        doc.set_style(header, "backdrop-filter", blur);
    }

    pub fn reveal_body(&self, doc: &mut Document) {
        let body = doc.body();
        doc.set_style(body, "transition", "opacity 0.5s ease");
        doc.set_style(body, "opacity", "1");
    }
}
