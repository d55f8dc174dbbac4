//! The page: document, clock, viewport and every controller, wired together
//! once the document is ready. Host input (clicks, submits, scrolling,
//! time passing) comes in through the methods here.

use log::{debug, info};
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::controllers::contact::{self, ContactFormController, FormState, StatusKind};
use crate::controllers::fade_in::FadeInController;
use crate::controllers::header::HeaderEffects;
use crate::controllers::navigation::{NavClick, NavigationController, ScrollTo};
use crate::controllers::portfolio::{Filter, PortfolioRenderer};
use crate::controllers::skills::SkillsRenderer;
use crate::controllers::theme::{Theme, ThemeController};
use crate::controllers::{AnimationState, Ctx, Task, Timers, Watch, Watcher};
use crate::dom::{Document, NodeId};
use crate::models::catalog::Catalog;
use crate::scheduler::TimerId;
use crate::viewport::Viewport;

struct Controllers {
    theme: ThemeController,
    nav: NavigationController,
    portfolio: PortfolioRenderer,
    skills: SkillsRenderer,
    contact: ContactFormController,
    fade_in: FadeInController,
    header: HeaderEffects,
}

pub struct Page {
    doc: Document,
    timers: Timers,
    watcher: Watcher,
    viewport: Viewport,
    config: SiteConfig,
    last_scroll: Option<ScrollTo>,
    controllers: Controllers,
}

impl Page {
    /// Initialize every controller against `doc`, then deliver the
    /// initial viewport intersections.
    pub fn ready(mut doc: Document, catalog: Arc<Catalog>, config: SiteConfig) -> Self {
        let mut timers = Timers::new();
        let mut watcher = Watcher::new();
        let controllers = {
            let mut ctx = Ctx {
                doc: &mut doc,
                timers: &mut timers,
                watcher: &mut watcher,
                config: &config,
            };
            Controllers {
                theme: ThemeController::init(ctx.doc),
                nav: NavigationController::init(ctx.doc),
                portfolio: PortfolioRenderer::init(Arc::clone(&catalog), &mut ctx),
                skills: SkillsRenderer::init(catalog, &mut ctx),
                contact: ContactFormController::init(ctx.doc),
                fade_in: FadeInController::init(&mut ctx),
                header: HeaderEffects::init(&mut ctx),
            }
        };
        let viewport = Viewport::new(config.viewport_height);
        let mut page = Page {
            doc,
            timers,
            watcher,
            viewport,
            config,
            last_scroll: None,
            controllers,
        };
        info!(
            "Page ready: {} observed elements, {} timers queued",
            page.watcher.len(),
            page.timers.pending()
        );
        page.refresh_viewport();
        page
    }

    fn parts(&mut self) -> (Ctx<'_>, &mut Controllers) {
        (
            Ctx {
                doc: &mut self.doc,
                timers: &mut self.timers,
                watcher: &mut self.watcher,
                config: &self.config,
            },
            &mut self.controllers,
        )
    }

    // ── Input ─────────────────────────────────────────────

    /// Click on `target`, bubbling through its ancestors.
    /// Returns whether default navigation was prevented.
    pub fn click(&mut self, target: NodeId) -> bool {
        let mut prevented = false;
        let mut scroll = None;
        for node in self.doc.ancestors(target) {
            let (mut ctx, c) = self.parts();
            c.theme.handle_click(node, ctx.doc);
            if let Some(NavClick::FollowLink(to)) = c.nav.handle_click(node, ctx.doc, &ctx.config.nav) {
                prevented = true;
                scroll = scroll.or(to);
            }
            c.portfolio.handle_click(node, &mut ctx);
        }
        if let Some(to) = scroll {
            self.last_scroll = Some(to);
            self.scroll_to(to.top);
        }
        prevented
    }

    /// Submit `form`. Returns whether default submission was prevented.
    pub fn submit(&mut self, form: NodeId) -> bool {
        let (mut ctx, c) = self.parts();
        c.contact.handle_submit(form, &mut ctx)
    }

    /// Submit the contact form; false when the page has none.
    pub fn submit_contact(&mut self) -> bool {
        match self.controllers.contact.form() {
            Some(form) => self.submit(form),
            None => false,
        }
    }

    /// Type into a contact form field.
    pub fn fill(&mut self, field: &str, value: &str) -> bool {
        match self.controllers.contact.form() {
            Some(form) => contact::fill_field(&mut self.doc, form, field, value),
            None => false,
        }
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.viewport.scroll_y = y.max(0.0);
        let scroll_y = self.viewport.scroll_y;
        let (mut ctx, c) = self.parts();
        c.nav.on_scroll(scroll_y, &mut ctx);
        c.header.on_scroll(scroll_y, ctx.doc, &ctx.config.nav);
        self.refresh_viewport();
    }

    pub fn resize(&mut self, height: f64) {
        self.viewport.height = height;
        self.refresh_viewport();
    }

    /// Let `ms` milliseconds pass, running due timers in order. Timers
    /// queued by a callback run too if they fall inside the window.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now().saturating_add(ms);
        while let Some((id, task)) = self.timers.pop_due(until) {
            self.run(id, task);
        }
        self.timers.set_now(until);
    }

    /// Run the clock until nothing is queued.
    pub fn settle(&mut self) {
        while let Some(due) = self.timers.next_deadline() {
            let now = self.timers.now();
            self.advance(due.saturating_sub(now));
        }
    }

    /// Cancel everything still queued. Returns how many timers were dropped.
    pub fn teardown(&mut self) -> usize {
        let n = self.timers.cancel_all();
        debug!("Teardown dropped {} timers", n);
        n
    }

    fn run(&mut self, id: TimerId, task: Task) {
        let scroll_y = self.viewport.scroll_y;
        let (mut ctx, c) = self.parts();
        match task {
            Task::RevealCard(card) => {
                c.portfolio.forget_timer(id);
                c.portfolio.reveal(card, ctx.doc);
            }
            Task::FillSkillBar(bar) => c.skills.fill_bar(bar, ctx.doc),
            Task::FinishSubmission => c.contact.finish_submission(&mut ctx),
            Task::ClearSubmissionStatus => c.contact.clear_success(ctx.doc),
            Task::RevealBody => c.header.reveal_body(ctx.doc),
            Task::RefreshActiveNav => c.nav.refresh(scroll_y, ctx.doc, &ctx.config.nav),
        }
    }

    fn refresh_viewport(&mut self) {
        let transitions = self.watcher.poll(&self.doc, &self.viewport);
        for t in transitions.into_iter().filter(|t| t.entered) {
            let (mut ctx, c) = self.parts();
            match t.key {
                Watch::SkillsSection => {
                    c.skills.on_enter(&mut ctx);
                }
                Watch::FadeCandidate => {
                    c.fade_in.on_enter(t.node, ctx.doc);
                }
            }
        }
    }

    // ── Inspection ────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn last_scroll(&self) -> Option<ScrollTo> {
        self.last_scroll
    }

    pub fn theme(&self) -> Theme {
        self.controllers.theme.theme()
    }

    pub fn filter(&self) -> &Filter {
        self.controllers.portfolio.filter()
    }

    pub fn contact_state(&self) -> FormState {
        self.controllers.contact.state()
    }

    pub fn statuses(&self) -> Vec<(StatusKind, String)> {
        self.controllers.contact.statuses(&self.doc)
    }

    pub fn skills_state(&self) -> AnimationState {
        self.controllers.skills.state()
    }

    pub fn fade_state(&self, node: NodeId) -> Option<AnimationState> {
        self.controllers.fade_in.state(node)
    }

    /// `href` of the highlighted nav link.
    pub fn active_nav_href(&self) -> Option<&str> {
        let link = self.controllers.nav.active_link(&self.doc)?;
        self.doc.get(link).attr("href")
    }

    /// The filter button carrying `data-filter="value"`.
    pub fn filter_button(&self, value: &str) -> Option<NodeId> {
        self.doc
            .find(self.doc.root(), |el| el.has_class("filter-btn") && el.attr("data-filter") == Some(value))
    }
}
