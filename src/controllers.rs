//! Page controllers. Each one owns a disjoint region of the document and is
//! initialized independently once the document is ready.

pub mod contact;
pub mod fade_in;
pub mod header;
pub mod navigation;
pub mod portfolio;
pub mod skills;
pub mod theme;

use crate::config::SiteConfig;
use crate::dom::{Document, NodeId};
use crate::scheduler::Scheduler;
use crate::viewport::ViewportWatcher;

/// Deferred work queued on the page clock.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    RevealCard(NodeId),
    FillSkillBar(NodeId),
    FinishSubmission,
    ClearSubmissionStatus,
    RevealBody,
    RefreshActiveNav,
}

/// What an observed element is being watched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    SkillsSection,
    FadeCandidate,
}

pub type Timers = Scheduler<Task>;
pub type Watcher = ViewportWatcher<Watch>;

/// One-shot animation marker. Moves `NotAnimated -> Animated` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    NotAnimated,
    Animated,
}

impl AnimationState {
    /// Flip to `Animated`; true only for the call that did the flip.
    pub fn begin(&mut self) -> bool {
        match self {
            AnimationState::NotAnimated => {
                *self = AnimationState::Animated;
                true
            }
            AnimationState::Animated => false,
        }
    }
}

/// Everything a controller may touch while handling an event.
pub struct Ctx<'a> {
    pub doc: &'a mut Document,
    pub timers: &'a mut Timers,
    pub watcher: &'a mut Watcher,
    pub config: &'a SiteConfig,
}
