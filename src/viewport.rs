//! Viewport intersection.
//!
//! Subscriptions are `observe(element, options, key)`; [`ViewportWatcher::poll`]
//! compares every observed element's layout box against the current viewport
//! and reports the elements whose intersecting state changed since the last
//! poll. Where scroll position comes from is the caller's business.

use serde::{Deserialize, Serialize};

use crate::dom::{Document, LayoutBox, NodeId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(height: f64) -> Self {
        Viewport {
            scroll_y: 0.0,
            height,
        }
    }
}

/// `threshold` is the visible fraction needed to count as intersecting;
/// `bottom_margin` grows (positive) or shrinks (negative) the viewport's bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub bottom_margin: f64,
}

impl ObserverOptions {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        ObserverOptions {
            threshold,
            bottom_margin,
        }
    }
}

/// Fraction of `target` visible inside the viewport adjusted by `options`.
pub fn intersection_ratio(target: LayoutBox, viewport: &Viewport, options: &ObserverOptions) -> f64 {
    let top = viewport.scroll_y;
    let bottom = viewport.scroll_y + viewport.height + options.bottom_margin;
    if bottom <= top {
        return 0.0;
    }
    if target.height <= 0.0 {
        return if target.top >= top && target.top <= bottom { 1.0 } else { 0.0 };
    }
    let overlap = bottom.min(target.bottom()) - top.max(target.top);
    (overlap / target.height).clamp(0.0, 1.0)
}

pub fn is_intersecting(target: LayoutBox, viewport: &Viewport, options: &ObserverOptions) -> bool {
    let ratio = intersection_ratio(target, viewport, options);
    ratio > 0.0 && ratio >= options.threshold
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition<K> {
    pub key: K,
    pub node: NodeId,
    pub entered: bool,
}

#[derive(Debug)]
struct Subscription<K> {
    node: NodeId,
    options: ObserverOptions,
    key: K,
    intersecting: bool,
}

#[derive(Debug)]
pub struct ViewportWatcher<K> {
    subs: Vec<Subscription<K>>,
}

impl<K> Default for ViewportWatcher<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ViewportWatcher<K> {
    pub fn new() -> Self {
        ViewportWatcher { subs: Vec::new() }
    }
}

impl<K: Clone> ViewportWatcher<K> {
    /// Start watching `node`. It counts as outside until the next poll says otherwise.
    pub fn observe(&mut self, node: NodeId, options: ObserverOptions, key: K) {
        self.subs.push(Subscription {
            node,
            options,
            key,
            intersecting: false,
        });
    }

    pub fn unobserve(&mut self, node: NodeId) {
        self.subs.retain(|s| s.node != node);
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Enter/leave transitions since the last poll, in subscription order.
    /// Detached elements and elements without a layout box are never intersecting.
    pub fn poll(&mut self, doc: &Document, viewport: &Viewport) -> Vec<Transition<K>> {
        let mut out = Vec::new();
        for sub in &mut self.subs {
            let now = doc.is_attached(sub.node)
                && doc
                    .get(sub.node)
                    .layout()
                    .map(|b| is_intersecting(b, viewport, &sub.options))
                    .unwrap_or(false);
            if now != sub.intersecting {
                sub.intersecting = now;
                out.push(Transition {
                    key: sub.key.clone(),
                    node: sub.node,
                    entered: now,
                });
            }
        }
        out
    }
}
