//! In-memory rendering surface.
//!
//! A small element arena standing in for the browser DOM: ids, classes,
//! attributes, inline style, text and children, plus an optional layout box
//! supplied by whoever hosts the page (there is no layout engine here).
//! Removing a node frees its whole subtree for reuse. Ids carry a
//! generation, so a stale [`NodeId`] never aliases the element that later
//! takes its slot: [`Document::is_attached`] reports it as gone.

use std::collections::BTreeMap;

use crate::render::html_escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Vertical position and size of an element, in CSS pixels from the top of the document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(top: f64, height: f64) -> Self {
        LayoutBox { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    layout: Option<LayoutBox>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            layout: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn style(&self, prop: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == prop)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn layout(&self) -> Option<LayoutBox> {
        self.layout
    }
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    generations: Vec<u32>,
    free: Vec<usize>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        let mut doc = Document {
            nodes: vec![Element::new("html")],
            generations: vec![0],
            free: Vec::new(),
            root,
            head: root,
            body: root,
        };
        doc.head = doc.append_new(doc.root, "head", "");
        doc.body = doc.append_new(doc.root, "body", "");
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The element in `node`'s slot. For a freed id that is a blank
    /// placeholder or whatever element reused the slot; check
    /// [`Document::is_live`] first when the id may be stale.
    pub fn get(&self, node: NodeId) -> &Element {
        &self.nodes[node.index]
    }

    fn get_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.index]
    }

    /// Whether `node` still names the element it was created for.
    pub fn is_live(&self, node: NodeId) -> bool {
        self.generations.get(node.index) == Some(&node.generation)
    }

    /// Slots in the arena, live or free.
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    // ── Tree construction ─────────────────────────────────

    /// Create a detached element.
    pub fn create(&mut self, tag: &str) -> NodeId {
        if let Some(index) = self.free.pop() {
            self.nodes[index] = Element::new(tag);
            return NodeId {
                index,
                generation: self.generations[index],
            };
        }
        self.nodes.push(Element::new(tag));
        self.generations.push(0);
        NodeId {
            index: self.nodes.len() - 1,
            generation: 0,
        }
    }

    /// Create an element with the given space-separated classes and append it to `parent`.
    pub fn append_new(&mut self, parent: NodeId, tag: &str, classes: &str) -> NodeId {
        let node = self.create(tag);
        for class in classes.split_whitespace() {
            self.add_class(node, class);
        }
        self.append(parent, node);
        node
    }

    /// Same as [`Document::append_new`] with text content.
    pub fn append_text(&mut self, parent: NodeId, tag: &str, classes: &str, text: &str) -> NodeId {
        let node = self.append_new(parent, tag, classes);
        self.set_text(node, text);
        node
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
    }

    /// Insert `child` into `parent` right before `reference`; appends when
    /// `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        self.get_mut(child).parent = Some(parent);
        let siblings = &mut self.get_mut(parent).children;
        match siblings.iter().position(|&c| c == reference) {
            Some(i) => siblings.insert(i, child),
            None => siblings.push(child),
        }
    }

    /// Detach `node` and free it along with its descendants.
    pub fn remove(&mut self, node: NodeId) {
        if !self.is_live(node) || node == self.root {
            return;
        }
        self.detach(node);
        self.release(node);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.get_mut(node).parent.take() {
            self.get_mut(parent).children.retain(|&c| c != node);
        }
    }

    /// Drop the text and free every child subtree.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.get_mut(node).children);
        for child in children {
            self.get_mut(child).parent = None;
            self.release(child);
        }
        self.get_mut(node).text = None;
    }

    fn release(&mut self, node: NodeId) {
        for n in self.descendants(node) {
            self.nodes[n.index] = Element::new("");
            self.generations[n.index] = self.generations[n.index].wrapping_add(1);
            self.free.push(n.index);
        }
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.is_live(node) && self.ancestors(node).last() == Some(&self.root)
    }

    /// `node` followed by each of its ancestors, innermost first.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.get(current).parent {
            path.push(parent);
            current = parent;
        }
        path
    }

    // ── Queries (document order) ──────────────────────────

    /// `node` and its descendants, pre-order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.get(n).children.iter().rev().copied());
        }
        out
    }

    pub fn find_all<F>(&self, scope: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| pred(self.get(n)))
            .collect()
    }

    pub fn find<F>(&self, scope: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .find(|&n| pred(self.get(n)))
    }

    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.find(self.root, |el| el.id() == Some(id))
    }

    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.find_all(self.root, |el| el.has_class(class))
    }

    /// Elements carrying any of `classes`, each once, in document order.
    pub fn by_any_class(&self, classes: &[&str]) -> Vec<NodeId> {
        self.find_all(self.root, |el| classes.iter().any(|c| el.has_class(c)))
    }

    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.find(self.root, |el| el.has_class(class))
    }

    // ── Mutation ──────────────────────────────────────────

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let el = self.get_mut(node);
        if !el.has_class(class) {
            el.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.get_mut(node).classes.retain(|c| c != class);
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.get(node).has_class(class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.get_mut(node)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        self.get_mut(node).attrs.remove(name);
    }

    pub fn set_style(&mut self, node: NodeId, prop: &str, value: &str) {
        let style = &mut self.get_mut(node).style;
        match style.iter_mut().find(|(k, _)| k == prop) {
            Some(entry) => entry.1 = value.to_string(),
            None => style.push((prop.to_string(), value.to_string())),
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.get_mut(node).text = Some(text.to_string());
    }

    pub fn set_layout(&mut self, node: NodeId, layout: LayoutBox) {
        self.get_mut(node).layout = Some(layout);
    }

    // ── Serialization ─────────────────────────────────────

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(self.root, &mut out);
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let el = self.get(node);
        out.push('<');
        out.push_str(&el.tag);
        if let Some(id) = el.id() {
            out.push_str(&format!(" id=\"{}\"", html_escape(id)));
        }
        if !el.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", html_escape(&el.classes.join(" "))));
        }
        for (k, v) in el.attrs.iter().filter(|(k, _)| k.as_str() != "id") {
            out.push_str(&format!(" {}=\"{}\"", k, html_escape(v)));
        }
        if !el.style.is_empty() {
            let css = el
                .style
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(&format!(" style=\"{}\"", html_escape(&css)));
        }
        out.push('>');
        if VOID_TAGS.contains(&el.tag.as_str()) {
            return;
        }
        if let Some(text) = &el.text {
            out.push_str(&html_escape(text));
        }
        for &child in &el.children {
            self.write_html(child, out);
        }
        out.push_str(&format!("</{}>", el.tag));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_by_id_and_class_in_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_new(body, "div", "card x");
        let b = doc.append_new(a, "span", "x");
        let c = doc.append_new(body, "div", "card");
        doc.set_attr(c, "id", "third");
        assert_eq!(doc.by_class("x"), vec![a, b]);
        assert_eq!(doc.by_any_class(&["card", "x"]), vec![a, b, c]);
        assert_eq!(doc.get_by_id("third"), Some(c));
        assert_eq!(doc.get_by_id("nope"), None);
    }

    #[test]
    fn removed_nodes_are_detached_and_unreachable() {
        let mut doc = Document::new();
        let body = doc.body();
        let grid = doc.append_new(body, "div", "");
        let card = doc.append_new(grid, "div", "card");
        assert!(doc.is_attached(card));
        doc.clear_children(grid);
        assert!(!doc.is_attached(card));
        assert!(!doc.is_live(card));
        assert!(doc.by_class("card").is_empty());
    }

    #[test]
    fn freed_slots_are_reused_without_aliasing() {
        let mut doc = Document::new();
        let body = doc.body();
        let grid = doc.append_new(body, "div", "");
        let card = doc.append_new(grid, "div", "card");
        doc.append_new(card, "h3", "");
        let before = doc.allocated();

        doc.clear_children(grid);
        let fresh = doc.append_new(grid, "div", "card");
        doc.append_new(fresh, "h3", "");
        assert_eq!(doc.allocated(), before);
        assert!(doc.is_attached(fresh));
        // the old id may share a slot with `fresh` but never resolves to it
        assert_ne!(card, fresh);
        assert!(!doc.is_attached(card));
    }

    #[test]
    fn remove_frees_the_subtree() {
        let mut doc = Document::new();
        let form = doc.append_new(doc.body(), "form", "");
        let before = doc.allocated();
        for _ in 0..50 {
            let status = doc.append_new(form, "div", "form-status");
            doc.append_new(status, "span", "");
            doc.remove(status);
        }
        assert_eq!(doc.allocated(), before + 2);
        assert!(doc.get(form).children().is_empty());
    }

    #[test]
    fn insert_before_places_ahead_of_reference() {
        let mut doc = Document::new();
        let body = doc.body();
        let form = doc.append_new(body, "form", "");
        let input = doc.append_new(form, "input", "");
        let button = doc.append_new(form, "button", "");
        let status = doc.create("div");
        doc.insert_before(form, status, button);
        assert_eq!(doc.get(form).children(), &[input, status, button]);
    }

    #[test]
    fn toggle_class_reports_state() {
        let mut doc = Document::new();
        let menu = doc.append_new(doc.body(), "ul", "nav__menu");
        assert!(doc.toggle_class(menu, "show"));
        assert!(doc.get(menu).has_class("show"));
        assert!(!doc.toggle_class(menu, "show"));
        assert!(!doc.get(menu).has_class("show"));
    }

    #[test]
    fn serializes_escaped_html_with_style() {
        let mut doc = Document::new();
        let p = doc.append_text(doc.body(), "p", "lead", "Tom & <Jerry>");
        doc.set_style(p, "opacity", "0");
        doc.set_style(p, "opacity", "1");
        doc.append_new(p, "br", "");
        assert_eq!(
            doc.outer_html(p),
            r#"<p class="lead" style="opacity: 1">Tom &amp; &lt;Jerry&gt;<br></p>"#
        );
    }
}
