//! The static page markup the controllers attach to, and a simple stacked
//! layout for hosts that do not compute one.

use chrono::Datelike;

use crate::controllers::fade_in::FADE_CANDIDATES;
use crate::dom::{Document, LayoutBox, NodeId};
use crate::models::project::ProjectCategory;
use crate::models::skill::SkillCategory;

/// Section ids and their nav labels, top to bottom.
pub const SECTIONS: [(&str, &str); 5] = [
    ("home", "Home"),
    ("about", "About"),
    ("portfolio", "Portfolio"),
    ("skills", "Skills"),
    ("contact", "Contact"),
];

pub const HEADER_HEIGHT: f64 = 80.0;
pub const SECTION_HEIGHT: f64 = 800.0;

/// Build the full portfolio page: header with nav and theme toggle, one
/// section per entry in [`SECTIONS`], and a footer.
pub fn portfolio_document(site_name: &str) -> Document {
    let mut doc = Document::new();
    doc.append_text(doc.head(), "title", "", site_name);
    let body = doc.body();

    build_header(&mut doc, body, site_name);

    let main = doc.append_new(body, "main", "");
    let home = section(&mut doc, main, "home", "hero");
    let container = doc.append_new(home, "div", "container");
    doc.append_text(container, "h1", "hero__title", &format!("Hi, I'm {}", site_name));
    doc.append_text(
        container,
        "p",
        "hero__subtitle",
        "Developer and designer building clean, useful things.",
    );

    let about = section(&mut doc, main, "about", "about");
    let container = section_header(&mut doc, about, "About Me");
    let content = doc.append_new(container, "div", "about__content");
    doc.append_text(
        content,
        "p",
        "",
        "I design and build web and mobile products, from first sketch to production.",
    );

    let portfolio = section(&mut doc, main, "portfolio", "portfolio");
    let container = section_header(&mut doc, portfolio, "My Work");
    let filters = doc.append_new(container, "div", "portfolio__filters");
    let all = doc.append_text(filters, "button", "filter-btn active", "All");
    doc.set_attr(all, "data-filter", "all");
    for category in ProjectCategory::ALL {
        let b = doc.append_text(filters, "button", "filter-btn", category.as_str());
        doc.set_attr(b, "data-filter", category.as_str());
    }
    let grid = doc.append_new(container, "div", "portfolio__grid");
    doc.set_attr(grid, "id", "portfolio-grid");

    let skills = section(&mut doc, main, "skills", "skills");
    let container = section_header(&mut doc, skills, "Skills");
    let columns = doc.append_new(container, "div", "skills__grid");
    for category in SkillCategory::ALL {
        let col = doc.append_new(columns, "div", "skills__category");
        doc.append_text(col, "h3", "skills__title", category.label());
        let list = doc.append_new(col, "div", "skills__list");
        doc.set_attr(list, "id", category.container_id());
    }

    let contact = section(&mut doc, main, "contact", "contact");
    let container = section_header(&mut doc, contact, "Get In Touch");
    let content = doc.append_new(container, "div", "contact__content");
    doc.append_text(
        content,
        "p",
        "contact__info",
        "Have a project in mind? Send a message and I'll get back to you.",
    );
    build_contact_form(&mut doc, content);

    let footer = doc.append_new(body, "footer", "footer");
    doc.append_text(
        footer,
        "p",
        "",
        &format!("© {} {}. All rights reserved.", chrono::Utc::now().year(), site_name),
    );
    doc
}

fn build_header(doc: &mut Document, body: NodeId, site_name: &str) {
    let header = doc.append_new(body, "header", "header");
    let nav = doc.append_new(header, "nav", "nav container");
    let logo = doc.append_text(nav, "a", "nav__logo", site_name);
    doc.set_attr(logo, "href", "#home");

    let menu = doc.append_new(nav, "ul", "nav__menu");
    doc.set_attr(menu, "id", "nav-menu");
    for (i, (id, label)) in SECTIONS.iter().enumerate() {
        let item = doc.append_new(menu, "li", "nav__item");
        let classes = if i == 0 { "nav__link active" } else { "nav__link" };
        let link = doc.append_text(item, "a", classes, label);
        doc.set_attr(link, "href", &format!("#{}", id));
    }

    let actions = doc.append_new(nav, "div", "nav__actions");
    let theme = doc.append_new(actions, "button", "theme-toggle");
    doc.set_attr(theme, "id", "theme-toggle");
    doc.set_attr(theme, "aria-label", "Toggle color theme");
    doc.append_new(theme, "span", "theme-toggle__icon");
    let toggle = doc.append_new(actions, "button", "nav__toggle");
    doc.set_attr(toggle, "id", "nav-toggle");
    doc.set_attr(toggle, "aria-label", "Toggle menu");
    doc.append_text(toggle, "span", "", "\u{2630}");
}

fn build_contact_form(doc: &mut Document, parent: NodeId) {
    let form = doc.append_new(parent, "form", "contact__form");
    doc.set_attr(form, "id", "contact-form");
    for (name, label, kind) in [
        ("name", "Name", "text"),
        ("email", "Email", "email"),
        ("subject", "Subject", "text"),
        ("message", "Message", "textarea"),
    ] {
        let group = doc.append_new(form, "div", "form-group");
        let l = doc.append_text(group, "label", "form-label", label);
        doc.set_attr(l, "for", name);
        let input = if kind == "textarea" {
            let t = doc.append_new(group, "textarea", "form-control");
            doc.set_attr(t, "rows", "5");
            t
        } else {
            let i = doc.append_new(group, "input", "form-control");
            doc.set_attr(i, "type", kind);
            i
        };
        doc.set_attr(input, "id", name);
        doc.set_attr(input, "name", name);
    }
    let submit = doc.append_text(form, "button", "btn btn--primary", "Send Message");
    doc.set_attr(submit, "type", "submit");
}

fn section(doc: &mut Document, parent: NodeId, id: &str, class: &str) -> NodeId {
    let s = doc.append_new(parent, "section", class);
    doc.set_attr(s, "id", id);
    s
}

/// Adds `.container > .section-header > h2` and returns the container.
fn section_header(doc: &mut Document, section: NodeId, title: &str) -> NodeId {
    let container = doc.append_new(section, "div", "container");
    let header = doc.append_new(container, "div", "section-header");
    doc.append_text(header, "h2", "section-title", title);
    container
}

/// Stack every `section[id]` top to bottom at `section_height` each, size
/// the header, and place fade candidates inside their section.
pub fn apply_layout(doc: &mut Document, header_height: f64, section_height: f64) {
    if let Some(header) = doc.first_by_class("header") {
        doc.set_layout(header, LayoutBox::new(0.0, header_height));
    }
    let sections = doc.find_all(doc.root(), |el| el.tag() == "section" && el.id().is_some());
    for (i, s) in sections.into_iter().enumerate() {
        let top = i as f64 * section_height;
        doc.set_layout(s, LayoutBox::new(top, section_height));
        for el in doc.find_all(s, |el| FADE_CANDIDATES.iter().any(|c| el.has_class(c))) {
            let b = if doc.get(el).has_class("section-header") {
                LayoutBox::new(top + 80.0, 100.0)
            } else {
                LayoutBox::new(top + 200.0, 400.0)
            };
            doc.set_layout(el, b);
        }
    }
}

/// The standard page with the default layout applied.
pub fn default_page(site_name: &str) -> Document {
    let mut doc = portfolio_document(site_name);
    apply_layout(&mut doc, HEADER_HEIGHT, SECTION_HEIGHT);
    doc
}
