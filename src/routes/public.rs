use rocket::http::ContentType;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::controllers::theme::Theme;
use crate::models::catalog::Catalog;
use crate::page::Page;
use crate::render;
use crate::shell;

// ── Homepage ───────────────────────────────────────────

/// Page snapshot after replaying a filter click, a theme switch and a
/// scroll, with every timer run to completion.
#[get("/?<filter>&<theme>&<scroll>")]
pub fn homepage(
    config: &State<SiteConfig>,
    catalog: &State<Arc<Catalog>>,
    filter: Option<&str>,
    theme: Option<&str>,
    scroll: Option<f64>,
) -> RawHtml<String> {
    let doc = shell::default_page(&config.site_name);
    let mut page = Page::ready(doc, Arc::clone(catalog.inner()), config.inner().clone());

    if let Some(button) = filter.and_then(|f| page.filter_button(f)) {
        page.click(button);
    }
    if theme.and_then(Theme::parse) == Some(Theme::Dark) {
        if let Some(toggle) = page.document().get_by_id("theme-toggle") {
            page.click(toggle);
        }
    }
    if let Some(y) = scroll {
        page.scroll_to(y);
    }
    page.settle();

    RawHtml(render::render_page(page.document()))
}

// ── Data ───────────────────────────────────────────────

#[get("/data.json")]
pub fn catalog_json(catalog: &State<Arc<Catalog>>) -> Json<Catalog> {
    Json(Catalog::clone(catalog.inner()))
}

#[get("/api/placeholder/<width>/<height>")]
pub fn placeholder(width: u32, height: u32) -> Option<(ContentType, String)> {
    render::placeholder_svg(width, height).map(|svg| (ContentType::SVG, svg))
}

pub fn root_routes() -> Vec<rocket::Route> {
    routes![homepage, catalog_json, placeholder]
}
