#[macro_use]
extern crate rocket;

use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub mod config;
pub mod controllers;
pub mod dom;
pub mod models;
pub mod page;
pub mod render;
pub mod routes;
pub mod scheduler;
pub mod shell;
pub mod viewport;


use crate::config::SiteConfig;
use crate::models::catalog::Catalog;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Preview server: rendered page snapshots, the catalog, and placeholder images.
pub fn build_rocket(config: SiteConfig, catalog: Arc<Catalog>) -> Rocket<Build> {
    rocket::build()
        .manage(config)
        .manage(catalog)
        .mount("/", routes::public::root_routes())
        .register("/", catchers![not_found, server_error])
}
