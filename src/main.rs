use std::sync::Arc;

use folio::config::SiteConfig;
use folio::models::catalog::Catalog;

#[rocket::launch]
fn rocket() -> _ {
    env_logger::init();

    let config = SiteConfig::load();
    let catalog = match Catalog::load(config.data_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Catalog unavailable, serving an empty portfolio: {}", e);
            Catalog::default()
        }
    };

    eprintln!(
        "Previewing '{}' ({} projects, {} skills)",
        config.site_name,
        catalog.projects().len(),
        catalog.skills().len()
    );

    folio::build_rocket(config, Arc::new(catalog))
}
