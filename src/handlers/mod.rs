// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and assemble the route table

pub mod crops;
pub mod gallery;
pub mod health;
pub mod users;

use crate::errors::{json_error_handler, path_error_handler, query_error_handler};
use actix_web::web;

pub use crops::config as crops_config;
pub use gallery::config as gallery_config;
pub use health::config as health_config;
pub use health::not_found;
pub use users::config as users_config;

/// Extractor settings so malformed bodies, paths and query strings
/// produce the same JSON envelope as handler errors
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

/// Every route of the API plus extractor settings
/// Pair with `.default_service(web::route().to(handlers::not_found))` on the App
pub fn configure(cfg: &mut web::ServiceConfig) {
    extractor_config(cfg);
    health_config(cfg);
    crops_config(cfg);
    gallery_config(cfg);
    users_config(cfg);
}
