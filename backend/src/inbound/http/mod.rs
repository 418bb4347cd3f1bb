//! HTTP inbound adapter exposing REST endpoints.

pub mod applications;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::{ApiResult, json_error_handler};

/// Register the `/api` scope and JSON body error handling.
///
/// The caller provides [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use jobtrack::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(applications::list_applications)
                .service(applications::create_application)
                .service(applications::get_application)
                .service(applications::update_application)
                .service(applications::delete_application),
        );
}
