// Route exports
pub mod insights;

use actix_web::web;

pub use insights::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(insights::configure),
    );
}
