// Route exports
pub mod ranking;

use actix_web::web;

pub use ranking::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(ranking::configure),
    );
}
