// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
        .route("/", web::get().to(handlers::health_check))
        .route("/run", web::post().to(handlers::run_code))
        .service(
            web::scope("/ui")
                .route("", web::get().to(handlers::static_index))
                .route("/{path:.*}", web::get().to(handlers::static_asset))
        );
}
