// src/api/handlers/assets.rs
use actix_web::{web, HttpResponse, Responder};
use rust_embed::RustEmbed;
use std::borrow::Cow;

/// Browser editor bundled into the binary.
#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

pub async fn static_index() -> impl Responder {
    serve("index.html")
}

pub async fn static_asset(path: web::Path<String>) -> impl Responder {
    let path = path.into_inner();
    if path.is_empty() {
        serve("index.html")
    } else {
        serve(&path)
    }
}

fn serve(path: &str) -> HttpResponse {
    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(Cow::into_owned(content.data))
        }
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}
