// src/api/handlers/health.rs
use actix_web::{web, HttpResponse, Result};
use crate::api::AppState;
use crate::models::HealthResponse;

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: format!("{} is up!", state.config.service_name),
    }))
}
