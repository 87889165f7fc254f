// src/api/handlers/run.rs
use actix_web::{error, web, HttpRequest, HttpResponse, Result};
use uuid::Uuid;

use crate::api::AppState;
use crate::models::{RunRequest, RunResponse, MISSING_CODE_MESSAGE};
use crate::pipeline;

pub async fn run_code(
    state: web::Data<AppState>,
    req: web::Json<RunRequest>,
) -> Result<HttpResponse> {
    let Some(code) = req.code() else {
        log::warn!("Rejected run request without code");
        return Ok(HttpResponse::BadRequest().json(RunResponse {
            output: MISSING_CODE_MESSAGE.to_string(),
        }));
    };

    let run_id = Uuid::new_v4();
    log::info!("[{}] Received {} bytes of Verilog", run_id, code.len());

    let outcome = pipeline::run_pipeline(&state.config, state.runner.as_ref(), code).await;
    if !outcome.is_success() {
        log::warn!("[{}] Run stopped at stage '{}'", run_id, outcome.failed_stage);
    }

    // Every pipeline outcome is a 200; the text tells them apart.
    Ok(HttpResponse::Ok().json(RunResponse {
        output: outcome.combined_output,
    }))
}

/// Turns malformed JSON bodies into a JSON 400 instead of actix's plain-text one.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected malformed run request: {}", err);
    let response = HttpResponse::BadRequest().json(RunResponse {
        output: format!("Invalid request body: {}", err),
    });
    error::InternalError::from_response(err, response).into()
}
