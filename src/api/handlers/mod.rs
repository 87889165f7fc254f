// src/api/handlers/mod.rs
mod assets;
mod health;
mod run;

pub use assets::{static_asset, static_index};
pub use health::health_check;
pub use run::{json_error_handler, run_code};
