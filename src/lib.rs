// src/lib.rs
pub mod config;
pub mod errors;
pub mod workspace;
pub mod process;
pub mod pipeline;
pub mod models;
pub mod banner;
pub mod api;
