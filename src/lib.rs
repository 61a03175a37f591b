//! Library catalog server
//!
//! A REST JSON API for managing authors, books and tags. Books are stored
//! together with their tag set; bearer tokens come from an external identity
//! provider and are only validated here.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
    pub services: Arc<services::Services>,
    pub tokens: Arc<models::claims::TokenVerifier>,
}
