//! Bibliothèque library management server
//!
//! Tracks books, borrowers and loans over a REST JSON API. A book is lent
//! to at most one borrower at a time; its availability flag is the source
//! of truth for whether it is currently out.

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
    pub services: Arc<services::Services>,
}
