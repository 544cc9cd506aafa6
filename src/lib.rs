pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{AppConfig, StorageBackend};
pub use db::Stores;
pub use errors::{AppError, AppResult, ErrorKind};
pub use services::AppState;
