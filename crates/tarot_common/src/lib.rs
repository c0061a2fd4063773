// --- File: crates/tarot_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Data structures shared by the service traits
pub mod services; // Service abstractions

#[cfg(test)]
mod models_test;

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, ApiError, Context, TarotError,
    TOKEN_EXPIRED_MESSAGE,
};

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, HTTP_CLIENT};

// Re-export logging utilities for easier access
pub use logging::{init_with_level, log_error, log_result};
