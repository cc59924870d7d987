//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON (de)serialization failures.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML (de)serialization failures.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A schema node the converter cannot express in Swagger 2.0.
    #[from(ignore)]
    #[display("Conversion Error: {_0}")]
    Conversion(String),

    /// A route path using syntax that cannot be rendered as a Swagger template.
    #[from(ignore)]
    #[display("Unsupported path '{_0}'")]
    UnsupportedPath(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
