//! Engine construction errors
//!
//! The simulation itself never fails once built; everything here is raised
//! while validating the surface and configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Ground and spawn geometry are derived from the surface size
    #[error("invalid surface dimensions {width}x{height}: both must be positive")]
    InvalidSurface { width: f32, height: f32 },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse engine configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
