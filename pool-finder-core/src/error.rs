//! Unified error type definition

use thiserror::Error;

// Re-export library error type
pub use pool_finder_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// API call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Report destination could not be opened
    #[error("Cannot open output file {path}: {source}")]
    OutputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// The credential is not a reseller account.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::Provider(ProviderError::ResellerPermissionDenied { .. })
        )
    }
}

impl CoreError {
    /// 是否为预期行为（凭证/权限配置问题），用于日志分级。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_expected(),
            Self::OutputFile { .. } | Self::Io(_) | Self::Csv(_) | Self::Json(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
