//! Application-wide error types using thiserror.

use spinemotion_common::DashboardError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Error raised by configuration, store, aggregation or rendering.
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    /// Writing the view output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Short category name for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Dashboard(err) => err.kind(),
            Self::Output(_) => "output",
        }
    }
}

/// Result type for the dashboard application.
pub type AppResult<T> = Result<T, AppError>;
