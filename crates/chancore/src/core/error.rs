use thiserror::Error;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent error handling.
/// Uses `thiserror` for automatic error conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use chancore::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// IO errors (reading or replacing the data file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Outbound delivery errors
    #[error("Delivery error: {0}")]
    Delivery(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Helper function to convert String to AppError::Delivery
impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Delivery(err)
    }
}

/// Helper function to convert &str to AppError::Delivery
impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Delivery(err.to_string())
    }
}
