use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// Every variant is recoverable: failures are reported in the status bar
/// and the pre-operation listing/selection/clipboard state is retained.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from filesystem operations (enumerate, create, move, copy).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while sending an entry to the trash.
    #[error("Trash error: {0}")]
    Trash(#[from] trash::Error),

    /// Internal failure reported by the filesystem watcher.
    #[error("Watch error: {0}")]
    Watch(String),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
