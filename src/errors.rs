use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Raised when no safe file name can be derived from the given input.
    #[error("Could not derive file name from '{name}'")]
    SuspiciousFileOperation { name: String },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("File I/O Error: {0}")]
    Io(String),
}

// Allow conversion from std::io::Error to AppError::Io
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
