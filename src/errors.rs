#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("Invalid cookie assignment: {0}")]
    InvalidAssignment(String),

    #[error("Cookie file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cookie file serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
