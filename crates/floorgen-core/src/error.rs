pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Unsupported arrangement type: {code:?} (expected one of L, R, T, B, LR, TB)")]
    UnsupportedArrangement { code: String },

    #[error("Malformed layout request JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}
