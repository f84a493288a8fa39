use thiserror::Error;

/// The two failure kinds the mining core can produce.
/// Everything else (missing author, absent counts, absent flair) is handled
/// by defaulting, not by failing.
#[derive(Debug, Error)]
pub enum MineError {
    /// Malformed or unexpected input shape (e.g. the post child missing or of
    /// the wrong kind). The normalizer never partially returns: it either
    /// yields a complete `NormalizedData` or raises this.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid caller-supplied configuration (e.g. an unrecognized depth
    /// filter name). Never raised by the normalizer itself.
    #[error("validation error: {0}")]
    Validation(String),
}

impl MineError {
    pub fn parse(msg: impl Into<String>) -> Self {
        MineError::Parse(msg.into())
    }
    pub fn validation(msg: impl Into<String>) -> Self {
        MineError::Validation(msg.into())
    }
}
