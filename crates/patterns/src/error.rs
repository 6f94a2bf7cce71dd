use thiserror::Error;

/// Result type for catalog construction
pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors raised while building a pattern catalog
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Duplicate pattern id: {0}")]
    DuplicateId(String),

    #[error("Pattern {id}: confidence {value} is outside [0, 1]")]
    ConfidenceOutOfRange { id: String, value: f32 },

    #[error("Pattern {0} has no code patterns")]
    EmptyPattern(String),

    #[error("Pattern {id}: invalid regex: {source}")]
    InvalidRegex {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern {id}: invalid glob: {source}")]
    InvalidGlob {
        id: String,
        #[source]
        source: globset::Error,
    },
}
