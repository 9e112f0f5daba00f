use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommissionError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Unknown plan tier '{value}'")]
    UnknownPlanTier { value: String },

    #[error("Config version {version} not found")]
    VersionNotFound { version: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, CommissionError>;
