use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Invalid lookback window: {days} days")]
    InvalidWindow { days: u32 },

    #[error("Model catalog is empty")]
    EmptyCatalog,

    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashboardError>;
