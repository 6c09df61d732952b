#[derive(Debug, thiserror::Error)]
pub enum BriefError {
    #[error("CRM error: {0}")]
    Crm(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Stage error: {0}")]
    Stage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BriefError>;
