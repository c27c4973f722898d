use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvogeneError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Structural invariant violated: {0}")]
    StructuralInvariant(String),

    #[error("Operand count error: {0}")]
    OperandCount(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Multiple violations: {}", format_composite(.0))]
    Composite(Vec<EvogeneError>),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn format_composite(errors: &[EvogeneError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, EvogeneError>;
