use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutolError {
    #[error("Invalid configuration key: {key}")]
    InvalidConfigurationKey { key: String },

    #[error("Operator {operator} has no supported role (tags: {tags:?})")]
    UnsupportedOperatorRole { operator: String, tags: Vec<String> },

    #[error("Operator {operator} requires hyperparameter {hyperparameter}, which has no values")]
    UnresolvedHyperparameter { operator: String, hyperparameter: String },

    #[error("Operator {operator} references unknown parameter check {check}")]
    UnknownParameterCheck { operator: String, check: String },

    #[error("Position {position} is out of range with {len} elements")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("New terminal does not share type with the one at position {position}. Old: {expected}. New: {actual}")]
    IncompatibleTerminalType {
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("New primitive at position {position} produces {actual}, expected {expected}")]
    IncompatibleOutputType {
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("Pipeline does not define all required terminals for primitive {primitive}. Missing: {missing:?}")]
    MissingRequiredTerminal { primitive: String, missing: Vec<String> },

    #[error("Primitive {primitive} does not accept terminal {identifier}")]
    UnexpectedTerminal { primitive: String, identifier: String },

    #[error("Unknown primitive: {0}")]
    UnknownPrimitive(String),

    #[error("Unknown terminal: {0}")]
    UnknownTerminal(String),

    #[error("Malformed pipeline: {0}")]
    MalformedPipeline(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, AutolError>;
