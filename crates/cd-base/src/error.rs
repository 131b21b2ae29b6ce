use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelIdError {
    #[error("channel id is empty")]
    Empty,
    #[error("channel id {0:?} may only contain lowercase letters, digits, '-' and '_'")]
    InvalidChar(String),
}

/// Failure to read or decode an authored content block.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content block {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandTableError {
    #[error("command /{0} is declared twice")]
    Duplicate(String),
    #[error("command /{name} does not name a valid channel: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: ChannelIdError,
    },
}

/// Raised while switching channels. Never leaves the session half-updated.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    ChannelId(#[from] ChannelIdError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a whole number of milliseconds, got {value:?}")]
    InvalidNumber { name: String, value: String },
    #[error("content directory {0} does not exist")]
    MissingContentDir(PathBuf),
    #[error(transparent)]
    Commands(#[from] CommandTableError),
    #[error("{0}")]
    Usage(String),
}
