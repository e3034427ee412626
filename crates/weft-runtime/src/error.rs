//! Runtime errors

use std::path::PathBuf;

use weft_dom::{DomError, NodeId};
use weft_net::NetError;

/// Failure fetching a component's html or css
#[derive(Debug, thiserror::Error)]
pub enum TemplateFetchError {
    #[error("No template found for component at '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: NetError,
    },

    #[error("Fetch response status was not OK for {url} (status {status})")]
    Status { url: String, status: u16 },
}

impl TemplateFetchError {
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

/// Registry definition errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid custom element name '{0}'")]
    InvalidName(String),

    #[error("component '{0}' is already defined")]
    ComponentAlreadyDefined(String),

    #[error("controller '{0}' is already defined")]
    ControllerAlreadyDefined(String),
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by the component lifecycle
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("template for <{tag}> failed after {attempts} attempts: {source}")]
    TemplateFetch {
        tag: String,
        attempts: u32,
        #[source]
        source: TemplateFetchError,
    },

    #[error("component {0} was already upgraded")]
    AlreadyUpgraded(NodeId),

    #[error("element {0} already has a controller")]
    ControllerAlreadyAttached(NodeId),

    #[error("unknown controller class '{0}'")]
    UnknownController(String),

    #[error("controller on {element} never became ready after {attempts} checks")]
    ControllerWait { element: NodeId, attempts: u32 },

    #[error("component {0} was disconnected while loading")]
    Cancelled(NodeId),

    #[error("{0} is not a mounted component")]
    NotAComponent(NodeId),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = RuntimeError> = std::result::Result<T, E>;
