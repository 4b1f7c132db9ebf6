use thiserror::Error;

use crate::init::Plugin;

/// Failures reported by a [`Surface`](crate::surface::Surface) implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachError {
    #[error("animation plugins are not registered; call register_plugins before attaching")]
    NotInitialized,

    #[error("plugin {0:?} must be registered first")]
    MissingPlugin(Plugin),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseEaseError {
    #[error("unknown ease `{0}`")]
    Unknown(String),

    #[error("bad ease parameter in `{0}`")]
    Parameter(String),
}
