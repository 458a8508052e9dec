use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised while building or persisting a template
///
/// Rendering itself cannot fail; every variant here comes from construction,
/// reading a definition, or the output sink.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{entry}: required field `{field}` is not set")]
    MissingField {
        entry: &'static str,
        field: &'static str,
    },

    #[error("{entry}: {message}")]
    Constraint {
        entry: &'static str,
        message: String,
    },

    #[error("unable to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to write template to {}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid stack definition: {0}")]
    Definition(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing(entry: &'static str, field: &'static str) -> Self {
        Self::MissingField { entry, field }
    }

    pub(crate) fn constraint(entry: &'static str, message: impl Into<String>) -> Self {
        Self::Constraint {
            entry,
            message: message.into(),
        }
    }
}

/// Unwraps a required builder field or reports it as missing.
pub(crate) fn required<T>(value: Option<T>, entry: &'static str, field: &'static str) -> Result<T> {
    value.ok_or_else(|| Error::missing(entry, field))
}
