use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Nothing left to build a password from once spaces are removed.
    #[error("No usable words were given")]
    EmptyInput,

    #[error("Password store {path} is unavailable")]
    StoreUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Symbol list {origin} is unavailable: {reason}")]
    SymbolsUnavailable { origin: String, reason: String },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: &'static str },
}

impl Error {
    pub(crate) fn store(path: impl Into<String>, source: io::Error) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn symbols(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SymbolsUnavailable {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}
