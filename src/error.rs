//! Minicurses error type

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Backend device I/O failed
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// An art file could not be read
    #[error("failed to load art from {}: {source}", path.display())]
    Art {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("art file {} is empty", path.display())]
    EmptyArt { path: PathBuf },

    /// Bad command line or device settings
    #[error("configuration error: {0}")]
    Config(String),

    /// An event script could not be parsed
    #[error("invalid event script: {0}")]
    Script(#[from] serde_json::Error),

    /// The input side of the device went away
    #[error("terminal disconnected")]
    Disconnected,

    /// A scripted backend ran out of events
    #[error("event script exhausted")]
    ScriptExhausted,
}

pub type Result<T> = std::result::Result<T, Error>;
