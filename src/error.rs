//! Server error taxonomy.
//!
//! Errors are split into two classes. Recoverable errors belong to a single
//! connection: the connection is dropped and the accept loop carries on.
//! Fatal errors mean the environment is broken (the listening socket, the
//! file store or the configuration) and stop the server.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::http::writer::WriteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Recoverable,
    Fatal,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),

    #[error("failed to load {}: {source}", .path.display())]
    ResourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("receive failed: {0}")]
    Receive(#[source] io::Error),

    #[error("send failed: {0}")]
    Send(#[from] WriteError),
}

impl ServerError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ServerError::Receive(_) | ServerError::Send(_) => ErrorClass::Recoverable,
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Accept(_)
            | ServerError::ResourceRead { .. } => ErrorClass::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Fatal
    }
}
