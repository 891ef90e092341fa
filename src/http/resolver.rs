use std::path::PathBuf;

use crate::error::ServerError;
use crate::http::parser::{parse_request_path, ParseError};
use crate::http::store::FileStore;

/// The path that is aliased to the default document.
pub const ROOT_MARKER: &str = "/";

/// A file loaded fully into memory for one response.
///
/// The buffer is owned by the connection that asked for it and is released
/// when the connection is done with it, whichever way it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    content: Vec<u8>,
}

impl Resource {
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// Outcome of resolving one request.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Found(Resource),
    NotFound,
    Malformed(ParseError),
}

/// Maps raw request bytes to a [`Resource`] from a [`FileStore`].
pub struct Resolver<S> {
    store: S,
    index: String,
}

impl<S: FileStore> Resolver<S> {
    /// `index` is the document served for `/`, e.g. `/index.html`.
    pub fn new(store: S, index: impl Into<String>) -> Self {
        Self {
            store,
            index: index.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves a request to a file.
    ///
    /// A file that exists but cannot be read is a fatal
    /// [`ServerError::ResourceRead`].
    pub async fn resolve(&self, request: &[u8]) -> Result<Resolution, ServerError> {
        let path = match parse_request_path(request) {
            Ok(path) => path,
            Err(e) => return Ok(Resolution::Malformed(e)),
        };

        let relative = self.relative_path(path);
        tracing::debug!(requested = path, relative, "Resolving resource");

        match self.store.load(relative).await {
            Ok(Some(content)) => Ok(Resolution::Found(Resource::new(content))),
            Ok(None) => Ok(Resolution::NotFound),
            Err(source) => Err(ServerError::ResourceRead {
                path: PathBuf::from(relative),
                source,
            }),
        }
    }

    /// Applies the root alias and strips one leading `/`.
    pub fn relative_path<'a>(&'a self, path: &'a str) -> &'a str {
        let path = if path == ROOT_MARKER { self.index.as_str() } else { path };
        path.strip_prefix('/').unwrap_or(path)
    }
}
