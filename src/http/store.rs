//! File store backing the resolver.
//!
//! The store is a byte provider keyed by a relative path. Paths are used as
//! given: `..` segments and absolute paths are not filtered.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

pub trait FileStore {
    /// Loads the whole file at `relative`.
    ///
    /// Returns `Ok(None)` when the file cannot be opened. An `Err` means the
    /// file was opened but could not be read in full.
    fn load(&self, relative: &str) -> impl Future<Output = io::Result<Option<Vec<u8>>>> + Send;
}

/// Serves files from a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileStore for DiskStore {
    fn load(&self, relative: &str) -> impl Future<Output = io::Result<Option<Vec<u8>>>> + Send {
        let path = self.root.join(relative);
        async move { load_file(&path).await }
    }
}

async fn load_file(path: &Path) -> io::Result<Option<Vec<u8>>> {
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "File not opened");
            return Ok(None);
        }
    };

    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        debug!(path = %path.display(), "Not a regular file");
        return Ok(None);
    }

    let size = usize::try_from(metadata.len())
        .map_err(|_| io::Error::new(io::ErrorKind::OutOfMemory, "file does not fit in memory"))?;

    let mut content = Vec::new();
    content.try_reserve_exact(size).map_err(|_| {
        io::Error::new(io::ErrorKind::OutOfMemory, "file buffer not allocated")
    })?;

    // One byte of slack so a file that grew since `metadata` is noticed.
    let mut reader = file.take(metadata.len() + 1);
    let read = reader.read_to_end(&mut content).await?;

    if read != size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {} bytes, read {}", size, read),
        ));
    }

    debug!(path = %path.display(), size, "File opened");
    Ok(Some(content))
}
