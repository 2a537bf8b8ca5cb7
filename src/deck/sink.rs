use super::error::DeckError;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Destination for a finished document.
#[async_trait]
pub trait DeckSink: Send + Sync {
    /// Stores `bytes` under `file_name` and returns where they ended up.
    async fn deliver(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf, DeckError>;
}

/// Writes documents into a directory.
///
/// Bytes go to a temporary file in the target directory first and are renamed
/// into place only once fully written, so a failed export never leaves a
/// truncated document behind.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), DeckError> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| DeckError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl DeckSink for FileSink {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn deliver(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf, DeckError> {
        let dir = self.dir.clone();
        let target = dir.join(file_name);
        debug!(path = %target.display(), "Writing document");

        let path = target.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &path, &bytes))
            .await
            .map_err(|e| DeckError::Io(std::io::Error::other(e)))??;
        Ok(target)
    }
}
