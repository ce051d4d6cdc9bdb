use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

/// Permission bits for newly written files (rw-r--r--).
pub const FILE_MODE: u32 = 0o644;

/// Read/write/stat capability over a flat namespace of file names.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn exists(&self, name: &str) -> bool;

    async fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Creates or truncates `name` and writes `contents`.
    async fn write(&self, name: &str, contents: &[u8]) -> io::Result<()>;
}

/// A [`FileStore`] rooted at one directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl FileStore for DirectoryStore {
    async fn exists(&self, name: &str) -> bool {
        tokio::fs::try_exists(self.path_for(name))
            .await
            .unwrap_or(false)
    }

    async fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path_for(name)).await
    }

    async fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(FILE_MODE);

        let mut file = options.open(self.path_for(name)).await?;
        file.write_all(contents).await?;
        file.flush().await?;
        Ok(())
    }
}
