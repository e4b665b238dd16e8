//! The local directory entity.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::translate;
use crate::path::{full_path, join_logical};
use crate::{FsError, VfsDirectory};

/// A directory entity bound to one logical path under a repository root.
///
/// Every operation is a single native call plus error translation; the
/// entity holds no open resources.
pub struct LocalDirectory {
    repository: String,
    root: PathBuf,
    path: String,
}

impl LocalDirectory {
    pub(crate) fn new(repository: String, root: PathBuf, path: &str) -> Self {
        Self {
            repository,
            root,
            path: path.to_owned(),
        }
    }

    /// The resolved native path of this directory.
    pub fn full_path(&self) -> PathBuf {
        full_path(&self.root, &self.path)
    }
}

#[async_trait]
impl VfsDirectory for LocalDirectory {
    fn path(&self) -> &str {
        &self.path
    }

    async fn list(&self) -> Result<Vec<String>, FsError> {
        let mut entries = tokio::fs::read_dir(self.full_path())
            .await
            .map_err(|e| translate(&self.repository, &self.path, e, false))?;
        let mut children = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| translate(&self.repository, &self.path, e, false))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            children.push(join_logical(&self.path, &name));
        }
        Ok(children)
    }

    async fn mkcol(&self) -> Result<(), FsError> {
        tokio::fs::create_dir_all(self.full_path())
            .await
            .map_err(|e| translate(&self.repository, &self.path, e, true))
    }

    async fn rmdir(&self) -> Result<(), FsError> {
        tokio::fs::remove_dir(self.full_path())
            .await
            .map_err(|e| translate(&self.repository, &self.path, e, true))
    }

    async fn rmdir_recursive(&self) -> Result<(), FsError> {
        tokio::fs::remove_dir_all(self.full_path())
            .await
            .map_err(|e| translate(&self.repository, &self.path, e, true))
    }
}
