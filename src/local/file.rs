//! The local file entity.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{LocalReadStream, LocalWriteStream};
use crate::error::translate;
use crate::path::full_path;
use crate::{FsError, OpenReadOptions, OpenWriteOptions, ReadStream, VfsFile, WriteStream};

/// A file entity bound to one logical path under a repository root.
///
/// Stateless apart from its identity: every open call constructs a fresh
/// stream session, and the entity hands the session its resolved native
/// path. The abstract layer is responsible for not issuing overlapping
/// opens of the same mode.
pub struct LocalFile {
    repository: String,
    root: PathBuf,
    path: String,
}

impl LocalFile {
    pub(crate) fn new(repository: String, root: PathBuf, path: &str) -> Self {
        Self {
            repository,
            root,
            path: path.to_owned(),
        }
    }

    /// The resolved native path of this file.
    pub fn full_path(&self) -> PathBuf {
        full_path(&self.root, &self.path)
    }
}

#[async_trait]
impl VfsFile for LocalFile {
    fn path(&self) -> &str {
        &self.path
    }

    async fn open_read(&self, options: OpenReadOptions) -> Result<Box<dyn ReadStream>, FsError> {
        Ok(Box::new(LocalReadStream::new(
            self.repository.clone(),
            self.path.clone(),
            self.full_path(),
            options,
        )))
    }

    async fn open_write(&self, options: OpenWriteOptions) -> Result<Box<dyn WriteStream>, FsError> {
        Ok(Box::new(LocalWriteStream::new(
            self.repository.clone(),
            self.path.clone(),
            self.full_path(),
            options,
        )))
    }

    async fn remove(&self) -> Result<(), FsError> {
        match tokio::fs::remove_file(self.full_path()).await {
            Ok(()) => Ok(()),
            // Force semantics: a target that is already gone is success.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(translate(&self.repository, &self.path, e, true)),
        }
    }
}
