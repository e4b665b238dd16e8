//! The directory-entity capability.

use async_trait::async_trait;

use crate::FsError;

/// One directory, identified by its logical path within a repository.
///
/// All operations are one-shot native calls with error translation; the
/// entity holds no open resources.
#[async_trait]
pub trait VfsDirectory: Send + Sync {
    /// The logical path this entity is bound to.
    fn path(&self) -> &str;

    /// List the directory's children as logical paths.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if the directory does not exist
    /// - [`ErrorKind::TypeMismatch`](crate::ErrorKind::TypeMismatch) if the path names a file
    async fn list(&self) -> Result<Vec<String>, FsError>;

    /// Create the directory, including missing parents.
    ///
    /// Idempotent: succeeds if the directory already exists.
    async fn mkcol(&self) -> Result<(), FsError>;

    /// Remove the directory. Non-recursive.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if the directory does not exist
    /// - [`ErrorKind::TypeMismatch`](crate::ErrorKind::TypeMismatch) if the directory is not empty
    async fn rmdir(&self) -> Result<(), FsError>;

    /// Remove the directory and everything under it.
    async fn rmdir_recursive(&self) -> Result<(), FsError>;
}
