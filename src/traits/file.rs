//! The file-entity capability.

use async_trait::async_trait;

use super::{ReadStream, WriteStream};
use crate::{FsError, OpenReadOptions, OpenWriteOptions};

/// One file, identified by its logical path within a repository.
///
/// The entity itself is stateless; each open call constructs a fresh stream
/// session bound to the file's resolved native path. The abstract layer is
/// responsible for not issuing overlapping opens of the same mode on the
/// same path.
#[async_trait]
pub trait VfsFile: Send + Sync {
    /// The logical path this entity is bound to.
    fn path(&self) -> &str;

    /// Open a read session.
    ///
    /// The session's native handle is built lazily, so this call performs no
    /// I/O; a vanished file surfaces on the first
    /// [`read`](super::ReadStream::read).
    async fn open_read(&self, options: OpenReadOptions) -> Result<Box<dyn ReadStream>, FsError>;

    /// Open a write session.
    ///
    /// As with [`open_read`](Self::open_read), the handle is built lazily;
    /// mode conflicts such as exclusive-create against an existing file
    /// surface on the first [`write`](super::WriteStream::write).
    async fn open_write(&self, options: OpenWriteOptions) -> Result<Box<dyn WriteStream>, FsError>;

    /// Remove the file unconditionally.
    ///
    /// Force semantics: removing a nonexistent file succeeds. Not recursive.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::TypeMismatch`](crate::ErrorKind::TypeMismatch) if the path names a directory
    async fn remove(&self) -> Result<(), FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vfs_file_is_object_safe() {
        fn _check(_: &dyn VfsFile) {}
    }
}
