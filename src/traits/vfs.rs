//! The filesystem-root capability.

use async_trait::async_trait;

use super::{VfsDirectory, VfsFile};
use crate::{FsError, Props, Stats, UrlKind};

/// A mounted filesystem rooted at one repository.
///
/// Entity constructors ([`file`](Vfs::file), [`directory`](Vfs::directory))
/// only bind a logical path; they perform no I/O and cannot fail. Whether the
/// entry exists is discovered by the first operation on the entity.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the root holds only immutable
/// configuration, so methods take `&self`.
#[async_trait]
pub trait Vfs: Send + Sync {
    /// The repository this filesystem serves, as reported in errors.
    fn repository(&self) -> &str;

    /// Query metadata for the entry at `path`.
    ///
    /// Directories report no size.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if the entry does not exist
    async fn head(&self, path: &str) -> Result<Stats, FsError>;

    /// Update the access and modification times of the entry at `path`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidState`](crate::ErrorKind::InvalidState) if either timestamp is absent from `props`
    /// - [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if the entry does not exist
    async fn patch(&self, path: &str, props: Props) -> Result<(), FsError>;

    /// Resolve `path` to a URL of the requested kind.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::NotSupported`](crate::ErrorKind::NotSupported) for URL kinds the backend cannot issue
    fn to_url(&self, path: &str, kind: UrlKind) -> Result<String, FsError>;

    /// Bind a file entity at `path`.
    fn file(&self, path: &str) -> Box<dyn VfsFile>;

    /// Bind a directory entity at `path`.
    fn directory(&self, path: &str) -> Box<dyn VfsDirectory>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vfs_is_object_safe() {
        fn _check(_: &dyn Vfs) {}
    }
}
