//! Error taxonomy for the OmniFS abstraction and translation from native errors.
//!
//! Every operation in this crate fails with [`FsError`], which carries one of
//! a small closed set of abstract [`ErrorKind`]s plus the repository, the
//! logical path, and the original native error for diagnostics. Native
//! failures never cross the backend boundary untranslated; [`translate`] is
//! the single mapping point.

use std::fmt;
use std::io;

/// Abstract error kinds, independent of the native error vocabulary.
///
/// The set is closed by design: the abstract filesystem layer dispatches on
/// these kinds, so backends must not invent new ones.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The entry does not exist.
    NotFound,
    /// A file was found where a directory was expected, or vice versa.
    TypeMismatch,
    /// The target already exists (exclusive create, non-empty rmdir target).
    PathExists,
    /// A storage quota was exceeded.
    QuotaExceeded,
    /// An argument was malformed (invalid offset, undecodable input).
    Syntax,
    /// The session or handle is no longer usable (closed stream, stale
    /// descriptor).
    InvalidState,
    /// Permission was denied.
    Security,
    /// The operation is not supported by this backend or platform.
    NotSupported,
    /// A modification was rejected for a reason outside the other kinds.
    NoModificationAllowed,
    /// A read failed for a reason outside the other kinds.
    NotReadable,
    /// The native error carried no recognizable code.
    Unclassified,
}

impl ErrorKind {
    /// Stable textual name for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::PathExists => "path exists",
            ErrorKind::QuotaExceeded => "quota exceeded",
            ErrorKind::Syntax => "syntax",
            ErrorKind::InvalidState => "invalid state",
            ErrorKind::Security => "security",
            ErrorKind::NotSupported => "not supported",
            ErrorKind::NoModificationAllowed => "no modification allowed",
            ErrorKind::NotReadable => "not readable",
            ErrorKind::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by every backend operation.
///
/// Carries the abstract [`ErrorKind`], the repository the operation ran
/// against, the logical path it targeted, and (when the failure originated in
/// a native call) the original [`io::Error`] as the source.
///
/// # Examples
///
/// ```rust
/// use omnifs_local::{ErrorKind, FsError};
///
/// let err = FsError::new(ErrorKind::NotFound, "/data", "/missing.txt");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.to_string(), "not found: /data/missing.txt");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{}", self.describe())]
pub struct FsError {
    kind: ErrorKind,
    repository: String,
    path: String,
    detail: Option<String>,
    #[source]
    source: Option<io::Error>,
}

impl FsError {
    /// Create an error with no native source attached.
    pub fn new(
        kind: ErrorKind,
        repository: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            repository: repository.into(),
            path: path.into(),
            detail: None,
            source: None,
        }
    }

    /// Attach a human-readable detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the originating native error.
    #[must_use]
    pub fn with_source(mut self, source: io::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// The abstract kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The repository the failing operation ran against.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The logical path the failing operation targeted.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The original native error, if the failure originated in a native call.
    pub fn io_source(&self) -> Option<&io::Error> {
        self.source.as_ref()
    }

    fn describe(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}: {}{} ({detail})", self.kind, self.repository, self.path),
            None => format!("{}: {}{}", self.kind, self.repository, self.path),
        }
    }
}

/// `EBADF` has no stable `io::ErrorKind`, so the translator matches the raw
/// POSIX value.
const EBADF: i32 = 9;

/// Translate a native error into the abstract taxonomy.
///
/// Pure mapping, never panics. `write` selects the fallback kind for codes
/// outside the fixed table: [`ErrorKind::NoModificationAllowed`] for write
/// attempts, [`ErrorKind::NotReadable`] otherwise. Native errors that carry
/// no recognizable code at all map to [`ErrorKind::Unclassified`].
pub fn translate(repository: &str, path: &str, err: io::Error, write: bool) -> FsError {
    tracing::debug!(
        kind = ?err.kind(),
        code = err.raw_os_error(),
        repository,
        path,
        write,
        "translating native error",
    );
    let kind = match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::NotADirectory | io::ErrorKind::IsADirectory => ErrorKind::TypeMismatch,
        io::ErrorKind::DirectoryNotEmpty => ErrorKind::TypeMismatch,
        io::ErrorKind::AlreadyExists => ErrorKind::PathExists,
        io::ErrorKind::QuotaExceeded => ErrorKind::QuotaExceeded,
        io::ErrorKind::InvalidInput => ErrorKind::Syntax,
        io::ErrorKind::PermissionDenied => ErrorKind::Security,
        io::ErrorKind::Unsupported => ErrorKind::NotSupported,
        _ => fallback_kind(&err, write),
    };
    FsError::new(kind, repository, path).with_source(err)
}

fn fallback_kind(err: &io::Error, write: bool) -> ErrorKind {
    if err.raw_os_error() == Some(EBADF) {
        return ErrorKind::InvalidState;
    }
    // Some platforms report unsupported operations through codes that have no
    // ErrorKind mapping; the message is the only signal left.
    if err.to_string().to_ascii_lowercase().contains("not supported") {
        return ErrorKind::NotSupported;
    }
    if err.raw_os_error().is_none() {
        return ErrorKind::Unclassified;
    }
    if write {
        ErrorKind::NoModificationAllowed
    } else {
        ErrorKind::NotReadable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(err: io::Error, write: bool) -> ErrorKind {
        translate("/repo", "/file.txt", err, write).kind()
    }

    #[test]
    fn display_without_detail() {
        let err = FsError::new(ErrorKind::NotFound, "/data", "/missing.txt");
        assert_eq!(err.to_string(), "not found: /data/missing.txt");
    }

    #[test]
    fn display_with_detail() {
        let err = FsError::new(ErrorKind::InvalidState, "/data", "/f")
            .with_detail("no accessed time");
        assert_eq!(err.to_string(), "invalid state: /data/f (no accessed time)");
    }

    #[test]
    fn accessors_round_trip() {
        let err = FsError::new(ErrorKind::Security, "/r", "/p")
            .with_source(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.kind(), ErrorKind::Security);
        assert_eq!(err.repository(), "/r");
        assert_eq!(err.path(), "/p");
        assert!(err.io_source().is_some());
    }

    #[test]
    fn source_is_chained() {
        use std::error::Error as _;
        let err = FsError::new(ErrorKind::NotReadable, "/r", "/p")
            .with_source(io::Error::other("disk fell over"));
        assert!(err.source().is_some());
    }

    #[test]
    fn translate_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        assert_eq!(kind_of(err, false), ErrorKind::NotFound);
    }

    #[test]
    fn translate_type_mismatch() {
        let not_dir = io::Error::new(io::ErrorKind::NotADirectory, "not a directory");
        assert_eq!(kind_of(not_dir, false), ErrorKind::TypeMismatch);
        let is_dir = io::Error::new(io::ErrorKind::IsADirectory, "is a directory");
        assert_eq!(kind_of(is_dir, true), ErrorKind::TypeMismatch);
        let not_empty = io::Error::new(io::ErrorKind::DirectoryNotEmpty, "not empty");
        assert_eq!(kind_of(not_empty, true), ErrorKind::TypeMismatch);
    }

    #[test]
    fn translate_path_exists() {
        let err = io::Error::new(io::ErrorKind::AlreadyExists, "file exists");
        assert_eq!(kind_of(err, true), ErrorKind::PathExists);
    }

    #[test]
    fn translate_quota_exceeded() {
        let err = io::Error::new(io::ErrorKind::QuotaExceeded, "quota exceeded");
        assert_eq!(kind_of(err, true), ErrorKind::QuotaExceeded);
    }

    #[test]
    fn translate_invalid_input() {
        let err = io::Error::new(io::ErrorKind::InvalidInput, "invalid argument");
        assert_eq!(kind_of(err, false), ErrorKind::Syntax);
    }

    #[test]
    fn translate_permission_denied_ignores_write_flag() {
        let read = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(kind_of(read, false), ErrorKind::Security);
        let write = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(kind_of(write, true), ErrorKind::Security);
    }

    #[test]
    fn translate_unsupported_kind() {
        let err = io::Error::new(io::ErrorKind::Unsupported, "nope");
        assert_eq!(kind_of(err, false), ErrorKind::NotSupported);
    }

    #[test]
    fn translate_unsupported_by_message() {
        let err = io::Error::other("operation not supported on this device");
        assert_eq!(kind_of(err, true), ErrorKind::NotSupported);
    }

    #[cfg(unix)]
    #[test]
    fn translate_bad_file_descriptor() {
        let err = io::Error::from_raw_os_error(EBADF);
        assert_eq!(kind_of(err, false), ErrorKind::InvalidState);
    }

    #[test]
    fn translate_unclassified_without_code() {
        let err = io::Error::other("something odd happened");
        assert_eq!(kind_of(err, false), ErrorKind::Unclassified);
    }

    #[cfg(unix)]
    #[test]
    fn translate_default_splits_on_write() {
        // EIO: a real code, but outside the fixed table.
        let read = io::Error::from_raw_os_error(5);
        assert_eq!(kind_of(read, false), ErrorKind::NotReadable);
        let write = io::Error::from_raw_os_error(5);
        assert_eq!(kind_of(write, true), ErrorKind::NoModificationAllowed);
    }

    #[test]
    fn kinds_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ErrorKind>();
        assert_send_sync::<FsError>();
    }
}
