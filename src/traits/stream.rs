//! Stream-session capabilities.
//!
//! A session owns at most one native handle at a time and rebuilds it on
//! demand after a seek, an end-of-stream, or a failure. Sessions must be
//! explicitly closed; close is idempotent, and any operation after close
//! fails with [`ErrorKind::InvalidState`](crate::ErrorKind::InvalidState).

use async_trait::async_trait;

use crate::{ByteSource, FsError};

/// An open-for-read session on one file.
#[async_trait]
pub trait ReadStream: Send {
    /// Read up to `size` bytes from the current position.
    ///
    /// `None` (or zero) falls back to the session's buffer size. Returns
    /// `Ok(None)` when the source is exhausted; end-of-stream is a result,
    /// not an error. The returned buffer may be shorter than `size` only at
    /// end-of-stream.
    ///
    /// # Errors
    ///
    /// Any native failure destroys the handle and surfaces translated; the
    /// next read rebuilds from scratch.
    async fn read(&mut self, size: Option<usize>) -> Result<Option<Vec<u8>>, FsError>;

    /// Reposition the session to `offset`.
    ///
    /// Destroys the current handle; the next [`read`](Self::read) reopens at
    /// `offset`.
    async fn seek(&mut self, offset: u64) -> Result<(), FsError>;

    /// Release the native handle. Idempotent.
    async fn close(&mut self) -> Result<(), FsError>;
}

/// An open-for-write session on one file.
#[async_trait]
pub trait WriteStream: Send {
    /// Write the whole payload at the session's current position.
    ///
    /// In append mode the native layer positions every write at the file's
    /// current end-of-file, even if the file grew since the session was
    /// opened. Returns the number of bytes accepted, which equals the
    /// payload length on success.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::PathExists`](crate::ErrorKind::PathExists) on the first write of an exclusive-create session whose target exists
    /// - [`ErrorKind::Syntax`](crate::ErrorKind::Syntax) if the payload does not coerce to bytes
    async fn write(&mut self, src: ByteSource) -> Result<usize, FsError>;

    /// Reposition the session to `offset`.
    ///
    /// Destroys the current handle and rebuilds it at `offset`. A zero
    /// offset reopens with overwrite (truncate) semantics; a nonzero offset
    /// positions the next write without truncating existing content.
    async fn seek(&mut self, offset: u64) -> Result<(), FsError>;

    /// Truncate the file to `len` bytes.
    ///
    /// Destroys any active handle first. Extending beyond the current size
    /// zero-fills.
    ///
    /// # Errors
    ///
    /// Always [`ErrorKind::NoModificationAllowed`](crate::ErrorKind::NoModificationAllowed) on native failure.
    async fn truncate(&mut self, len: u64) -> Result<(), FsError>;

    /// Release the native handle. Idempotent.
    async fn close(&mut self) -> Result<(), FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_are_object_safe() {
        fn _check_read(_: &dyn ReadStream) {}
        fn _check_write(_: &dyn WriteStream) {}
    }
}
