//! The streaming write engine.

use std::io::SeekFrom;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

use crate::converter::{self, ByteSource};
use crate::error::{ErrorKind, FsError, translate};
use crate::{OpenWriteOptions, WriteStream};

/// An open-for-write session against one local file.
///
/// Owns zero-or-one native handle, built on the first write (or eagerly on
/// [`seek`](WriteStream::seek)) with flags derived from the session's
/// [`OpenWriteOptions`]: `create` selects exclusive-create, `append` opens
/// the handle in native append mode so the filesystem itself positions every
/// write at the current end-of-file, tolerating concurrent growth. In
/// non-append mode a nonzero start offset opens without truncation and
/// positions explicitly, while a zero or absent offset opens with overwrite
/// (truncate) semantics.
pub struct LocalWriteStream {
    repository: String,
    path: String,
    full_path: PathBuf,
    options: OpenWriteOptions,
    /// Explicit start offset for the next handle build in non-append mode.
    /// Consumed by the first build; later writes continue at the native
    /// cursor.
    pending: Option<u64>,
    file: Option<File>,
    closed: bool,
}

impl LocalWriteStream {
    pub(crate) fn new(
        repository: String,
        path: String,
        full_path: PathBuf,
        options: OpenWriteOptions,
    ) -> Self {
        Self {
            repository,
            path,
            full_path,
            pending: options.start,
            options,
            file: None,
            closed: false,
        }
    }

    fn check_open(&self) -> Result<(), FsError> {
        if self.closed {
            return Err(
                FsError::new(ErrorKind::InvalidState, &self.repository, &self.path)
                    .with_detail("write session is closed"),
            );
        }
        Ok(())
    }

    fn translate_write(&self, err: std::io::Error) -> FsError {
        translate(&self.repository, &self.path, err, true)
    }

    /// Truncation has no read interpretation; its failures bypass the
    /// generic code table.
    fn no_modification(&self, err: std::io::Error) -> FsError {
        FsError::new(
            ErrorKind::NoModificationAllowed,
            &self.repository,
            &self.path,
        )
        .with_source(err)
    }

    /// Open a fresh handle positioned for the next write.
    ///
    /// A failure while positioning drops the partially-built handle before
    /// the error is raised.
    async fn build(&self, start: Option<u64>) -> Result<File, FsError> {
        tracing::trace!(
            path = %self.path,
            start,
            append = self.options.append,
            create = self.options.create,
            "opening write handle",
        );
        let mut opts = OpenOptions::new();
        opts.write(true);
        if self.options.create {
            opts.create_new(true);
        } else {
            opts.create(true);
        }
        if self.options.append {
            opts.append(true);
        } else if start.unwrap_or(0) == 0 {
            opts.truncate(true);
        }
        let mut file = opts
            .open(&self.full_path)
            .await
            .map_err(|e| self.translate_write(e))?;
        if !self.options.append {
            if let Some(offset) = start.filter(|&o| o > 0) {
                file.seek(SeekFrom::Start(offset))
                    .await
                    .map_err(|e| self.translate_write(e))?;
            }
        }
        Ok(file)
    }
}

#[async_trait]
impl WriteStream for LocalWriteStream {
    async fn write(&mut self, src: ByteSource) -> Result<usize, FsError> {
        self.check_open()?;
        let bytes = converter::to_bytes(src).map_err(|e| self.translate_write(e))?;
        let mut file = match self.file.take() {
            Some(file) => file,
            None => {
                let start = if self.options.append {
                    // End-of-file discovery is the native layer's job.
                    None
                } else {
                    self.pending.take()
                };
                self.build(start).await?
            }
        };
        // On failure the taken handle drops here, destroying it.
        if let Err(e) = file.write_all(&bytes).await {
            return Err(self.translate_write(e));
        }
        // The native handle buffers internally; flush so that this call is
        // the failure signal for the whole payload. A short write cannot
        // survive this point, so the accepted count equals the input length.
        if let Err(e) = file.flush().await {
            return Err(self.translate_write(e));
        }
        self.file = Some(file);
        Ok(bytes.len())
    }

    async fn seek(&mut self, offset: u64) -> Result<(), FsError> {
        self.check_open()?;
        // A native write handle is write-once-position; repositioning takes
        // a fresh one.
        self.file = None;
        self.pending = None;
        let file = self.build(Some(offset)).await?;
        self.file = Some(file);
        Ok(())
    }

    async fn truncate(&mut self, len: u64) -> Result<(), FsError> {
        self.check_open()?;
        // An open write handle and a truncate on the same file do not
        // compose; drop it first.
        self.file = None;
        let file = OpenOptions::new()
            .write(true)
            .open(&self.full_path)
            .await
            .map_err(|e| self.no_modification(e))?;
        file.set_len(len).await.map_err(|e| self.no_modification(e))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), FsError> {
        self.file = None;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_for(
        dir: &tempfile::TempDir,
        name: &str,
        options: OpenWriteOptions,
    ) -> LocalWriteStream {
        LocalWriteStream::new(
            dir.path().display().to_string(),
            format!("/{name}"),
            dir.path().join(name),
            options,
        )
    }

    #[tokio::test]
    async fn exclusive_create_rejects_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("taken.bin"), b"original").unwrap();
        let mut stream = stream_for(&dir, "taken.bin", OpenWriteOptions::CREATE_NEW);
        let err = stream.write(ByteSource::from("clobber")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathExists);
        // The failed open must not have touched the target.
        let kept = std::fs::read(dir.path().join("taken.bin")).unwrap();
        assert_eq!(kept, b"original");
    }

    #[tokio::test]
    async fn overwrite_truncates_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.bin"), b"long old content").unwrap();
        let mut stream = stream_for(&dir, "f.bin", OpenWriteOptions::OVERWRITE);
        assert_eq!(stream.write(ByteSource::from("new")).await.unwrap(), 3);
        stream.close().await.unwrap();
        assert_eq!(std::fs::read(dir.path().join("f.bin")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn seek_nonzero_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.bin"), b"0123456789").unwrap();
        let mut stream = stream_for(
            &dir,
            "f.bin",
            OpenWriteOptions {
                start: Some(4),
                ..OpenWriteOptions::OVERWRITE
            },
        );
        stream.write(ByteSource::from("AB")).await.unwrap();
        stream.close().await.unwrap();
        assert_eq!(std::fs::read(dir.path().join("f.bin")).unwrap(), b"0123AB6789");
    }

    #[tokio::test]
    async fn truncate_failure_is_no_modification_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut stream = stream_for(&dir, "missing.bin", OpenWriteOptions::OVERWRITE);
        let err = stream.truncate(5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoModificationAllowed);
    }

    #[tokio::test]
    async fn write_after_close_is_invalid_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut stream = stream_for(&dir, "f.bin", OpenWriteOptions::OVERWRITE);
        stream.close().await.unwrap();
        stream.close().await.unwrap();
        let err = stream.write(ByteSource::from("late")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
