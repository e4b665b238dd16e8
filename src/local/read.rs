//! The streaming read engine.

use std::io::SeekFrom;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::{ErrorKind, FsError, translate};
use crate::{DEFAULT_BUFFER_SIZE, OpenReadOptions, ReadStream};

/// An open-for-read session against one local file.
///
/// Owns zero-or-one native handle. The handle is built lazily on the first
/// read (at offset 0, or wherever the last [`seek`](ReadStream::seek)
/// pointed), rebuilt after a seek, and destroyed on close, on end-of-data,
/// and on any native failure. A destroyed handle is never reused: the next
/// read rebuilds from scratch, which also means a read issued after
/// end-of-stream starts over from the last seek target.
pub struct LocalReadStream {
    repository: String,
    path: String,
    full_path: PathBuf,
    buffer_size: usize,
    /// Offset the next handle build opens at. Set by seek; sequential reads
    /// advance the native cursor, not this field.
    offset: u64,
    file: Option<File>,
    closed: bool,
}

impl LocalReadStream {
    pub(crate) fn new(
        repository: String,
        path: String,
        full_path: PathBuf,
        options: OpenReadOptions,
    ) -> Self {
        let buffer_size = if options.buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            options.buffer_size
        };
        Self {
            repository,
            path,
            full_path,
            buffer_size,
            offset: options.start.unwrap_or(0),
            file: None,
            closed: false,
        }
    }

    fn check_open(&self) -> Result<(), FsError> {
        if self.closed {
            return Err(
                FsError::new(ErrorKind::InvalidState, &self.repository, &self.path)
                    .with_detail("read session is closed"),
            );
        }
        Ok(())
    }

    /// Open a fresh handle at the session's current offset.
    ///
    /// A failure while positioning drops the partially-built handle before
    /// the error is raised.
    async fn build(&self) -> Result<File, FsError> {
        tracing::trace!(path = %self.path, offset = self.offset, "opening read handle");
        let mut file = File::open(&self.full_path)
            .await
            .map_err(|e| translate(&self.repository, &self.path, e, false))?;
        if self.offset > 0 {
            file.seek(SeekFrom::Start(self.offset))
                .await
                .map_err(|e| translate(&self.repository, &self.path, e, false))?;
        }
        Ok(file)
    }
}

#[async_trait]
impl ReadStream for LocalReadStream {
    async fn read(&mut self, size: Option<usize>) -> Result<Option<Vec<u8>>, FsError> {
        self.check_open()?;
        let want = match size {
            Some(n) if n > 0 => n,
            _ => self.buffer_size,
        };
        let mut file = match self.file.take() {
            Some(file) => file,
            None => self.build().await?,
        };
        // Refill in chunks of at most buffer_size until the requested count
        // is filled or the source is exhausted. Native reads may come back
        // short at any point, so the count is honored across chunk
        // boundaries here, not by the native layer.
        let mut buf = vec![0u8; want];
        let mut filled = 0;
        while filled < want {
            let chunk_end = want.min(filled + self.buffer_size);
            match file.read(&mut buf[filled..chunk_end]).await {
                Ok(0) => break,
                Ok(n) => filled += n,
                // The taken handle drops here, destroying it.
                Err(e) => return Err(translate(&self.repository, &self.path, e, false)),
            }
        }
        if filled == 0 {
            // End-of-data releases the handle; the next read rebuilds.
            return Ok(None);
        }
        buf.truncate(filled);
        self.file = Some(file);
        Ok(Some(buf))
    }

    async fn seek(&mut self, offset: u64) -> Result<(), FsError> {
        self.check_open()?;
        // No eager reopen: the next read is guaranteed to reflect exactly
        // this offset, and the session never holds two descriptors.
        self.file = None;
        self.offset = offset;
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

    fn stream_for(dir: &tempfile::TempDir, name: &str, options: OpenReadOptions) -> LocalReadStream {
        LocalReadStream::new(
            dir.path().display().to_string(),
            format!("/{name}"),
            dir.path().join(name),
            options,
        )
    }

    #[tokio::test]
    async fn construction_does_no_io() {
        let dir = tempfile::tempdir().unwrap();
        // Binding a session to a missing file is fine; the first read fails.
        let mut stream = stream_for(&dir, "missing.bin", OpenReadOptions::default());
        let err = stream.read(None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn read_fills_requested_count_across_chunks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.bin"), vec![7u8; 10_000]).unwrap();
        let options = OpenReadOptions {
            buffer_size: 1024,
            start: None,
        };
        let mut stream = stream_for(&dir, "data.bin", options);
        let chunk = stream.read(Some(4096)).await.unwrap().unwrap();
        assert_eq!(chunk.len(), 4096);
    }

    #[tokio::test]
    async fn seek_repositions_next_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.bin"), b"0123456789").unwrap();
        let mut stream = stream_for(&dir, "data.bin", OpenReadOptions::default());
        stream.seek(6).await.unwrap();
        let chunk = stream.read(None).await.unwrap().unwrap();
        assert_eq!(chunk, b"6789");
    }

    #[tokio::test]
    async fn read_after_close_is_invalid_state() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.bin"), b"abc").unwrap();
        let mut stream = stream_for(&dir, "data.bin", OpenReadOptions::default());
        stream.close().await.unwrap();
        stream.close().await.unwrap();
        let err = stream.read(None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
