//! Byte coercion and stream piping.
//!
//! The abstract layer hands write payloads to backends in whatever
//! representation the caller produced: raw bytes, UTF-8 text, or
//! base64-encoded text. [`ByteSource`] names those representations and
//! [`to_bytes`] coerces them into the byte buffer the native layer wants.
//! The reverse direction ([`to_base64`], [`to_text`]) and a source-to-sink
//! [`pipe`] round out the capability.
//!
//! Coercion failures are reported as `InvalidInput` native errors so that the
//! translator classifies them as [`ErrorKind::Syntax`](crate::ErrorKind::Syntax).

use std::io;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::io::{AsyncRead, AsyncWrite};

/// A write payload in one of the representations the abstract layer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSource {
    /// Raw bytes, passed through untouched.
    Bytes(Vec<u8>),
    /// UTF-8 text, encoded as its bytes.
    Text(String),
    /// Base64 text, decoded with the standard alphabet.
    Base64(String),
}

impl From<Vec<u8>> for ByteSource {
    fn from(bytes: Vec<u8>) -> Self {
        ByteSource::Bytes(bytes)
    }
}

impl From<&[u8]> for ByteSource {
    fn from(bytes: &[u8]) -> Self {
        ByteSource::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ByteSource {
    fn from(bytes: &[u8; N]) -> Self {
        ByteSource::Bytes(bytes.to_vec())
    }
}

impl From<String> for ByteSource {
    fn from(text: String) -> Self {
        ByteSource::Text(text)
    }
}

impl From<&str> for ByteSource {
    fn from(text: &str) -> Self {
        ByteSource::Text(text.to_owned())
    }
}

/// Coerce a [`ByteSource`] into its byte buffer.
///
/// # Errors
///
/// Returns `InvalidInput` when a base64 payload does not decode.
pub fn to_bytes(src: ByteSource) -> io::Result<Vec<u8>> {
    match src {
        ByteSource::Bytes(bytes) => Ok(bytes),
        ByteSource::Text(text) => Ok(text.into_bytes()),
        ByteSource::Base64(encoded) => BASE64
            .decode(encoded.as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e)),
    }
}

/// Encode bytes as standard base64 text.
pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode bytes as UTF-8 text.
///
/// # Errors
///
/// Returns `InvalidInput` when the bytes are not valid UTF-8.
pub fn to_text(bytes: &[u8]) -> io::Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

/// Pipe a source into a native sink until the source is exhausted.
///
/// Returns the number of bytes moved.
///
/// # Errors
///
/// Returns the first native error raised by either side.
pub async fn pipe<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    tokio::io::copy(reader, writer).await
}
