//! # omnifs-local
//!
//! Local on-disk backend for the **OmniFS capability-based virtual
//! filesystem interface**.
//!
//! The crate has two halves:
//!
//! - The capability traits the abstract filesystem layer consumes:
//!   [`Vfs`], [`VfsFile`], [`VfsDirectory`], [`ReadStream`], [`WriteStream`].
//! - One concrete implementation backed by native filesystem calls:
//!   [`LocalFs`] and the entities and stream sessions it hands out.
//!
//! Every native failure is translated at the boundary where it is caught
//! into the closed [`ErrorKind`] taxonomy; raw native errors never reach the
//! abstract layer (they remain available as the [`FsError`] source for
//! diagnostics).
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use omnifs_local::{
//!     ByteSource, LocalFs, OpenReadOptions, OpenWriteOptions, ReadStream, Vfs, VfsFile,
//!     WriteStream,
//! };
//!
//! # async fn demo() -> Result<(), omnifs_local::FsError> {
//! let fs = LocalFs::new("/srv/data").await?;
//!
//! let file = fs.file("/reports/2026.csv");
//! let mut writer = file.open_write(OpenWriteOptions::OVERWRITE).await?;
//! writer.write(ByteSource::from("id,total\n")).await?;
//! writer.close().await?;
//!
//! let mut reader = file.open_read(OpenReadOptions::default()).await?;
//! while let Some(chunk) = reader.read(None).await? {
//!     println!("{} bytes", chunk.len());
//! }
//! reader.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Stream Sessions
//!
//! A session owns at most one native handle, built lazily and rebuilt on
//! demand. Seeking a read session drops the handle and remembers the offset;
//! the next read reopens exactly there. Write sessions derive their handle
//! flags from two orthogonal booleans on [`OpenWriteOptions`]: `append`
//! (every write positioned at the current end-of-file by the native layer)
//! and `create` (exclusive create). Close is idempotent; any operation after
//! close fails with [`ErrorKind::InvalidState`].
//!
//! ## Concurrency
//!
//! All native I/O is asynchronous; nothing blocks the scheduling thread.
//! A session supports one in-flight operation at a time: the backend does
//! not queue overlapping calls, and stream methods take `&mut self` so the
//! borrow checker enforces the discipline for direct users. Operations on
//! distinct paths or entities are fully independent. Closing a session is
//! the only cancellation mechanism: once the handle is dropped, no late
//! native completion can be observed.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Enable serialization for [`Stats`], [`Props`], and the open-option types |

pub mod converter;
mod error;
mod local;
pub mod path;
mod traits;
mod types;

// Error taxonomy and translation
pub use error::{ErrorKind, FsError, translate};

// Capability traits
pub use traits::{ReadStream, Vfs, VfsDirectory, VfsFile, WriteStream};

// Core types
pub use converter::ByteSource;
pub use types::{
    DEFAULT_BUFFER_SIZE, OpenReadOptions, OpenWriteOptions, Props, Stats, UrlKind,
};

// The local backend
pub use local::{LocalDirectory, LocalFile, LocalFs, LocalReadStream, LocalWriteStream};
