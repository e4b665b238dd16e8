//! The local on-disk backend.
//!
//! Concrete realization of the capability traits over native filesystem
//! calls: [`LocalFs`] is the root, [`LocalFile`] / [`LocalDirectory`] are the
//! entities it binds, and [`LocalReadStream`] / [`LocalWriteStream`] are the
//! stream sessions the file entity constructs.

mod dir;
mod file;
mod fs;
mod read;
mod write;

pub use dir::LocalDirectory;
pub use file::LocalFile;
pub use fs::LocalFs;
pub use read::LocalReadStream;
pub use write::LocalWriteStream;
