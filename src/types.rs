//! Core data types for the OmniFS local backend.

use std::fmt;
use std::time::SystemTime;

/// Default chunk size used by the streaming engines (64 KiB).
///
/// Reads refill in chunks of at most the session's buffer size, and a
/// `read(None)` returns at most one chunk of this size.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Metadata for a filesystem entry, as returned by [`Vfs::head`](crate::Vfs::head).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Size in bytes. Omitted for directories.
    pub size: Option<u64>,
    /// Last access time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub accessed: SystemTime,
    /// Last modification time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub modified: SystemTime,
}

/// Timestamp patch payload for [`Vfs::patch`](crate::Vfs::patch).
///
/// Both timestamps are optional in the abstract interface, but this backend
/// requires both to be present and rejects partial patches with
/// [`ErrorKind::InvalidState`](crate::ErrorKind::InvalidState).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Props {
    /// New last access time.
    #[cfg_attr(feature = "serde", serde(with = "opt_system_time_serde"))]
    pub accessed: Option<SystemTime>,
    /// New last modification time.
    #[cfg_attr(feature = "serde", serde(with = "opt_system_time_serde"))]
    pub modified: Option<SystemTime>,
}

/// Options for opening a read session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenReadOptions {
    /// Chunk size for internal refills.
    pub buffer_size: usize,
    /// Initial byte offset. `None` starts at the beginning.
    pub start: Option<u64>,
}

impl Default for OpenReadOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            start: None,
        }
    }
}

/// Options for opening a write session.
///
/// `append` and `create` compose orthogonally:
///
/// | `append` | `create` | Semantics |
/// |----------|----------|-----------|
/// | false | false | overwrite (create if missing, truncate if present) |
/// | true  | false | append to end-of-file (create if missing) |
/// | false | true  | exclusive create (fail if the target exists) |
/// | true  | true  | exclusive create, positioned at end-of-file |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenWriteOptions {
    /// Chunk size hint for internal buffering.
    pub buffer_size: usize,
    /// Initial byte offset for non-append sessions. A nonzero offset
    /// positions the first write without truncating existing content.
    pub start: Option<u64>,
    /// Position every write at the file's current end-of-file.
    pub append: bool,
    /// Fail with a path-exists error if the target already exists.
    pub create: bool,
}

impl OpenWriteOptions {
    /// Overwrite from the start: create if missing, truncate if present.
    pub const OVERWRITE: Self = Self {
        buffer_size: DEFAULT_BUFFER_SIZE,
        start: None,
        append: false,
        create: false,
    };

    /// Append to end-of-file, creating the file if missing.
    pub const APPEND: Self = Self {
        buffer_size: DEFAULT_BUFFER_SIZE,
        start: None,
        append: true,
        create: false,
    };

    /// Exclusive create: fail if the target already exists.
    pub const CREATE_NEW: Self = Self {
        buffer_size: DEFAULT_BUFFER_SIZE,
        start: None,
        append: false,
        create: true,
    };

    /// Exclusive create, positioned at end-of-file.
    pub const CREATE_NEW_APPEND: Self = Self {
        buffer_size: DEFAULT_BUFFER_SIZE,
        start: None,
        append: true,
        create: true,
    };
}

impl Default for OpenWriteOptions {
    fn default() -> Self {
        Self::OVERWRITE
    }
}

/// Kind of URL requested from [`Vfs::to_url`](crate::Vfs::to_url).
///
/// Only [`UrlKind::Get`] is supported by the local backend; the other kinds
/// exist for backends that issue presigned upload/delete URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UrlKind {
    /// A URL the holder can read from.
    Get,
    /// A URL the holder can create content at.
    Post,
    /// A URL the holder can overwrite content at.
    Put,
    /// A URL the holder can delete content at.
    Delete,
}

impl UrlKind {
    /// Stable textual name for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            UrlKind::Get => "GET",
            UrlKind::Post => "POST",
            UrlKind::Put => "PUT",
            UrlKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde support for `SystemTime` (when the serde feature is enabled).
#[cfg(feature = "serde")]
mod system_time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        (duration.as_secs(), duration.subsec_nanos()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos): (u64, u32) = Deserialize::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::new(secs, nanos))
    }
}

/// Serde support for `Option<SystemTime>` (when the serde feature is enabled).
#[cfg(feature = "serde")]
mod opt_system_time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &Option<SystemTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time.map(|t| {
            let duration = t.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
            (duration.as_secs(), duration.subsec_nanos())
        })
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SystemTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parts: Option<(u64, u32)> = Deserialize::deserialize(deserializer)?;
        Ok(parts.map(|(secs, nanos)| UNIX_EPOCH + Duration::new(secs, nanos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_options_default() {
        let opts = OpenReadOptions::default();
        assert_eq!(opts.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(opts.start, None);
    }

    #[test]
    fn write_options_default_is_overwrite() {
        let opts = OpenWriteOptions::default();
        assert!(!opts.append);
        assert!(!opts.create);
        assert_eq!(opts.start, None);
    }

    #[test]
    fn write_mode_constants_compose() {
        assert!(OpenWriteOptions::APPEND.append);
        assert!(!OpenWriteOptions::APPEND.create);

        assert!(!OpenWriteOptions::CREATE_NEW.append);
        assert!(OpenWriteOptions::CREATE_NEW.create);

        assert!(OpenWriteOptions::CREATE_NEW_APPEND.append);
        assert!(OpenWriteOptions::CREATE_NEW_APPEND.create);
    }

    #[test]
    fn url_kind_names() {
        assert_eq!(UrlKind::Get.as_str(), "GET");
        assert_eq!(UrlKind::Delete.to_string(), "DELETE");
    }

    #[test]
    fn props_default_is_empty() {
        let props = Props::default();
        assert!(props.accessed.is_none());
        assert!(props.modified.is_none());
    }

    #[test]
    fn types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Stats>();
        assert_send_sync::<Props>();
        assert_send_sync::<OpenReadOptions>();
        assert_send_sync::<OpenWriteOptions>();
        assert_send_sync::<UrlKind>();
    }
}
