//! The local filesystem root.

use std::fs::FileTimes;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use url::Url;

use super::{LocalDirectory, LocalFile};
use crate::error::{ErrorKind, FsError, translate};
use crate::path::full_path;
use crate::{Props, Stats, UrlKind, Vfs, VfsDirectory, VfsFile};

/// The local on-disk filesystem, rooted at one repository directory.
///
/// All logical paths handed to entities and sessions resolve under the root
/// fixed here at construction. The root is immutable for the lifetime of the
/// value; the repository name reported in errors is the root's display
/// string.
pub struct LocalFs {
    repository: String,
    root: PathBuf,
}

impl LocalFs {
    /// Mount a repository rooted at `root`.
    ///
    /// A relative root is resolved against the current working directory,
    /// and the root directory is created (recursively) if missing.
    ///
    /// # Errors
    ///
    /// Translated native errors from creating the root directory.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, FsError> {
        let input = root.as_ref();
        let root = std::path::absolute(input)
            .map_err(|e| translate(&input.display().to_string(), "/", e, false))?;
        let repository = root.display().to_string();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| translate(&repository, "/", e, true))?;
        Ok(Self { repository, root })
    }

    /// The native root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl Vfs for LocalFs {
    fn repository(&self) -> &str {
        &self.repository
    }

    async fn head(&self, path: &str) -> Result<Stats, FsError> {
        let full = full_path(&self.root, path);
        let meta = tokio::fs::metadata(&full)
            .await
            .map_err(|e| translate(&self.repository, path, e, false))?;
        let accessed = meta
            .accessed()
            .map_err(|e| translate(&self.repository, path, e, false))?;
        let modified = meta
            .modified()
            .map_err(|e| translate(&self.repository, path, e, false))?;
        Ok(Stats {
            size: if meta.is_dir() { None } else { Some(meta.len()) },
            accessed,
            modified,
        })
    }

    async fn patch(&self, path: &str, props: Props) -> Result<(), FsError> {
        let Some(accessed) = props.accessed else {
            return Err(FsError::new(ErrorKind::InvalidState, &self.repository, path)
                .with_detail("no accessed time"));
        };
        let Some(modified) = props.modified else {
            return Err(FsError::new(ErrorKind::InvalidState, &self.repository, path)
                .with_detail("no modified time"));
        };
        let full = full_path(&self.root, path);
        let times = FileTimes::new()
            .set_accessed(accessed)
            .set_modified(modified);
        // No async wrapper exists for the set-times call; hand the blocking
        // native call to the runtime the same way tokio::fs does.
        let result = tokio::task::spawn_blocking(move || {
            let file = std::fs::File::open(&full)?;
            file.set_times(times)
        })
        .await
        .map_err(io::Error::other)
        .and_then(|r| r);
        result.map_err(|e| translate(&self.repository, path, e, true))
    }

    fn to_url(&self, path: &str, kind: UrlKind) -> Result<String, FsError> {
        if kind != UrlKind::Get {
            return Err(
                FsError::new(ErrorKind::NotSupported, &self.repository, path)
                    .with_detail(format!("\"{kind}\" is not supported")),
            );
        }
        let full = full_path(&self.root, path);
        let url = Url::from_file_path(&full).map_err(|()| {
            FsError::new(ErrorKind::Syntax, &self.repository, path)
                .with_detail("path does not form a file URL")
        })?;
        Ok(url.to_string())
    }

    fn file(&self, path: &str) -> Box<dyn VfsFile> {
        Box::new(LocalFile::new(
            self.repository.clone(),
            self.root.clone(),
            path,
        ))
    }

    fn directory(&self, path: &str) -> Box<dyn VfsDirectory> {
        Box::new(LocalDirectory::new(
            self.repository.clone(),
            self.root.clone(),
            path,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    async fn mounted() -> (tempfile::TempDir, LocalFs) {
        let tmp = tempfile::tempdir().unwrap();
        let fs = LocalFs::new(tmp.path().join("repo")).await.unwrap();
        (tmp, fs)
    }

    #[tokio::test]
    async fn new_creates_the_root() {
        let (tmp, fs) = mounted().await;
        assert!(tmp.path().join("repo").is_dir());
        assert_eq!(fs.root(), tmp.path().join("repo"));
    }

    #[tokio::test]
    async fn head_reports_file_size_and_omits_directory_size() {
        let (_tmp, fs) = mounted().await;
        std::fs::write(fs.root().join("f.bin"), vec![0u8; 321]).unwrap();
        std::fs::create_dir(fs.root().join("d")).unwrap();

        let file_stats = fs.head("/f.bin").await.unwrap();
        assert_eq!(file_stats.size, Some(321));

        let dir_stats = fs.head("/d").await.unwrap();
        assert_eq!(dir_stats.size, None);
    }

    #[tokio::test]
    async fn head_missing_entry_is_not_found() {
        let (_tmp, fs) = mounted().await;
        let err = fs.head("/nothing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.path(), "/nothing");
    }

    #[tokio::test]
    async fn patch_rejects_partial_props() {
        let (_tmp, fs) = mounted().await;
        let err = fs
            .patch(
                "/f",
                Props {
                    accessed: None,
                    modified: Some(SystemTime::now()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn patch_applies_both_timestamps() {
        let (_tmp, fs) = mounted().await;
        std::fs::write(fs.root().join("f.bin"), b"x").unwrap();
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        fs.patch(
            "/f.bin",
            Props {
                accessed: Some(stamp),
                modified: Some(stamp),
            },
        )
        .await
        .unwrap();
        let stats = fs.head("/f.bin").await.unwrap();
        assert_eq!(stats.modified, stamp);
    }

    #[tokio::test]
    async fn to_url_serves_get_only() {
        let (_tmp, fs) = mounted().await;
        let url = fs.to_url("/a/b.txt", UrlKind::Get).unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/a/b.txt"));

        let err = fs.to_url("/a/b.txt", UrlKind::Put).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }
}
