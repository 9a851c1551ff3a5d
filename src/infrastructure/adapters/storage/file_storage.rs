//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait，所有文件平铺在同一目录下

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;

use crate::application::ports::{AudioStorageError, AudioStoragePort, CleanupReport, StoredAudio};
use crate::domain::narration::AudioFileName;

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, AudioStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    fn path_for(&self, name: &AudioFileName) -> PathBuf {
        self.base_dir.join(name.as_str())
    }

    async fn save(&self, name: &AudioFileName, data: &[u8]) -> Result<PathBuf, AudioStorageError> {
        let path = self.path_for(name);

        fs::write(&path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::debug!("Saved audio: file={}, size={} bytes", name, data.len());

        Ok(path)
    }

    async fn discard(&self, name: &AudioFileName) {
        match fs::remove_file(self.path_for(name)).await {
            Ok(()) => tracing::debug!("Discarded partial audio: file={}", name),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to discard audio {}: {}", name, e),
        }
    }

    async fn find(&self, name: &AudioFileName) -> Result<Option<StoredAudio>, AudioStorageError> {
        let path = self.path_for(name);

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(Some(StoredAudio {
                path,
                size_bytes: metadata.len(),
            })),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AudioStorageError::IoError(e.to_string())),
        }
    }

    async fn read_text(&self, name: &AudioFileName) -> Result<String, AudioStorageError> {
        fs::read_to_string(self.path_for(name))
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AudioStorageError::FileNotFound(name.to_string()),
                _ => AudioStorageError::IoError(e.to_string()),
            })
    }

    async fn cleanup(&self, max_age: Duration) -> Result<CleanupReport, AudioStorageError> {
        let mut report = CleanupReport::default();
        let mut expired = Vec::new();
        let now = SystemTime::now();

        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?
        {
            let path = entry.path();

            // 列出后可能已被并发删除
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!("Failed to stat {}: {}", path.display(), e);
                    report.failed += 1;
                    continue;
                }
            };

            if !metadata.is_file() {
                continue;
            }
            report.scanned += 1;

            // 修改时间在未来时按刚创建处理
            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or(Duration::ZERO);

            if age >= max_age {
                expired.push((path, metadata.len()));
            }
        }

        sweep(expired, &mut report).await;

        Ok(report)
    }
}

/// 单个过期文件的删除结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoveOutcome {
    Deleted,
    /// 列出后已被删除
    Vanished,
    Failed,
}

async fn remove_expired(path: &Path) -> RemoveOutcome {
    match fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!("Deleted expired audio: {}", path.display());
            RemoveOutcome::Deleted
        }
        Err(e) if e.kind() == ErrorKind::NotFound => RemoveOutcome::Vanished,
        Err(e) => {
            tracing::warn!("Failed to delete {}: {}", path.display(), e);
            RemoveOutcome::Failed
        }
    }
}

/// 逐个删除过期文件，单个失败不影响其余文件
async fn sweep(expired: Vec<(PathBuf, u64)>, report: &mut CleanupReport) {
    for (path, size) in expired {
        match remove_expired(&path).await {
            RemoveOutcome::Deleted => {
                report.deleted += 1;
                report.freed_bytes += size;
            }
            RemoveOutcome::Vanished => {}
            RemoveOutcome::Failed => report.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::narration::AudioFormat;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_find_and_discard() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();

        let name = AudioFileName::generate(AudioFormat::Mp3);
        let path = storage.save(&name, b"fake mp3 data").await.unwrap();
        assert!(path.exists());
        assert_eq!(path.parent().unwrap(), storage.base_dir());

        let stored = storage.find(&name).await.unwrap().unwrap();
        assert_eq!(stored.size_bytes, 13);
        assert_eq!(stored.path, path);

        storage.discard(&name).await;
        assert!(storage.find(&name).await.unwrap().is_none());

        // 重复丢弃不报错
        storage.discard(&name).await;
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        FileAudioStorage::new(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_find_ignores_directories() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        std::fs::create_dir(temp_dir.path().join("story_dir.mp3")).unwrap();

        let name = AudioFileName::parse("story_dir.mp3").unwrap();
        assert!(storage.find(&name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_text() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "hello").unwrap();

        let name = AudioFileName::parse("notes.txt").unwrap();
        assert_eq!(storage.read_text(&name).await.unwrap(), "hello");

        let missing = AudioFileName::parse("missing.txt").unwrap();
        assert!(matches!(
            storage.read_text(&missing).await,
            Err(AudioStorageError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_cleanup_zero_and_unbounded() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();

        for _ in 0..3 {
            let name = AudioFileName::generate(AudioFormat::Wav);
            storage.save(&name, b"data").await.unwrap();
        }
        std::fs::create_dir(temp_dir.path().join("subdir")).unwrap();

        let report = storage.cleanup(Duration::MAX).await.unwrap();
        assert_eq!(report.scanned, 3);
        assert_eq!(report.deleted, 0);

        let report = storage.cleanup(Duration::ZERO).await.unwrap();
        assert_eq!(report.deleted, 3);
        assert_eq!(report.freed_bytes, 12);
        assert_eq!(report.failed, 0);

        // 子目录不受影响
        assert!(temp_dir.path().join("subdir").is_dir());
    }

    #[tokio::test]
    async fn test_cleanup_respects_age_threshold() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();

        let old = temp_dir.path().join("story_old.mp3");
        let fresh = temp_dir.path().join("story_fresh.mp3");
        std::fs::write(&old, b"old").unwrap();
        std::fs::write(&fresh, b"fresh").unwrap();

        let two_days_ago = SystemTime::now() - Duration::from_secs(48 * 3600);
        std::fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(two_days_ago)
            .unwrap();

        let report = storage
            .cleanup(Duration::from_secs(24 * 3600))
            .await
            .unwrap();
        assert_eq!(report.scanned, 2);
        assert_eq!(report.deleted, 1);
        assert!(!old.exists());
        assert!(fresh.exists());
    }

    #[tokio::test]
    async fn test_remove_expired_outcomes() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("story_a.mp3");
        std::fs::write(&file, b"a").unwrap();

        assert_eq!(remove_expired(&file).await, RemoveOutcome::Deleted);
        assert_eq!(remove_expired(&file).await, RemoveOutcome::Vanished);
        // 目录无法用 remove_file 删除
        assert_eq!(remove_expired(temp_dir.path()).await, RemoveOutcome::Failed);
    }

    #[tokio::test]
    async fn test_sweep_ignores_vanished_files() {
        let temp_dir = tempdir().unwrap();
        let mut report = CleanupReport::default();

        sweep(
            vec![(temp_dir.path().join("story_gone.mp3"), 10)],
            &mut report,
        )
        .await;

        assert_eq!(report.deleted, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(report.freed_bytes, 0);
    }

    #[tokio::test]
    async fn test_sweep_continues_after_failure() {
        let temp_dir = tempdir().unwrap();
        let first = temp_dir.path().join("story_first.mp3");
        let last = temp_dir.path().join("story_last.mp3");
        let stuck = temp_dir.path().join("story_stuck");
        std::fs::write(&first, b"111").unwrap();
        std::fs::write(&last, b"22").unwrap();
        std::fs::create_dir(&stuck).unwrap();

        let mut report = CleanupReport::default();
        sweep(
            vec![(first.clone(), 3), (stuck.clone(), 0), (last.clone(), 2)],
            &mut report,
        )
        .await;

        assert_eq!(report.deleted, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.freed_bytes, 5);
        assert!(!first.exists());
        assert!(!last.exists());
        assert!(stuck.is_dir());
    }
}
