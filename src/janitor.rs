use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use log::{debug, error};

use crate::errors::{Error, Result};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug)]
pub struct Janitor {
    // 扫描的根目录
    root: PathBuf,
    // 过期时长
    retention: Duration,
}

// 单个清理周期的结果
#[derive(Debug, Default)]
pub struct PurgeOutcome {
    pub files_deleted: u64,
    pub bytes_deleted: u64,
    pub error: Option<Error>,
}

impl Janitor {
    pub fn new(root: impl Into<PathBuf>, retention_days: u32) -> Self {
        Janitor {
            root: root.into(),
            retention: Duration::from_secs(u64::from(retention_days) * SECS_PER_DAY),
        }
    }

    // 执行一次完整的清理周期：删除过期文件，再移除因此变空的目录
    pub fn purge(&self) -> PurgeOutcome {
        let mut outcome = PurgeOutcome::default();
        // 截止时间在遍历开始前计算一次
        let Some(cutoff) = SystemTime::now().checked_sub(self.retention) else {
            // 保留期超出可表示范围，不可能有文件早于截止时间
            return outcome;
        };

        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Err(e) = self.sweep_tree(&self.root, cutoff, &mut candidates, &mut outcome) {
            error!("Purge aborted under {}: {e}", self.root.display());
            outcome.error = Some(e);
        }

        // 空目录清理对已收集的候选目录照常执行，遍历中途出错也不例外。
        // 候选按遍历顺序（父先于子）检查，因此只因子目录被移除而变空的
        // 上级目录要等到下个周期才会被清理。
        for dir in candidates {
            if let Ok(true) = is_empty(&dir) {
                if fs::remove_dir(&dir).is_ok() {
                    debug!("Removed empty directory: {}", dir.display());
                }
            }
        }

        outcome
    }

    fn sweep_tree(
        &self,
        dir: &Path,
        cutoff: SystemTime,
        candidates: &mut Vec<PathBuf>,
        outcome: &mut PurgeOutcome,
    ) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let metadata = entry.metadata()?;

            if metadata.is_dir() {
                // 根目录本身不参与清理，其下的目录全部记为候选
                candidates.push(path.clone());
                self.sweep_tree(&path, cutoff, candidates, outcome)?;
            } else if metadata.is_file() {
                let modified = metadata.modified()?;
                if modified < cutoff {
                    // 删除前先取大小
                    let size = metadata.len();
                    match fs::remove_file(&path) {
                        Ok(()) => {
                            debug!("Deleted expired file: {}", path.display());
                            outcome.files_deleted += 1;
                            outcome.bytes_deleted += size;
                        }
                        // 文件已被外部删除，跳过不计数
                        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                        Err(e) => return Err(e.into()),
                    }
                }
            }
            // 符号链接等其它条目不处理
        }

        Ok(())
    }
}

// 目录是否没有任何条目。读取失败返回错误，而不是当作“非空”
pub fn is_empty(dir: &Path) -> Result<bool> {
    match fs::read_dir(dir)?.next() {
        None => Ok(true),
        Some(entry) => {
            entry?;

            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();

        path
    }

    // 把文件修改时间拨回若干天前
    fn age_file(path: &Path, days: u64) {
        let mtime = SystemTime::now() - Duration::from_secs(days * SECS_PER_DAY);
        let file = fs::OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(mtime).unwrap();
    }

    #[test]
    fn test_purge_deletes_only_expired() {
        let tmp = TempDir::new().unwrap();
        let old = write_file(tmp.path(), "old.txt", b"0123456789");
        let new = write_file(tmp.path(), "new.txt", b"fresh");
        age_file(&old, 10);

        let janitor = Janitor::new(tmp.path(), 5);
        let outcome = janitor.purge();

        assert!(outcome.error.is_none());
        assert_eq!(outcome.files_deleted, 1);
        assert_eq!(outcome.bytes_deleted, 10);
        assert!(!old.exists());
        assert!(new.exists());

        // 第二个周期没有新过期文件
        let outcome = janitor.purge();
        assert!(outcome.error.is_none());
        assert_eq!(outcome.files_deleted, 0);
        assert_eq!(outcome.bytes_deleted, 0);
        assert!(new.exists());
    }

    #[test]
    fn test_bytes_deleted_matches_removed_sizes() {
        let tmp = TempDir::new().unwrap();
        let a = write_file(tmp.path(), "a.bin", b"abc");
        let b = write_file(tmp.path(), "b.bin", b"0123456");
        age_file(&a, 3);
        age_file(&b, 3);

        let outcome = Janitor::new(tmp.path(), 1).purge();

        assert_eq!(outcome.files_deleted, 2);
        assert_eq!(outcome.bytes_deleted, 10);
    }

    #[test]
    fn test_zero_retention_deletes_any_past_file() {
        let tmp = TempDir::new().unwrap();
        let old = write_file(tmp.path(), "old.txt", b"x");
        // 一小时前的文件在保留期为 0 天时已经过期
        let mtime = SystemTime::now() - Duration::from_secs(3600);
        let file = fs::OpenOptions::new().write(true).open(&old).unwrap();
        file.set_modified(mtime).unwrap();

        let outcome = Janitor::new(tmp.path(), 0).purge();

        assert_eq!(outcome.files_deleted, 1);
        assert!(!old.exists());
    }

    #[test]
    fn test_emptied_dir_removed_in_same_cycle() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("empty_after");
        fs::create_dir(&sub).unwrap();
        let old = write_file(&sub, "old.txt", b"stale");
        age_file(&old, 10);

        let outcome = Janitor::new(tmp.path(), 5).purge();

        assert_eq!(outcome.files_deleted, 1);
        assert!(!sub.exists());
    }

    #[test]
    fn test_nested_dir_removed_in_next_cycle() {
        // parent 只包含 child，child 只包含过期文件。
        // 第一个周期删除文件并移除 child，parent 在检查时还不为空；
        // 第二个周期才移除 parent。
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();
        let old = write_file(&child, "old.txt", b"stale");
        age_file(&old, 10);

        let janitor = Janitor::new(tmp.path(), 5);

        let outcome = janitor.purge();
        assert_eq!(outcome.files_deleted, 1);
        assert!(!child.exists());
        assert!(parent.exists());

        let outcome = janitor.purge();
        assert_eq!(outcome.files_deleted, 0);
        assert!(!parent.exists());
    }

    #[test]
    fn test_root_is_never_removed() {
        let tmp = TempDir::new().unwrap();
        let old = write_file(tmp.path(), "old.txt", b"stale");
        age_file(&old, 10);

        Janitor::new(tmp.path(), 5).purge();

        assert!(tmp.path().exists());
        assert!(is_empty(tmp.path()).unwrap());
    }

    #[test]
    fn test_missing_root_reports_error() {
        let tmp = TempDir::new().unwrap();
        let outcome = Janitor::new(tmp.path().join("missing"), 5).purge();

        assert!(outcome.error.is_some());
        assert_eq!(outcome.files_deleted, 0);
        assert_eq!(outcome.bytes_deleted, 0);
    }

    #[test]
    fn test_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(is_empty(tmp.path()).unwrap());

        // 含文件或子目录都算非空
        write_file(tmp.path(), "entry.txt", b"");
        assert!(!is_empty(tmp.path()).unwrap());

        let with_dir = TempDir::new().unwrap();
        fs::create_dir(with_dir.path().join("sub")).unwrap();
        assert!(!is_empty(with_dir.path()).unwrap());

        // 读取失败是错误，不是“非空”
        assert!(is_empty(&tmp.path().join("missing")).is_err());
    }
}
