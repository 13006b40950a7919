//! 临时工作区 - 基础设施层
//!
//! 持有一次处理专用的临时目录，离开作用域时自动删除

use crate::error::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// 临时工作区
///
/// 职责：
/// - 独占一个临时目录，整个生命周期只属于一次处理
/// - 只暴露目录路径，不认识成员命名规则
/// - Drop 时从最深层开始逐个删除，单个删除失败只记警告
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// 以指定前缀创建新的工作区
    pub fn create(prefix: &str) -> AppResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .map_err(|e| AppError::create_dir_failed(format!("{}*", prefix), e))?;

        debug!("创建工作区: {}", dir.path().display());
        Ok(Self { dir })
    }

    /// 工作区根目录
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// 工作区中某个成员文件的路径
    pub fn member_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        remove_tree(self.dir.path());
        debug!("释放工作区: {}", self.dir.path().display());
    }
}

/// 删除整个目录树，深层条目优先
///
/// 删除失败只记录警告，不会向上传播。
pub fn remove_tree(root: &Path) {
    if !root.exists() {
        return;
    }

    let mut entries = Vec::new();
    collect_entries(root, &mut entries);
    entries.push(root.to_path_buf());

    // 子路径的字典序总大于父路径，倒序即深层优先
    entries.sort();
    for path in entries.iter().rev() {
        let is_dir = fs::symlink_metadata(path)
            .map(|m| m.is_dir())
            .unwrap_or(false);
        let result = if is_dir {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        if let Err(e) = result {
            warn!("⚠️ 删除失败: {} - {}", path.display(), e);
        }
    }
}

fn collect_entries(dir: &Path, entries: &mut Vec<PathBuf>) {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!("⚠️ 读取目录失败: {} - {}", dir.display(), e);
            return;
        }
    };

    for entry in read_dir.flatten() {
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            collect_entries(&path, entries);
        }
        entries.push(path);
    }
}
