//! 归档解压
//!
//! 把 .d3w（ZIP 格式）解压到目录，并按命名规则列出数据成员

use crate::error::{AppError, AppResult, ArchiveError};
use crate::infrastructure::Workspace;
use crate::models::member::MemberName;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 目录中的一个数据成员
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMember {
    pub name: MemberName,
    pub path: PathBuf,
}

/// 把归档解压到 `output_dir`，目录不存在时自动创建
///
/// 条目按归档内的原始顺序写出；之后的处理都按成员名重新排序。
pub fn extract(archive_path: &Path, output_dir: &Path) -> AppResult<PathBuf> {
    fs::create_dir_all(output_dir)
        .map_err(|e| AppError::create_dir_failed(output_dir.display().to_string(), e))?;

    let file = File::open(archive_path)
        .map_err(|e| AppError::file_read_failed(archive_path.display().to_string(), e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| ArchiveError::OpenFailed {
        path: archive_path.display().to_string(),
        source,
    })?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| ArchiveError::EntryReadFailed {
                name: format!("#{}", index),
                source,
            })?;

        let relative = entry
            .enclosed_name()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| ArchiveError::UnsafeEntryName {
                name: entry.name().to_string(),
            })?;
        let target = output_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| AppError::create_dir_failed(target.display().to_string(), e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::create_dir_failed(parent.display().to_string(), e))?;
        }

        let mut out = File::create(&target)
            .map_err(|e| AppError::file_write_failed(target.display().to_string(), e))?;
        io::copy(&mut entry, &mut out)
            .map_err(|e| AppError::file_write_failed(target.display().to_string(), e))?;

        debug!("解压条目: {} ({} 字节)", entry.name(), entry.size());
    }

    Ok(output_dir.to_path_buf())
}

/// 解压到新建的临时工作区
pub fn extract_to_temp(archive_path: &Path, prefix: &str) -> AppResult<Workspace> {
    let workspace = Workspace::create(prefix)?;
    extract(archive_path, workspace.path())?;
    Ok(workspace)
}

/// 列出目录中的数据成员（不递归，只看普通文件），按规范顺序返回
///
/// 不符合命名规则的文件会被静默忽略。
pub fn list_data_members(dir: &Path) -> AppResult<Vec<DataMember>> {
    let read_dir =
        fs::read_dir(dir).map_err(|e| AppError::list_failed(dir.display().to_string(), e))?;

    let mut members = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| AppError::list_failed(dir.display().to_string(), e))?;
        let is_file = entry
            .file_type()
            .map_err(|e| AppError::list_failed(entry.path().display().to_string(), e))?
            .is_file();
        if !is_file {
            continue;
        }

        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str().and_then(MemberName::parse) {
            members.push(DataMember {
                name,
                path: entry.path(),
            });
        }
    }

    members.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(members)
}
