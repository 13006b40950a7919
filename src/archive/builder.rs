//! 归档重建
//!
//! 把工作区中的数据成员按规范顺序打包成新的 .d3w 文件

use crate::archive::extractor::{list_data_members, DataMember};
use crate::error::{AppError, AppResult, ArchiveError};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};
use zip::write::FileOptions;
use zip::ZipWriter;

/// 确保输出文件的父目录存在
pub fn ensure_parent_dir(output_path: &Path) -> AppResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::create_dir_failed(parent.display().to_string(), e))?;
        }
    }
    Ok(())
}

/// 将 `source_dir` 中的数据成员打包到 `output_path`
///
/// 条目名为成员文件名，内容按原始字节写入。
/// 输出文件创建之后的失败会尝试删除写了一半的文件；创建之前失败时不动已有文件。
pub fn build(source_dir: &Path, output_path: &Path) -> AppResult<()> {
    ensure_parent_dir(output_path)?;

    let members = list_data_members(source_dir)?;
    let file = File::create(output_path)
        .map_err(|e| AppError::file_write_failed(output_path.display().to_string(), e))?;

    let result = write_entries(file, &members, output_path);
    if result.is_err() {
        if let Err(e) = fs::remove_file(output_path) {
            warn!("⚠️ 删除不完整的输出文件失败: {} - {}", output_path.display(), e);
        }
    }
    result
}

fn write_entries(file: File, members: &[DataMember], output_path: &Path) -> AppResult<()> {
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default();
    let write_failed = |source: zip::result::ZipError| ArchiveError::WriteFailed {
        path: output_path.display().to_string(),
        source,
    };

    for member in members {
        writer
            .start_file(member.name.as_str(), options)
            .map_err(write_failed)?;

        let mut input = File::open(&member.path)
            .map_err(|e| AppError::file_read_failed(member.path.display().to_string(), e))?;
        let bytes = io::copy(&mut input, &mut writer)
            .map_err(|e| AppError::file_write_failed(output_path.display().to_string(), e))?;

        debug!("写入条目: {} ({} 字节)", member.name, bytes);
    }

    let mut file = writer.finish().map_err(write_failed)?;
    file.flush()
        .map_err(|e| AppError::file_write_failed(output_path.display().to_string(), e))?;

    Ok(())
}
