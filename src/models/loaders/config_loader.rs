use crate::models::work_config::WorkConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// 按扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yml") | Some("yaml") => Some(ConfigFormat::Yaml),
            Some("toml") => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// 是否为受支持的配置文件（.yml / .yaml / .toml）
pub fn is_config_file(path: &Path) -> bool {
    ConfigFormat::from_path(path).is_some()
}

/// 解析配置文本
pub fn parse_work_config(content: &str, format: ConfigFormat) -> Result<WorkConfig> {
    let config = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).context("YAML格式不正确")?,
        ConfigFormat::Toml => toml::from_str(content).context("TOML格式不正确")?,
    };
    Ok(config)
}

/// 从配置文件加载一条工作配置
pub async fn load_work_config(config_file_path: &Path) -> Result<WorkConfig> {
    let format = ConfigFormat::from_path(config_file_path).with_context(|| {
        format!(
            "不支持的配置文件格式（需要 .yml / .yaml / .toml）: {}",
            config_file_path.display()
        )
    })?;

    let content = fs::read_to_string(config_file_path)
        .await
        .with_context(|| format!("无法读取配置文件: {}", config_file_path.display()))?;

    let config = parse_work_config(&content, format)
        .with_context(|| format!("无法解析配置文件: {}", config_file_path.display()))?;

    Ok(config.with_file_path(config_file_path.to_string_lossy().to_string()))
}

/// 按给定顺序加载多个配置文件，任一失败即整体失败
pub async fn load_work_configs(paths: &[PathBuf]) -> Result<Vec<WorkConfig>> {
    let mut configs = Vec::with_capacity(paths.len());
    for path in paths {
        let config = load_work_config(path).await?;
        tracing::debug!("已加载配置: {}", config);
        configs.push(config);
    }
    Ok(configs)
}

/// 列出文件夹中的全部配置文件，按文件名排序
pub async fn find_config_files(folder_path: &Path) -> Result<Vec<PathBuf>> {
    if !folder_path.is_dir() {
        anyhow::bail!("文件夹不存在: {}", folder_path.display());
    }

    let mut config_files = Vec::new();
    let mut entries = fs::read_dir(folder_path)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_file() && is_config_file(&path) {
            config_files.push(path);
        }
    }

    config_files.sort();
    Ok(config_files)
}
