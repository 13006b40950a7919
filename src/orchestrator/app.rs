//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **参数校验**：雏形必须是已存在的 .d3w，配置文件必须是 .yml / .yaml / .toml
//! 2. **加载配置**：按给定顺序加载配置文件，再追加目录中的配置
//! 3. **决定输出**：`<输出目录>/<前缀><yyyyMMddHHmmss>.d3w`
//! 4. **后台执行**：在阻塞线程池上运行同步的 `D3wProcessor`
//! 5. **结果日志**：输出成功或失败信息

use crate::config::Config;
use crate::models::loaders::{find_config_files, is_config_file, load_work_configs};
use crate::orchestrator::d3w_processor::D3wProcessor;
use crate::utils::logging::{log_failure, log_startup, log_success};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// 雏形文件扩展名
pub const D3W_EXTENSION: &str = "d3w";

/// 一次运行的输入
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// 雏形 .d3w 文件
    pub template_path: PathBuf,
    /// 配置文件（按顺序）
    pub config_paths: Vec<PathBuf>,
    /// 配置目录（其中的文件按文件名排序后追加在 `config_paths` 之后）
    pub config_dir: Option<PathBuf>,
    /// 指定输出路径（不指定时自动生成）
    pub output_path: Option<PathBuf>,
}

/// 应用主结构
pub struct App {
    config: Config,
    processor: D3wProcessor,
}

impl App {
    /// 初始化应用
    pub fn new(config: Config) -> Self {
        let processor = D3wProcessor::new(&config);
        Self { config, processor }
    }

    /// 运行应用主逻辑，返回生成的 .d3w 路径
    pub async fn run(&self, request: RunRequest) -> Result<PathBuf> {
        let result = self.run_inner(request).await;
        if let Err(e) = &result {
            log_failure(e);
        }
        result
    }

    async fn run_inner(&self, request: RunRequest) -> Result<PathBuf> {
        validate_template_file(&request.template_path)?;

        let config_paths = self.collect_config_paths(&request).await?;
        log_startup(&request.template_path, &config_paths);

        info!("\n📁 正在加载工作配置...");
        let configs = load_work_configs(&config_paths).await?;
        info!("✓ 读取完成: {} 个工作配置", configs.len());

        let output_path = match request.output_path {
            Some(path) => path,
            None => self.default_output_path(&request.template_path),
        };

        let processor = self.processor.clone();
        let template_path = request.template_path.clone();
        let work_count = configs.len();
        let target = output_path.clone();

        let generated = tokio::task::spawn_blocking(move || {
            processor.process(&template_path, &configs, &target)
        })
        .await
        .context("处理任务执行失败")??;

        log_success(&generated, work_count);
        Ok(generated)
    }

    /// 汇总配置文件：先是显式给出的文件，再是目录中的文件
    async fn collect_config_paths(&self, request: &RunRequest) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for (idx, path) in request.config_paths.iter().enumerate() {
            validate_config_file(path, idx + 2)?;
            paths.push(path.clone());
        }

        if let Some(dir) = &request.config_dir {
            paths.extend(find_config_files(dir).await?);
        }

        if paths.is_empty() {
            anyhow::bail!("至少需要一个工作配置文件（.yml / .yaml / .toml）");
        }
        Ok(paths)
    }

    /// 默认输出路径：输出目录（未配置时为雏形所在目录）+ 前缀 + 时间戳
    pub fn default_output_path(&self, template_path: &Path) -> PathBuf {
        let output_dir = match &self.config.output_dir {
            Some(dir) => PathBuf::from(dir),
            None => template_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        output_dir.join(format!(
            "{}{}.{}",
            self.config.output_file_prefix, timestamp, D3W_EXTENSION
        ))
    }
}

/// 雏形必须是已存在的 .d3w 文件
pub fn validate_template_file(path: &Path) -> Result<()> {
    if path.extension().and_then(|s| s.to_str()) != Some(D3W_EXTENSION) {
        anyhow::bail!("第一个参数必须是 .d3w 文件: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!(".d3w 文件不存在: {}", path.display());
    }
    Ok(())
}

/// 配置文件必须是已存在的 .yml / .yaml / .toml 文件
pub fn validate_config_file(path: &Path, arg_index: usize) -> Result<()> {
    if !is_config_file(path) {
        anyhow::bail!(
            "第 {} 个参数必须是 .yml / .yaml / .toml 文件: {}",
            arg_index,
            path.display()
        );
    }
    if !path.is_file() {
        anyhow::bail!("配置文件不存在: {}", path.display());
    }
    Ok(())
}
