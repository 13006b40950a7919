/// 日志工具模块
///
/// 提供运行过程中横幅、统计等日志的辅助函数
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// 记录处理开始信息
///
/// # 参数
/// - `template_path`: 雏形 .d3w 文件路径
/// - `config_paths`: 工作配置文件路径列表
pub fn log_startup(template_path: &Path, config_paths: &[PathBuf]) {
    info!("{}", "=".repeat(60));
    info!("🚀 D3W Processor - 处理开始");
    info!("{}", "=".repeat(60));
    info!("雏形 .d3w 文件: {}", template_path.display());
    info!("配置文件数: {}", config_paths.len());
    for (idx, path) in config_paths.iter().enumerate() {
        info!("  [{}] {}", idx + 1, path.display());
    }
}

/// 记录处理成功信息
///
/// # 参数
/// - `output_path`: 生成的 .d3w 文件路径
/// - `work_count`: 生成的工作数量
pub fn log_success(output_path: &Path, work_count: usize) {
    info!("\n{}", "=".repeat(60));
    info!("✅ 处理完成 - 全部正常结束");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📦 生成工作数: {}", work_count);
    info!("✓ 生成文件: {}", output_path.display());
}

/// 记录处理失败信息
///
/// # 参数
/// - `err`: 导致中断的错误
pub fn log_failure(err: &anyhow::Error) {
    error!("\n{}", "=".repeat(60));
    error!("❌ 发生错误 - 处理已中断");
    error!("{}", "=".repeat(60));
    error!("错误详情: {:#}", err);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
