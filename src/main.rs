use anyhow::Result;
use clap::Parser;
use d3w_processor::{logger, App, Config, RunRequest};
use std::path::PathBuf;

/// 以雏形 .d3w 为基础，按工作配置批量生成工作并打包为一个新的 .d3w
#[derive(Parser)]
#[command(name = "d3w-processor")]
#[command(about = "Generate one .d3w from a template .d3w and work config files")]
struct Cli {
    /// 雏形 .d3w 文件
    template: PathBuf,

    /// 工作配置文件（.yml / .yaml / .toml），每个文件生成一个工作
    configs: Vec<PathBuf>,

    /// 读取该目录下的全部配置文件（按文件名排序）
    #[arg(short = 'd', long)]
    config_dir: Option<PathBuf>,

    /// 输出文件路径（默认：雏形所在目录/output_yyyyMMddHHmmss.d3w）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init(cli.verbose || config.verbose_logging);

    let request = RunRequest {
        template_path: cli.template,
        config_paths: cli.configs,
        config_dir: cli.config_dir,
        output_path: cli.output,
    };

    if App::new(config).run(request).await.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
