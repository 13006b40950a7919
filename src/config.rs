/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 输出目录（未设置时与雏形 .d3w 同目录）
    pub output_dir: Option<String>,
    /// 输出文件名前缀，后接时间戳
    pub output_file_prefix: String,
    /// 解压用临时目录的前缀
    pub workspace_prefix: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            output_file_prefix: "output_".to_string(),
            workspace_prefix: "d3w_extract_".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            output_dir: std::env::var("D3W_OUTPUT_DIR").ok().filter(|v| !v.is_empty()).or(default.output_dir),
            output_file_prefix: std::env::var("D3W_OUTPUT_PREFIX").unwrap_or(default.output_file_prefix),
            workspace_prefix: std::env::var("D3W_WORKSPACE_PREFIX").unwrap_or(default.workspace_prefix),
            verbose_logging: std::env::var("D3W_VERBOSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
