//! # D3W Processor
//!
//! 以一个雏形 .d3w 文件为基础，按多份工作配置批量生成工作成员，
//! 并重新打包为一个新的 .d3w 文件。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有临时工作区，离开作用域自动删除
//! - `archive/` - .d3w（ZIP）的解压、成员扫描与重新打包
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文档
//! - `json_editor` - 单行 JSON 的读写、深拷贝、嵌套对象访问
//! - `work_templater` - 把一条工作配置写进工作文档
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个工作成员"的完整生成流程
//! - `WorkCtx` - 上下文封装（序号 + 工作名）
//! - `WorkFlow` - 快照 → 填充 → 清空 key → 写出 → 引用项
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/d3w_processor` - 整个流水线，独占工作区
//! - `orchestrator/app` - 参数校验、配置加载、后台执行
//!
//! ## 模块结构

pub mod archive;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::Workspace;
pub use models::{MemberName, WorkConfig, WorkReference};
pub use orchestrator::{process, App, D3wProcessor, RunRequest};
pub use workflow::{WorkCtx, WorkFlow};
