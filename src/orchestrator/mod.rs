//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `d3w_processor` - 归档到归档的处理流水线
//! - 独占临时工作区（解压 → 校验 → 快照 → 生成 → 改写 → 打包 → 释放）
//! - 同步执行，不做重试
//!
//! ### `app` - 应用入口
//! - 参数校验、配置加载、输出文件命名
//! - 在阻塞线程池上运行流水线
//!
//! ## 层次关系
//!
//! ```text
//! app (参数 / 配置 / 输出路径)
//!     ↓
//! d3w_processor (处理 Vec<WorkConfig>)
//!     ↓
//! workflow::WorkFlow (生成单个工作成员)
//!     ↓
//! services (能力层：json_editor / work_templater)
//!     ↓
//! archive + infrastructure (解压、打包、临时工作区)
//! ```

pub mod app;
pub mod d3w_processor;

// 重新导出主要类型
pub use app::{App, RunRequest};
pub use d3w_processor::{process, D3wProcessor};
