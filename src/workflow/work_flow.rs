//! 工作生成流程 - 流程层
//!
//! 核心职责：定义"一个工作成员"的完整生成流程
//!
//! 流程顺序：
//! 1. 从雏形快照重新读取一份独立的文档
//! 2. 应用工作配置
//! 3. 清空标识键 `key`
//! 4. 写出 `w{序号}` 成员
//! 5. 返回写入主成员用的 `WorkReference`

use crate::error::AppResult;
use crate::models::work_config::WorkConfig;
use crate::models::work_reference::WorkReference;
use crate::services::json_editor::{read_json, write_json, Document, JsonObjectExt};
use crate::services::work_templater::apply_work_config;
use crate::workflow::work_ctx::WorkCtx;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 工作生成流程
///
/// - 每次运行都重新读取快照，配置之间互不影响
/// - 不持有工作区，只知道快照和输出目录的位置
pub struct WorkFlow {
    snapshot_path: PathBuf,
    output_dir: PathBuf,
}

impl WorkFlow {
    /// 创建新的工作生成流程
    pub fn new(snapshot_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn run(&self, config: &WorkConfig, ctx: &WorkCtx) -> AppResult<WorkReference> {
        info!("{}", ctx);

        let mut content = read_json(&self.snapshot_path)?;
        apply_work_config(&mut content, config)?;

        // 标识键由导入方重新分配
        if blank_identity_key(&mut content) {
            debug!("  清空 key");
        }

        let member = ctx.member_name();
        let member_path = self.member_path(member.as_str());
        write_json(&content, &member_path)?;
        info!("  ✓ 生成: {}", member);

        Ok(work_reference(&content, member.as_str()))
    }

    fn member_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// 快照路径
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}

/// `key` 存在且为标量时改为空字符串，返回是否做了修改
pub fn blank_identity_key(content: &mut Document) -> bool {
    match content.get("key") {
        Some(Value::String(_)) | Some(Value::Number(_)) | Some(Value::Bool(_)) => {
            content.set_str("key", "");
            true
        }
        _ => false,
    }
}

/// 根据生成后的文档组装主成员中的引用项
pub fn work_reference(content: &Document, path: &str) -> WorkReference {
    WorkReference {
        content_class: content.get_str("content_class").map(str::to_string),
        key: String::new(),
        name: content.get_str("name").map(str::to_string),
        path: path.to_string(),
    }
}
