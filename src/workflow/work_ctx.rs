//! 工作生成上下文
//!
//! 封装"正在生成第几个工作"这一信息

use crate::models::member::MemberName;
use crate::utils::logging::truncate_text;
use std::fmt::Display;

/// 工作名在日志中的最大显示长度
const MAX_NAME_DISPLAY_LEN: usize = 40;

/// 工作生成上下文
#[derive(Debug, Clone)]
pub struct WorkCtx {
    /// 工作序号（从1开始，等于配置的输入顺序）
    pub work_index: usize,

    /// 本次生成的工作总数
    pub total: usize,

    /// 工作名（仅用于日志显示）
    pub work_name: String,
}

impl WorkCtx {
    /// 创建新的工作上下文
    pub fn new(work_index: usize, total: usize, work_name: impl Into<String>) -> Self {
        Self {
            work_index,
            total,
            work_name: work_name.into(),
        }
    }

    /// 本工作对应的成员名 `w{序号}`
    pub fn member_name(&self) -> MemberName {
        MemberName::work(self.work_index)
    }
}

impl Display for WorkCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}/{}] {}",
            self.work_index,
            self.total,
            truncate_text(&self.work_name, MAX_NAME_DISPLAY_LEN)
        )
    }
}
