use serde::Serialize;

/// 主成员 `works` 列表中的一项
///
/// 字段顺序即写出顺序。`key` 总是空字符串，由导入方重新分配。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_class: Option<String>,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
}

