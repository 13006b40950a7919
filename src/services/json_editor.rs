//! JSON 编辑服务 - 业务能力层
//!
//! 成员文件都是单行 JSON 对象。这里只负责读、写、复制以及嵌套对象的访问，
//! 不关心具体字段的业务含义。
//!
//! 依赖 `serde_json` 的 `preserve_order`：键保持原有顺序，
//! 覆盖已有键时位置不变，新键追加在末尾。

use crate::error::{AppError, AppResult, DocumentError};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// 一个成员文件的内容（顶层 JSON 对象）
pub type Document = Map<String, Value>;

/// 读取 JSON 文件，顶层必须是对象
pub fn read_json(path: &Path) -> AppResult<Document> {
    let bytes = fs::read(path).map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|source| DocumentError::ParseFailed {
        path: path.display().to_string(),
        source,
    })?;

    match value {
        Value::Object(doc) => Ok(doc),
        _ => Err(DocumentError::NotAnObject {
            path: path.display().to_string(),
        }
        .into()),
    }
}

/// 序列化为单行 JSON（无换行、无缩进）
pub fn to_json(doc: &Document) -> AppResult<String> {
    serde_json::to_string(doc).map_err(|source| DocumentError::SerializeFailed { source }.into())
}

/// 以单行 JSON 覆盖写入文件
pub fn write_json(doc: &Document, path: &Path) -> AppResult<()> {
    let json = to_json(doc)?;
    fs::write(path, json).map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}

/// 深拷贝，副本与原文档不共享任何可变结构
pub fn deep_copy(doc: &Document) -> Document {
    doc.clone()
}

/// JSON 对象的访问辅助
pub trait JsonObjectExt {
    /// 取得子对象；不存在或不是对象时，写入一个空对象后返回
    fn object_mut(&mut self, key: &str) -> &mut Document;

    /// 整体替换为数组（已存在的值不做合并）
    fn replace_array(&mut self, key: &str, items: Vec<Value>);

    /// 设置字符串值
    fn set_str(&mut self, key: &str, value: &str);

    /// 读取字符串值
    fn get_str(&self, key: &str) -> Option<&str>;
}

impl JsonObjectExt for Document {
    fn object_mut(&mut self, key: &str) -> &mut Document {
        let slot = self
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(map) => map,
            _ => unreachable!("刚写入的值必定是对象"),
        }
    }

    fn replace_array(&mut self, key: &str, items: Vec<Value>) {
        self.insert(key.to_string(), Value::Array(items));
    }

    fn set_str(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), Value::String(value.to_string()));
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}
