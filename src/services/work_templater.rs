//! 工作模板填充服务 - 业务能力层
//!
//! 只负责把一条 `WorkConfig` 写进一份工作文档，不关心文件与流程

use crate::error::{AppResult, DocumentError};
use crate::models::work_config::WorkConfig;
use crate::services::json_editor::{Document, JsonObjectExt};
use serde_json::{Map, Value};

/// 没有可继承的参数块时使用的默认设置
const DEFAULT_PARAM_NAME: &str = "TextDataset1";
const DEFAULT_PARAM_TYPE: &str = "csv";

/// 从已有参数块继承的文本设置项
const INHERITED_TEXT_KEYS: [&str; 2] = ["name", "type"];

/// 从已有参数块继承的开关设置项
const INHERITED_FLAG_KEYS: [&str; 2] = ["ignore_empty_row", "insert_first_empty_row"];

/// 把工作配置应用到文档
///
/// 写入位置：
/// - `name` / `note`
/// - `content.subject`
/// - `content.datasource.fields`（非空时整体替换）
/// - `content.document.template.name`
/// - `content.document.template.params`（非空时替换为只含一个参数块的数组）
///
/// 路径上缺少的对象会被创建；未设置的字段保持原值。
/// 继承的参数设置项为 `null`、数组或对象时返回错误。
pub fn apply_work_config(doc: &mut Document, config: &WorkConfig) -> AppResult<()> {
    if let Some(work_name) = &config.work_name {
        doc.set_str("name", work_name);
    }

    if let Some(memo_text) = &config.memo_text {
        doc.set_str("note", memo_text);
    }

    let content = doc.object_mut("content");

    if let Some(subject) = &config.subject {
        content.set_str("subject", subject);
    }

    let datasource = content.object_mut("datasource");
    if !config.datasource_fields.is_empty() {
        datasource.replace_array("fields", string_values(&config.datasource_fields));
    }

    let template = content.object_mut("document").object_mut("template");

    if let Some(template_name) = &config.template_name {
        template.set_str("name", template_name);
    }

    if !config.text_dataset_fields.is_empty() {
        let param = build_dataset_param(template.get("params"), &config.text_dataset_fields)?;
        template.replace_array("params", vec![Value::Object(param)]);
    }

    Ok(())
}

/// 组装新的参数块
///
/// 已有 `params` 的第一个元素是对象时，继承其中的四项设置（存在才继承）：
/// `name` / `type` 转为字符串，两个开关转为布尔值。否则使用默认设置。
/// `values` 总是由本次的字段重新生成。
fn build_dataset_param(existing: Option<&Value>, fields: &[String]) -> AppResult<Map<String, Value>> {
    let base = existing
        .and_then(Value::as_array)
        .and_then(|params| params.first())
        .and_then(Value::as_object);

    let mut param = Map::new();
    match base {
        Some(base) => {
            for key in INHERITED_TEXT_KEYS {
                if let Some(value) = base.get(key) {
                    param.insert(key.to_string(), Value::String(setting_as_text(key, value)?));
                }
            }
            for key in INHERITED_FLAG_KEYS {
                if let Some(value) = base.get(key) {
                    param.insert(key.to_string(), Value::Bool(setting_as_flag(key, value)?));
                }
            }
        }
        None => {
            param.insert("name".to_string(), Value::from(DEFAULT_PARAM_NAME));
            param.insert("type".to_string(), Value::from(DEFAULT_PARAM_TYPE));
            param.insert("ignore_empty_row".to_string(), Value::Bool(false));
            param.insert("insert_first_empty_row".to_string(), Value::Bool(false));
        }
    }

    let values = fields.iter().map(|field| Value::String(placeholder(field))).collect();
    param.insert("values".to_string(), Value::Array(values));
    Ok(param)
}

/// 字段名 → `[字段名]` 占位符
pub fn placeholder(field: &str) -> String {
    format!("[{}]", field)
}

fn string_values(items: &[String]) -> Vec<Value> {
    items.iter().cloned().map(Value::String).collect()
}

// 数字与布尔按其文本形式继承
fn setting_as_text(key: &str, value: &Value) -> AppResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(invalid_setting(key, other)),
    }
}

// 非布尔的标量只有文本为 "true"（不区分大小写）时才算开启
fn setting_as_flag(key: &str, value: &Value) -> AppResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => Ok(s.eq_ignore_ascii_case("true")),
        Value::Number(_) => Ok(false),
        other => Err(invalid_setting(key, other)),
    }
}

fn invalid_setting(key: &str, value: &Value) -> crate::error::AppError {
    DocumentError::InvalidParamSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}
