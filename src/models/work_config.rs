use serde::{Deserialize, Deserializer};
use std::fmt;

/// 一条工作配置
///
/// 每个配置文件对应一条，描述生成的一个工作成员应写入的内容。
/// `Option` 字段区分"未设置"与"设置为空字符串"：未设置时不覆盖雏形中的值。
/// 其他键（例如 `documentName`）读取时忽略，不写入文档。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkConfig {
    /// 工作名 → `name`
    #[serde(default)]
    pub work_name: Option<String>,
    /// 备注 → `note`
    #[serde(default, alias = "note")]
    pub memo_text: Option<String>,
    /// 件名 → `content.subject`
    #[serde(default)]
    pub subject: Option<String>,
    /// 报表模板名 → `content.document.template.name`
    #[serde(default)]
    pub template_name: Option<String>,
    /// 文本数据集字段 → `content.document.template.params[0].values`
    #[serde(default, deserialize_with = "deserialize_field_list")]
    pub text_dataset_fields: Vec<String>,
    /// 数据源字段 → `content.datasource.fields`
    #[serde(default, deserialize_with = "deserialize_field_list")]
    pub datasource_fields: Vec<String>,
    #[serde(skip)]
    pub file_path: Option<String>,
}

// 字段列表写成空值（YAML 中 `textDatasetFields:` 后面什么都不写）时按空列表处理
fn deserialize_field_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl WorkConfig {
    pub fn new(work_name: impl Into<String>) -> Self {
        Self {
            work_name: Some(work_name.into()),
            ..Default::default()
        }
    }

    pub fn with_memo_text(mut self, memo_text: impl Into<String>) -> Self {
        self.memo_text = Some(memo_text.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_template_name(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = Some(template_name.into());
        self
    }

    pub fn with_text_dataset_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_dataset_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_datasource_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datasource_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }

    /// 用于日志与错误信息的工作名
    pub fn display_name(&self) -> &str {
        self.work_name.as_deref().unwrap_or("<未设置工作名>")
    }
}

impl fmt::Display for WorkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())?;
        if let Some(path) = &self.file_path {
            write!(f, " ({})", path)?;
        }
        Ok(())
    }
}
