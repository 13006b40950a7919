use thiserror::Error;

/// 应用程序错误类型
///
/// 所有错误都是致命的：流水线不做重试，也不做部分输出。
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入形态错误（配置重复、雏形结构不合法）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 归档读写错误
    #[error("归档错误: {0}")]
    Archive(#[from] ArchiveError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// JSON 文档错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
}

/// 输入形态错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 两条工作配置使用了相同的工作名
    #[error("工作配置中存在重复的工作名: {name}")]
    DuplicateWorkName { name: String },
    /// 雏形中没有 `_` 成员
    #[error("雏形中找不到主成员 `_`")]
    MainMemberMissing,
    /// 雏形中没有 `w1` 成员
    #[error("雏形中不存在 w1 成员，雏形必须且只能包含 w1 这一个工作成员")]
    TemplateWorkMissing,
    /// 雏形中存在 w1 以外的工作成员
    #[error("雏形中存在 w1 以外的工作成员: {}（工作成员会按配置重新生成，雏形中不能预先存在）", .members.join(", "))]
    ExtraWorkMembers { members: Vec<String> },
}

/// 归档读写错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 打开归档失败
    #[error("无法打开归档 ({path}): {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },
    /// 读取归档条目失败
    #[error("读取归档条目失败 ({name}): {source}")]
    EntryReadFailed {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },
    /// 条目路径越出解压目录
    #[error("归档条目路径不安全: {name}")]
    UnsafeEntryName { name: String },
    /// 写入归档失败
    #[error("写入归档失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 删除文件失败
    #[error("删除文件失败 ({path}): {source}")]
    DeleteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 列出目录失败
    #[error("读取目录失败 ({path}): {source}")]
    ListFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// JSON 文档错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 内容不是合法 JSON
    #[error("JSON解析失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 顶层不是 JSON 对象
    #[error("顶层不是JSON对象: {path}")]
    NotAnObject { path: String },
    /// 参数块中的设置项不是标量
    #[error("参数设置项 {key} 不能继承: {value}")]
    InvalidParamSetting { key: String, value: String },
    /// 序列化失败
    #[error("JSON序列化失败: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建目录创建错误
    pub fn create_dir_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件删除错误
    pub fn delete_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::DeleteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建目录读取错误
    pub fn list_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ListFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否属于输入形态错误
    pub fn is_input_error(&self) -> bool {
        matches!(self, AppError::Input(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
