use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 参数校验错误
    Validation(ValidationError),
    /// LLM 服务错误
    Llm(LlmError),
    /// 文档生成错误
    Document(DocumentError),
    /// 文件操作错误
    File(FileError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Llm(e) => write!(f, "{}", e),
            AppError::Document(e) => write!(f, "文档错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Other(msg) => write!(f, "生成过程中出现错误：{}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::Llm(e) => Some(e),
            AppError::Document(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 参数校验错误
///
/// 属于生成前的预检失败，不触发任何外部调用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// 课文内容为空
    EmptySourceText,
    /// 三种题型数量均为 0
    NoQuestionsRequested,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptySourceText => write!(f, "请输入课文内容或知识点"),
            ValidationError::NoQuestionsRequested => {
                write!(f, "请至少设置一种题型的数量")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// LLM 服务错误
#[derive(Debug)]
pub enum LlmError {
    /// API Key 缺失或无效
    AuthFailed,
    /// API 调用返回错误
    ApiCallFailed { model: String, message: String },
    /// 网络传输失败
    Transport { message: String },
    /// 返回结果为空
    EmptyResponse { model: String },
    /// 返回内容为空
    EmptyContent { model: String },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::AuthFailed => {
                write!(f, "API Key 验证失败，请检查你的 API Key 是否正确")
            }
            LlmError::ApiCallFailed { model, message } => {
                write!(f, "API 调用失败（模型: {}）：{}", model, message)
            }
            LlmError::Transport { message } => {
                write!(f, "网络请求失败：{}", message)
            }
            LlmError::EmptyResponse { model } => {
                write!(f, "LLM 返回结果为空 (模型: {})", model)
            }
            LlmError::EmptyContent { model } => {
                write!(f, "LLM 返回内容为空 (模型: {})", model)
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// 文档生成错误
#[derive(Debug)]
pub enum DocumentError {
    /// docx 打包失败
    PackFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::PackFailed { source } => {
                write!(f, "生成 Word 文档失败: {}", source)
            }
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::PackFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 docx 打包错误
    pub fn docx_pack_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Document(DocumentError::PackFailed {
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
