use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文档来源相关错误（列目录、读取文件）
    #[error("文档来源错误: {0}")]
    Source(#[from] SourceError),
    /// 文本提取错误
    #[error("文本提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 选项生成（LLM）错误
    #[error("选项生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 输出写入错误
    #[error("输出错误: {0}")]
    Sink(#[from] SinkError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文档来源错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 读取目录失败
    #[error("读取目录失败 ({path}): {source}")]
    ListFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 解析器返回错误
    #[error("无法解析文档 {document}: {source}")]
    ParseFailed {
        document: String,
        #[source]
        source: BoxError,
    },
    /// 解析任务异常退出（例如解析器 panic）
    #[error("解析任务异常退出 ({document}): {reason}")]
    TaskAborted { document: String, reason: String },
}

/// 选项生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: BoxError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 调用超时
    #[error("LLM调用超时 ({secs} 秒)")]
    Timeout { secs: u64 },
}

/// 输出写入错误
#[derive(Debug, Error)]
pub enum SinkError {
    /// 创建输出目录失败
    #[error("创建输出目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 序列化失败
    #[error("JSON序列化失败 ({title}): {source}")]
    SerializeFailed {
        title: String,
        #[source]
        source: serde_json::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Source(SourceError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Generation(GenerationError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Sink(SinkError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = AppError::Generation(GenerationError::Timeout { secs: 30 });
        assert_eq!(err.to_string(), "选项生成错误: LLM调用超时 (30 秒)");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AppError::file_read_failed("a.pdf", io);
        assert!(err.to_string().contains("a.pdf"));
    }

    #[test]
    fn test_source_chain_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::file_write_failed("out/quiz.json", io);
        let inner = std::error::Error::source(&err).expect("应当有内层错误");
        assert!(std::error::Error::source(inner).is_some());
    }
}
