//! 测验输出 - 基础设施层
//!
//! 把组装好的 [`QuizDocument`] 写成 `<title>.json`，并可写出本次运行的清单

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::error::{AppError, AppResult, SinkError};
use crate::models::QuizDocument;

/// 清单文件名
pub const MANIFEST_FILE: &str = "manifest.json";

/// 清单中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// 相对输出目录的文件名
    pub file: String,
    pub title: String,
    pub question_count: usize,
}

#[derive(Serialize)]
struct Manifest<'a> {
    quizzes: &'a [ManifestEntry],
}

/// 测验输出能力
#[async_trait]
pub trait QuizSink: Send + Sync {
    /// 写出一份测验，返回清单项
    async fn write_quiz(&self, quiz: &QuizDocument) -> AppResult<ManifestEntry>;
    /// 写出本次运行的清单
    async fn write_manifest(&self, entries: &[ManifestEntry]) -> AppResult<PathBuf>;
}

/// JSON 文件输出
pub struct JsonFileSink {
    output_folder: PathBuf,
}

impl JsonFileSink {
    /// 创建输出，目录不存在时自动创建
    pub async fn create(output_folder: impl Into<PathBuf>) -> AppResult<Self> {
        let output_folder = output_folder.into();
        tokio::fs::create_dir_all(&output_folder)
            .await
            .map_err(|source| SinkError::CreateDirFailed {
                path: output_folder.display().to_string(),
                source,
            })?;
        Ok(Self { output_folder })
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        label: &str,
        value: &T,
    ) -> AppResult<PathBuf> {
        let bytes = to_pretty_json(value).map_err(|source| SinkError::SerializeFailed {
            title: label.to_string(),
            source,
        })?;

        let path = self.output_folder.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        Ok(path)
    }
}

#[async_trait]
impl QuizSink for JsonFileSink {
    async fn write_quiz(&self, quiz: &QuizDocument) -> AppResult<ManifestEntry> {
        let file = format!("{}.json", quiz.title);
        let path = self.write_json(&file, &quiz.title, quiz).await?;
        info!("💾 已保存: {}", path.display());

        Ok(ManifestEntry {
            file,
            title: quiz.title.clone(),
            question_count: quiz.questions.len(),
        })
    }

    async fn write_manifest(&self, entries: &[ManifestEntry]) -> AppResult<PathBuf> {
        let path = self
            .write_json(MANIFEST_FILE, "manifest", &Manifest { quizzes: entries })
            .await?;
        info!("📋 清单已保存: {} ({} 份测验)", path.display(), entries.len());
        Ok(path)
    }
}

/// 4 空格缩进，非 ASCII 字符原样输出，末尾带换行
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}
