//! 跳过记录服务 - 业务能力层
//!
//! 只负责"把被跳过的文档追加写入 skipped.txt"，不关心流程

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 跳过记录服务
///
/// 每个被跳过的文档写一行：时间 | 文档名 | 原因
pub struct SkipWriter {
    skip_file_path: PathBuf,
}

impl SkipWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            skip_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.skip_file_path
    }

    /// 追加一条跳过记录
    pub async fn write(&self, document: &str, reason: &str) -> AppResult<()> {
        debug!("写入跳过记录: {} | {}", document, reason);

        let path = self.skip_file_path.display().to_string();
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.skip_file_path)
            .await
            .map_err(|e| AppError::file_write_failed(&path, e))?;

        let line = format!(
            "{} | 文档 {} | 原因: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            document,
            reason.replace('\n', " ")
        );

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(&path, e))?;

        Ok(())
    }
}

impl Default for SkipWriter {
    fn default() -> Self {
        Self::with_path("skipped.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_appends_one_line_per_skip() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SkipWriter::with_path(dir.path().join("skipped.txt"));

        writer.write("broken.pdf", "无法解析\n第二行").await.unwrap();
        writer.write("empty.pdf", "读取失败").await.unwrap();

        let content = tokio::fs::read_to_string(writer.path()).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("文档 broken.pdf | 原因: 无法解析 第二行"));
        assert!(lines[1].contains("empty.pdf"));
    }
}
