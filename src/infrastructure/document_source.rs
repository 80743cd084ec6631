//! 文档来源 - 基础设施层
//!
//! 列出待处理文档并读取其字节内容

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, SourceError};
use crate::models::SourceDocument;

/// 文档来源能力
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// 列出所有待处理文档
    async fn list(&self) -> AppResult<Vec<SourceDocument>>;
    /// 读取单个文档的原始字节
    async fn fetch(&self, document: &SourceDocument) -> AppResult<Vec<u8>>;
}

/// 本地目录来源
///
/// 只扫描目录第一层，忽略不支持的扩展名，按文件名排序以保证输出稳定
pub struct FolderSource {
    folder: PathBuf,
}

impl FolderSource {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}

#[async_trait]
impl DocumentSource for FolderSource {
    async fn list(&self) -> AppResult<Vec<SourceDocument>> {
        let folder_display = self.folder.display().to_string();

        if !self.folder.is_dir() {
            return Err(SourceError::DirectoryNotFound {
                path: folder_display,
            }
            .into());
        }

        let mut entries = fs::read_dir(&self.folder)
            .await
            .map_err(|source| SourceError::ListFailed {
                path: folder_display.clone(),
                source,
            })?;

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| SourceError::ListFailed {
                path: folder_display.clone(),
                source,
            })?
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match SourceDocument::from_path(&path) {
                Some(document) => documents.push(document),
                None => debug!("忽略不支持的文件: {}", path.display()),
            }
        }

        documents.sort_by(|a, b| a.name.cmp(&b.name));
        info!("📁 {} 中找到 {} 个文档", folder_display, documents.len());
        Ok(documents)
    }

    async fn fetch(&self, document: &SourceDocument) -> AppResult<Vec<u8>> {
        fs::read(&document.path)
            .await
            .map_err(|e| AppError::file_read_failed(document.path.display().to_string(), e))
    }
}
