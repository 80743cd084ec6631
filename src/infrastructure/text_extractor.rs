//! 文本提取器 - 基础设施层
//!
//! 输入文档字节，输出按页排列的文本，只暴露"提取"能力

use async_trait::async_trait;
use tracing::debug;

use crate::error::{AppResult, ExtractionError};
use crate::models::{DocumentKind, RawPage, SourceDocument};

/// 文本提取能力
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &SourceDocument, bytes: Vec<u8>) -> AppResult<Vec<RawPage>>;
}

/// 按文档类型分派的提取器
///
/// - PDF：`pdf-extract` 逐页提取，在阻塞线程池中执行，解析器 panic 记为提取失败
/// - 文本 / CSV：按 UTF-8（有损）读取为单页
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pdf_pages(name: &str, bytes: &[u8]) -> AppResult<Vec<RawPage>> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
            ExtractionError::ParseFailed {
                document: name.to_string(),
                source: e.to_string().into(),
            }
        })?;

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(index, text)| RawPage { index, text })
            .collect())
    }
}

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract(&self, document: &SourceDocument, bytes: Vec<u8>) -> AppResult<Vec<RawPage>> {
        let pages = match document.kind {
            DocumentKind::Pdf => {
                let name = document.name.clone();
                tokio::task::spawn_blocking(move || DocumentTextExtractor::extract_pdf_pages(&name, &bytes))
                    .await
                    .map_err(|e| ExtractionError::TaskAborted {
                        document: document.name.clone(),
                        reason: e.to_string(),
                    })??
            }
            DocumentKind::PlainText | DocumentKind::Csv => vec![RawPage {
                index: 0,
                text: String::from_utf8_lossy(&bytes).into_owned(),
            }],
        };

        debug!("{} 提取完成，共 {} 页", document.name, pages.len());
        Ok(pages)
    }
}
