//! 文档处理流程 - 流程层
//!
//! 核心职责：定义"一份文档"的完整处理流程
//!
//! 流程顺序：
//! 1. 读取文档字节
//! 2. 提取逐页文本 → 拼接为 DocumentText
//! 3. 识别题目（按需调用 LLM 生成选项）
//! 4. 组装测验
//! 5. 写出 JSON
//!
//! 读取、提取或写出失败时返回错误，由编排层记录并跳过该文档；
//! 失败的文档不会产生任何部分输出。

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::AppResult;
use crate::infrastructure::{DocumentSource, ManifestEntry, QuizSink, TextExtractor};
use crate::models::{DocumentText, SourceDocument};
use crate::services::{assemble_quiz, DetectionStats, QuestionDetector};
use crate::utils::logging::truncate_text;
use crate::workflow::document_ctx::DocumentCtx;

/// 单份文档的处理结果
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub entry: ManifestEntry,
    pub stats: DetectionStats,
}

/// 文档处理流程
///
/// - 编排 提取 → 识别 → 组装 → 输出
/// - 不持有具体实现，只依赖能力接口
pub struct DocumentFlow {
    source: Arc<dyn DocumentSource>,
    extractor: Arc<dyn TextExtractor>,
    detector: QuestionDetector,
    sink: Arc<dyn QuizSink>,
    verbose_logging: bool,
}

impl DocumentFlow {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        extractor: Arc<dyn TextExtractor>,
        detector: QuestionDetector,
        sink: Arc<dyn QuizSink>,
        verbose_logging: bool,
    ) -> Self {
        Self {
            source,
            extractor,
            detector,
            sink,
            verbose_logging,
        }
    }

    pub async fn run(&self, document: &SourceDocument, ctx: &DocumentCtx) -> AppResult<DocumentReport> {
        let bytes = self.source.fetch(document).await?;
        info!("{} 📄 已读取 {} 字节", ctx, bytes.len());

        let pages = self.extractor.extract(document, bytes).await?;
        let text = DocumentText::from_pages(&pages);
        info!(
            "{} ✓ 文本提取完成: {} 页, {} 字符",
            ctx,
            pages.len(),
            text.as_str().chars().count()
        );

        if text.is_empty() {
            warn!("{} ⚠️ 未提取到任何文本，将输出空测验", ctx);
        }

        let detection = self.detector.detect(&text).await;
        if self.verbose_logging {
            self.log_questions(ctx, &detection.records);
        }

        let quiz = assemble_quiz(&document.name, detection.records);
        let entry = self.sink.write_quiz(&quiz).await?;

        log_document_complete(ctx, &detection.stats);

        Ok(DocumentReport {
            entry,
            stats: detection.stats,
        })
    }

    // ========== 日志辅助方法 ==========

    fn log_questions(&self, ctx: &DocumentCtx, records: &[crate::models::QuestionRecord]) {
        for (i, record) in records.iter().enumerate() {
            info!(
                "{}   {}. {} → {:?}",
                ctx,
                i + 1,
                truncate_text(&record.question, 60),
                record.options
            );
        }
    }
}

fn log_document_complete(ctx: &DocumentCtx, stats: &DetectionStats) {
    info!(
        "{} 题目统计: 判断题 {}, 生成选项 {}, 占位选项 {}, 总计 {}",
        ctx,
        stats.true_false,
        stats.generated,
        stats.fallback,
        stats.total()
    );
}
