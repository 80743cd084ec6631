//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：构建 LLM 服务、文档来源与输出目录
//! 2. **批量加载**：列出所有待处理的文档
//! 3. **顺序处理**：一份文档处理完（含全部 LLM 调用）再开始下一份
//! 4. **失败隔离**：单份文档读取/提取/写出失败只记录并跳过，不影响其它文档
//! 5. **全局统计**：汇总成功、跳过数量和题目来源，写出清单

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::{
    DocumentSource, DocumentTextExtractor, FolderSource, JsonFileSink, ManifestEntry, QuizSink,
    TextExtractor,
};
use crate::services::{DetectionStats, LlmService, OptionGenerator, QuestionDetector, SkipWriter};
use crate::utils::logging::{
    log_document_start, log_documents_loaded, log_startup, print_final_stats,
};
use crate::workflow::{DocumentCtx, DocumentFlow};

/// 本次运行的汇总结果
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub questions: DetectionStats,
    pub written: Vec<ManifestEntry>,
}

/// 应用主结构
pub struct App {
    config: Config,
    source: Arc<dyn DocumentSource>,
    sink: Arc<dyn QuizSink>,
    flow: DocumentFlow,
    skip_writer: SkipWriter,
}

impl App {
    /// 初始化应用：本地目录输入、PDF/文本提取、LLM 生成、JSON 输出
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let source: Arc<dyn DocumentSource> = Arc::new(FolderSource::new(&config.source_folder));
        let extractor: Arc<dyn TextExtractor> = Arc::new(DocumentTextExtractor::new());
        let generator: Arc<dyn OptionGenerator> = Arc::new(LlmService::new(&config));
        let sink: Arc<dyn QuizSink> = Arc::new(
            JsonFileSink::create(&config.output_folder)
                .await
                .with_context(|| format!("无法创建输出目录: {}", config.output_folder))?,
        );

        Ok(Self::with_components(config, source, extractor, generator, sink))
    }

    /// 使用指定组件构建应用
    pub fn with_components(
        config: Config,
        source: Arc<dyn DocumentSource>,
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn OptionGenerator>,
        sink: Arc<dyn QuizSink>,
    ) -> Self {
        let detector = QuestionDetector::new(
            generator,
            // 配置文件里的 0 同样按 1 秒处理
            Duration::from_secs(config.generation_timeout_secs.max(1)),
        );
        let flow = DocumentFlow::new(
            source.clone(),
            extractor,
            detector,
            sink.clone(),
            config.verbose_logging,
        );
        let skip_writer = SkipWriter::with_path(&config.skip_file);

        Self {
            config,
            source,
            sink,
            flow,
            skip_writer,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        info!("\n📁 正在扫描待处理的文档...");
        let documents = self
            .source
            .list()
            .await
            .context("无法列出待处理的文档")?;

        let mut summary = RunSummary {
            total: documents.len(),
            ..Default::default()
        };

        if documents.is_empty() {
            warn!("⚠️ 没有找到待处理的文档，程序结束");
            return Ok(summary);
        }

        log_documents_loaded(documents.len());

        for (idx, document) in documents.iter().enumerate() {
            let ctx = DocumentCtx::new(idx + 1, documents.len(), &document.name);
            log_document_start(&ctx);

            match self.flow.run(document, &ctx).await {
                Ok(report) => {
                    summary.success += 1;
                    summary.questions.merge(&report.stats);
                    record_written(&mut summary.written, report.entry, &ctx);
                    info!("{} ✅ 文档处理完成", ctx);
                }
                Err(e) => {
                    summary.skipped += 1;
                    error!("{} ❌ 处理失败，已跳过: {}", ctx, e);
                    if let Err(write_err) = self.skip_writer.write(&document.name, &e.to_string()).await {
                        warn!("{} ⚠️ 写入跳过记录失败: {}", ctx, write_err);
                    }
                }
            }
        }

        if self.config.write_manifest {
            if let Err(e) = self.sink.write_manifest(&summary.written).await {
                error!("❌ 清单写入失败: {}", e);
            }
        }

        print_final_stats(&summary, &self.config);

        Ok(summary)
    }
}

/// 记录写出的文件；同名文件已被覆盖时替换原清单项
fn record_written(written: &mut Vec<ManifestEntry>, entry: ManifestEntry, ctx: &DocumentCtx) {
    match written.iter_mut().find(|e| e.file == entry.file) {
        Some(existing) => {
            warn!(
                "{} ⚠️ {} 已被本次运行中的另一份文档写出，旧内容已覆盖 ({} 题 → {} 题)",
                ctx, entry.file, existing.question_count, entry.question_count
            );
            *existing = entry;
        }
        None => written.push(entry),
    }
}
