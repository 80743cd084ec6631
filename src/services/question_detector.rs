//! 题目识别 - 业务能力层
//!
//! 逐行扫描文档文本，把含 `?` 的行识别为题目，并为每道题确定选项：
//! - 判断题（行内含 `true` / `false`）使用固定选项
//! - 其它题目调用 [`OptionGenerator`]，结果经 [`normalize_with_origin`] 清洗
//!
//! 行分类是纯函数 [`classify_line`]，与模型调用解耦。

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{AppResult, GenerationError};
use crate::models::{DocumentText, OptionOrigin, QuestionRecord};
use crate::services::llm_service::OptionGenerator;
use crate::services::option_normalizer::{normalize_with_origin, true_false_options};
use crate::utils::logging::truncate_text;

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// 判断题，选项固定为 True / False
    TrueFalse,
    /// 需要调用模型生成选项
    Generated,
}

/// 候选题目（已去除首尾空白的一行）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCandidate {
    pub text: String,
    pub kind: QuestionKind,
}

/// 识别统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetectionStats {
    pub true_false: usize,
    pub generated: usize,
    pub fallback: usize,
}

impl DetectionStats {
    pub fn record(&mut self, origin: OptionOrigin) {
        match origin {
            OptionOrigin::TrueFalse => self.true_false += 1,
            OptionOrigin::Generated => self.generated += 1,
            OptionOrigin::Fallback => self.fallback += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_false + self.generated + self.fallback
    }

    pub fn merge(&mut self, other: &DetectionStats) {
        self.true_false += other.true_false;
        self.generated += other.generated;
        self.fallback += other.fallback;
    }
}

/// 一份文档的识别结果
#[derive(Debug, Clone, Default)]
pub struct Detection {
    pub records: Vec<QuestionRecord>,
    pub stats: DetectionStats,
}

/// 对单行（已 trim）分类，不是题目时返回 `None`
pub fn classify_line(line: &str) -> Option<QuestionKind> {
    if !line.contains('?') {
        return None;
    }
    let lower = line.to_lowercase();
    if lower.contains("true") || lower.contains("false") {
        Some(QuestionKind::TrueFalse)
    } else {
        Some(QuestionKind::Generated)
    }
}

/// 找出所有候选题目，保持原有行序，不去重
pub fn detect_candidates(text: &DocumentText) -> Vec<QuestionCandidate> {
    text.as_str()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            classify_line(line).map(|kind| QuestionCandidate {
                text: line.to_string(),
                kind,
            })
        })
        .collect()
}

/// 题目识别器
///
/// 持有共享的选项生成器；生成失败或超时时退回占位选项，不会中断后续题目。
pub struct QuestionDetector {
    generator: Arc<dyn OptionGenerator>,
    timeout: Duration,
}

impl QuestionDetector {
    pub fn new(generator: Arc<dyn OptionGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// 识别整份文档的题目
    pub async fn detect(&self, text: &DocumentText) -> Detection {
        let candidates = detect_candidates(text);
        debug!("识别到 {} 道候选题目", candidates.len());

        let mut detection = Detection {
            records: Vec::with_capacity(candidates.len()),
            stats: DetectionStats::default(),
        };

        for candidate in candidates {
            let (options, origin) = self.resolve_options(&candidate).await;
            detection.stats.record(origin);
            detection
                .records
                .push(QuestionRecord::new(candidate.text, options));
        }

        detection
    }

    /// 为单道题确定选项
    pub async fn resolve_options(&self, candidate: &QuestionCandidate) -> (Vec<String>, OptionOrigin) {
        match candidate.kind {
            QuestionKind::TrueFalse => (true_false_options(), OptionOrigin::TrueFalse),
            QuestionKind::Generated => {
                let raw = match self.generate_with_timeout(&candidate.text).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!(
                            "⚠️ 选项生成失败，使用占位选项: {} | 题目: {}",
                            e,
                            truncate_text(&candidate.text, 60)
                        );
                        String::new()
                    }
                };
                normalize_with_origin(&raw)
            }
        }
    }

    async fn generate_with_timeout(&self, question: &str) -> AppResult<String> {
        match tokio::time::timeout(self.timeout, self.generator.generate(question)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout {
                secs: self.timeout.as_secs(),
            }
            .into()),
        }
    }
}
