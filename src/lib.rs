//! # PDF Quiz Gen
//!
//! 从 PDF（及纯文本 / CSV）文档中识别题目，调用 LLM 生成选项，输出测验 JSON
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `FolderSource` - 列出并读取本地文档
//! - `DocumentTextExtractor` - 按页提取文本
//! - `JsonFileSink` - 写出 `<title>.json` 和清单
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `QuestionDetector` - 逐行识别题目并确定选项
//! - `option_normalizer` - 清洗 LLM 输出
//! - `quiz_assembler` - 组装测验
//! - `LlmService` - 选项生成能力（`OptionGenerator`）
//! - `SkipWriter` - 写 skipped.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `DocumentFlow` - 一份文档的完整流程（读取 → 提取 → 识别 → 组装 → 输出）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 顺序处理全部文档，隔离单份文档的失败
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{QuestionRecord, QuizDocument};
pub use orchestrator::{App, RunSummary};
pub use services::{OptionGenerator, QuestionDetector};
pub use workflow::{DocumentCtx, DocumentFlow};
