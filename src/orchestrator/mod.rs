//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<SourceDocument>)
//!     ↓
//! workflow::DocumentFlow (处理单份文档)
//!     ↓
//! services (能力层：识别 / 清洗 / 组装 / LLM)
//!     ↓
//! infrastructure (基础设施：来源 / 提取 / 输出)
//! ```
//!
//! 编排层只做调度和统计，不做具体业务判断。

pub mod batch_processor;

pub use batch_processor::{App, RunSummary};
