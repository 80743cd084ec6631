//! 基础设施层（Infrastructure）
//!
//! 持有外部资源（文件系统、PDF 解析器），只暴露能力，不认识题目流程

pub mod document_source;
pub mod quiz_sink;
pub mod text_extractor;

pub use document_source::{DocumentSource, FolderSource};
pub use quiz_sink::{JsonFileSink, ManifestEntry, QuizSink, MANIFEST_FILE};
pub use text_extractor::{DocumentTextExtractor, TextExtractor};
