pub mod llm_service;
pub mod option_normalizer;
pub mod question_detector;
pub mod quiz_assembler;
pub mod skip_writer;

pub use llm_service::{LlmService, OptionGenerator};
pub use option_normalizer::{fallback_options, normalize_options};
pub use question_detector::{Detection, DetectionStats, QuestionDetector};
pub use quiz_assembler::assemble_quiz;
pub use skip_writer::SkipWriter;
