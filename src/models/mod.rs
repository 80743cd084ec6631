pub mod document;
pub mod quiz;

pub use document::{DocumentKind, DocumentText, RawPage, SourceDocument};
pub use quiz::{OptionOrigin, QuestionRecord, QuizDocument, UNKNOWN_ANSWER};
