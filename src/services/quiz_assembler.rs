//! 测验组装 - 业务能力层
//!
//! 把一份文档的题目包装成 [`QuizDocument`]，不做校验、去重或排序。

use std::path::Path;

use crate::models::{QuestionRecord, QuizDocument};

/// 无法得到文件名主体时使用的标题
pub const UNTITLED: &str = "untitled";

/// 从文档名得到标题：去掉目录和最后一个扩展名
pub fn title_from_name(source_name: &str) -> String {
    Path::new(source_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// 组装测验
pub fn assemble_quiz(source_name: &str, questions: Vec<QuestionRecord>) -> QuizDocument {
    debug_assert!(
        questions.iter().all(QuestionRecord::has_valid_answer),
        "正确答案必须为 -1 或合法的选项下标"
    );
    QuizDocument {
        title: title_from_name(source_name),
        questions,
    }
}
