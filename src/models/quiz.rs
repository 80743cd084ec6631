use serde::{Deserialize, Serialize};

/// 正确答案未知时使用的哨兵值
pub const UNKNOWN_ANSWER: i32 = -1;

/// 单道测验题
///
/// 序列化字段顺序固定为 `question`, `options`, `correctAnswer`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    /// `-1` 或 `options` 的合法下标
    pub correct_answer: i32,
}

impl QuestionRecord {
    /// 创建正确答案未知的题目
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            question: question.into(),
            options,
            correct_answer: UNKNOWN_ANSWER,
        }
    }

    /// 正确答案是否为 `-1` 或落在选项范围内
    pub fn has_valid_answer(&self) -> bool {
        self.correct_answer == UNKNOWN_ANSWER
            || (self.correct_answer >= 0 && (self.correct_answer as usize) < self.options.len())
    }
}

/// 一份源文档对应的测验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDocument {
    pub title: String,
    pub questions: Vec<QuestionRecord>,
}

/// 选项来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOrigin {
    /// 判断题固定选项
    TrueFalse,
    /// 由 LLM 生成并清洗后的选项
    Generated,
    /// 生成失败或无可用内容时的占位选项
    Fallback,
}
