//! 文档处理上下文
//!
//! 封装"我正在处理第几份文档"这一信息

use std::fmt::Display;

/// 文档处理上下文
#[derive(Debug, Clone)]
pub struct DocumentCtx {
    /// 文档索引（从1开始，仅用于日志显示）
    pub document_index: usize,

    /// 本次运行的文档总数
    pub total: usize,

    /// 文档名（含扩展名）
    pub name: String,
}

impl DocumentCtx {
    pub fn new(document_index: usize, total: usize, name: impl Into<String>) -> Self {
        Self {
            document_index,
            total,
            name: name.into(),
        }
    }
}

impl Display for DocumentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 {}/{}]", self.document_index, self.total)
    }
}
