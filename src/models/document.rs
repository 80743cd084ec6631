use phf::phf_map;
use std::path::{Path, PathBuf};

/// 支持的文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// PDF，需要解析器提取文本
    Pdf,
    /// 纯文本（包括导出的在线文档）
    PlainText,
    /// 表格导出的 CSV
    Csv,
}

/// 扩展名（小写）到文档类型的映射
static KIND_BY_EXTENSION: phf::Map<&'static str, DocumentKind> = phf_map! {
    "pdf" => DocumentKind::Pdf,
    "txt" => DocumentKind::PlainText,
    "text" => DocumentKind::PlainText,
    "md" => DocumentKind::PlainText,
    "csv" => DocumentKind::Csv,
};

impl DocumentKind {
    /// 根据文件扩展名判断类型，不支持的扩展名返回 `None`
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        KIND_BY_EXTENSION.get(ext.as_str()).copied()
    }
}

/// 待处理的源文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// 文件名（含扩展名），用于日志和标题
    pub name: String,
    pub kind: DocumentKind,
}

impl SourceDocument {
    /// 从路径构建，不支持的类型返回 `None`
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = DocumentKind::from_path(&path)?;
        let name = path.file_name()?.to_string_lossy().to_string();
        Some(Self { path, name, kind })
    }
}

/// 单页提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub index: usize,
    /// 提取失败的页面为空字符串
    pub text: String,
}

/// 整份文档的文本：各页以换行拼接后去除首尾空白
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentText(String);

impl DocumentText {
    pub fn from_pages(pages: &[RawPage]) -> Self {
        let joined = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self(joined.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for DocumentText {
    fn from(text: &str) -> Self {
        Self(text.trim().to_string())
    }
}
