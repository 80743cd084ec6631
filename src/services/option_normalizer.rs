//! 选项清洗 - 业务能力层
//!
//! 把 LLM 返回的自由文本整理成最多 4 个、非空、不重复的选项。
//! 不调用模型，不会失败。

use crate::models::OptionOrigin;
use regex::Regex;
use std::sync::LazyLock;

/// 每道题最多保留的选项数
pub const MAX_OPTIONS: usize = 4;

/// 没有任何可用选项时使用的占位选项
pub const FALLBACK_OPTIONS: [&str; MAX_OPTIONS] = ["Option1", "Option2", "Option3", "Option4"];

/// 判断题的固定选项
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// 两侧都有空白的连字符（`Paris - London`），仅在逗号/换行切不开时使用
static DASH_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+-\s+").expect("分隔符正则合法"));

/// 占位选项
pub fn fallback_options() -> Vec<String> {
    FALLBACK_OPTIONS.iter().map(|s| s.to_string()).collect()
}

/// 判断题选项
pub fn true_false_options() -> Vec<String> {
    TRUE_FALSE_OPTIONS.iter().map(|s| s.to_string()).collect()
}

/// 清洗生成结果
///
/// 1. 换行视为分隔符（先替换为逗号），按逗号切分
/// 2. 去掉每段开头的 `-`/空白装饰，再去首尾空白，丢弃空段
/// 3. 去重（区分大小写，保留首次出现）
/// 4. 只剩一段时，再按 ` - ` 切分这一段（`Paris - London - Berlin`）
/// 5. 取前 4 个
///
/// 一个都不剩时返回占位选项；剩 1–3 个时原样返回。
pub fn normalize_options(raw: &str) -> Vec<String> {
    normalize_with_origin(raw).0
}

/// 同 [`normalize_options`]，并返回选项来源
pub fn normalize_with_origin(raw: &str) -> (Vec<String>, OptionOrigin) {
    let flattened = raw.replace('\n', ",");
    let mut options = clean_segments(flattened.split(','));

    if options.len() == 1 && DASH_SEPARATOR.is_match(&options[0]) {
        let single = options.remove(0);
        options = clean_segments(DASH_SEPARATOR.split(&single));
    }
    options.truncate(MAX_OPTIONS);

    if options.is_empty() {
        (fallback_options(), OptionOrigin::Fallback)
    } else {
        (options, OptionOrigin::Generated)
    }
}

/// 清理装饰、丢弃空段并去重
fn clean_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for segment in segments {
        let cleaned = segment
            .trim_start_matches(|c: char| c == '-' || c.is_whitespace())
            .trim();
        if cleaned.is_empty() || options.iter().any(|o| o == cleaned) {
            continue;
        }
        options.push(cleaned.to_string());
    }
    options
}
