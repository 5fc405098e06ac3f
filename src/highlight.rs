//! 划线记录与文本清洗

use chrono::NaiveDate;
use serde::Serialize;

/// 一条从Kindle导出中提取的划线
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// 去除首尾空白后的划线内容
    pub text: String,
    /// 页码，无法解析时为0
    pub page: u32,
    /// 页内位置，无法解析时为0
    pub position: u32,
    /// 提取日期（不是原始划线日期）
    pub date: NaiveDate,
}

impl Highlight {
    /// 按空白切分后的词数
    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// 单个词的划线归为生词
    pub fn is_single_word(&self) -> bool {
        self.token_count() == 1
    }

    /// 两个及以上词的划线归为引文
    pub fn is_quote(&self) -> bool {
        self.token_count() >= 2
    }
}

/// 清洗单词：转小写，去掉首尾非单词字符（标点与空白）
///
/// 单词字符为字母、数字和下划线。结果可能为空字符串。
pub fn clean_word(word: &str) -> String {
    word.to_lowercase()
        .trim_matches(|c: char| !is_word_char(c))
        .to_string()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
