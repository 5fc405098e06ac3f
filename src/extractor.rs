//! 划线提取模块
//!
//! 把笔记标题和正文按位置配对，解析页码与位置，并按 (页码, 位置) 全局排序

// 第三方crate导入
use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

// 本地模块导入
use crate::constants::kindle_format::DEFAULT_LOCATION_PATTERN;
use crate::error::Result;
use crate::highlight::Highlight;
use crate::html_processor::NoteSource;
use crate::vokindle_error;

/// 标题中的位置匹配规则
///
/// 正则的第一个捕获组为页码，第二个为位置。不同语言的Kindle导出措辞不同，
/// 因此规则可配置。
#[derive(Debug, Clone)]
pub struct LocationPattern {
    regex: Regex,
}

impl LocationPattern {
    /// 编译位置正则，要求至少两个捕获组
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| vokindle_error!(config, "location_pattern", e))?;

        // captures_len 包含整体匹配
        if regex.captures_len() < 3 {
            return Err(vokindle_error!(
                config,
                "location_pattern",
                format!("需要两个捕获组（页码、位置）: {}", pattern)
            ));
        }

        Ok(Self { regex })
    }

    /// 解析 (页码, 位置)，不匹配时返回 (0, 0)
    pub fn parse(&self, heading: &str) -> (u32, u32) {
        let Some(captures) = self.regex.captures(heading) else {
            return (0, 0);
        };

        let number = |index: usize| {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0)
        };

        (number(1), number(2))
    }
}

impl Default for LocationPattern {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_LOCATION_PATTERN).expect("默认位置正则必须有效"),
        }
    }
}

/// 从单个文档中按文档顺序提取划线
///
/// 标题与正文按位置配对；数量不一致时截断到较短的一方并记录警告。
pub fn extract_from_document<S: NoteSource + ?Sized>(
    source: &S,
    pattern: &LocationPattern,
    date: NaiveDate,
) -> Vec<Highlight> {
    let headings = source.note_headings();
    let texts = source.note_texts();

    if headings.len() != texts.len() {
        warn!(
            "⚠️  笔记标题与正文数量不一致 ({} vs {})，多余的条目将被忽略",
            headings.len(),
            texts.len()
        );
    }

    headings
        .iter()
        .zip(texts.iter())
        .map(|(heading, text)| {
            let (page, position) = pattern.parse(heading.trim());
            Highlight {
                text: text.trim().to_string(),
                page,
                position,
                date,
            }
        })
        .collect()
}

/// 依次提取多个文档，拼接后按 (页码, 位置) 稳定排序
pub fn extract_highlights<S: NoteSource>(
    sources: &[S],
    pattern: &LocationPattern,
    date: NaiveDate,
) -> Vec<Highlight> {
    let mut highlights: Vec<Highlight> = sources
        .iter()
        .flat_map(|source| extract_from_document(source, pattern, date))
        .collect();

    sort_highlights(&mut highlights);
    debug!("提取到 {} 条划线", highlights.len());

    highlights
}

/// 稳定排序，相同位置保持原有顺序
pub fn sort_highlights(highlights: &mut [Highlight]) {
    highlights.sort_by_key(|h| (h.page, h.position));
}
