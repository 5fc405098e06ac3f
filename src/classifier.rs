//! 划线分类：单词划线作为生词，多词划线作为引文

use std::collections::BTreeSet;

use crate::highlight::{clean_word, Highlight};

/// 提取生词：单词划线清洗后去重，按字典序返回
pub fn extract_vocabulary(highlights: &[Highlight]) -> Vec<String> {
    highlights
        .iter()
        .filter(|h| h.is_single_word())
        .map(|h| clean_word(&h.text))
        .filter(|word| !word.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 提取引文：保留完整记录，顺序与输入一致
pub fn extract_quotes(highlights: &[Highlight]) -> Vec<Highlight> {
    highlights.iter().filter(|h| h.is_quote()).cloned().collect()
}
