//! 统计模块
//!
//! 汇总划线数量、覆盖页数和词频，并提供终端摘要输出

// 标准库导入
use std::collections::{BTreeMap, HashMap, HashSet};

// 第三方crate导入
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// 本地模块导入
use crate::classifier::{extract_quotes, extract_vocabulary};
use crate::constants::output_layout::SUMMARY_TOP_WORDS;
use crate::highlight::{clean_word, Highlight};

/// 划线统计结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightStats {
    pub total_highlights: usize,
    pub vocabulary_words: usize,
    pub quotes: usize,
    pub pages_covered: usize,
    /// 预留字段，目前始终为空
    pub highlight_dates: BTreeMap<String, usize>,
    pub word_frequency: WordFrequency,
}

/// 按出现次数降序排列的词频表
///
/// 次数相同的词保持首次出现的顺序。序列化为JSON对象时保留该顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency(Vec<(String, usize)>);

impl WordFrequency {
    /// 统计所有划线的词频，忽略清洗后长度不超过1的词
    pub fn from_highlights(highlights: &[Highlight]) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for highlight in highlights {
            for token in highlight.text.split_whitespace() {
                let word = clean_word(token);
                if word.chars().count() <= 1 {
                    continue;
                }

                match index.get(&word) {
                    Some(&slot) => entries[slot].1 += 1,
                    None => {
                        index.insert(word.clone(), entries.len());
                        entries.push((word, 1));
                    }
                }
            }
        }

        // sort_by 是稳定排序
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self(entries)
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.0
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.0.iter().find(|(w, _)| w == word).map(|(_, count)| *count)
    }

    /// 前 n 个高频词
    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.0[..n.min(self.0.len())]
    }

    /// 所有计数之和
    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for WordFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in &self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl HighlightStats {
    /// 一次遍历计算全部统计
    pub fn compute(highlights: &[Highlight]) -> Self {
        let pages: HashSet<u32> = highlights.iter().map(|h| h.page).collect();

        Self {
            total_highlights: highlights.len(),
            vocabulary_words: extract_vocabulary(highlights).len(),
            quotes: extract_quotes(highlights).len(),
            pages_covered: pages.len(),
            highlight_dates: BTreeMap::new(),
            word_frequency: WordFrequency::from_highlights(highlights),
        }
    }
}

/// 打印统计摘要
pub fn print_summary(name: &str, stats: &HighlightStats) {
    println!("\n📊 统计摘要: {}", name);
    println!("═══════════════════════════════════════");
    println!("   Total highlights: {}", stats.total_highlights);
    println!("   Vocabulary words: {}", stats.vocabulary_words);
    println!("   Quotes: {}", stats.quotes);
    println!("   Pages covered: {}", stats.pages_covered);

    if !stats.word_frequency.is_empty() {
        println!("\n🔤 Top {} most frequent words:", SUMMARY_TOP_WORDS);
        for (word, count) in stats.word_frequency.top(SUMMARY_TOP_WORDS) {
            println!("   {}: {}", word, count);
        }
    }
}
