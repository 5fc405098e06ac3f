//! Kindle导出集合
//!
//! 一个 [`KindleExport`] 对应一组不可变的源文件。划线和统计在首次访问时计算并缓存，
//! 之后不会重新读取源文件；合并会创建新的实例。

// 标准库导入
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

// 第三方crate导入
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

// 本地模块导入
use crate::classifier::{extract_quotes, extract_vocabulary};
use crate::error::Result;
use crate::extractor::{extract_highlights, LocationPattern};
use crate::highlight::Highlight;
use crate::html_processor::KindleDocument;
use crate::stats::HighlightStats;
use crate::utils::{merged_name, source_basename};

#[derive(Debug, Clone)]
pub struct KindleExport {
    sources: Vec<PathBuf>,
    pattern: LocationPattern,
    date: NaiveDate,
    /// 合并集合总是使用 `merged_` 前缀的输出名称
    merged: bool,
    highlights: OnceCell<Vec<Highlight>>,
    stats: OnceCell<HighlightStats>,
}

impl KindleExport {
    /// 以今天的日期作为提取日期
    pub fn new(sources: Vec<PathBuf>, pattern: LocationPattern) -> Self {
        Self::with_date(sources, pattern, Local::now().date_naive())
    }

    pub fn with_date(sources: Vec<PathBuf>, pattern: LocationPattern, date: NaiveDate) -> Self {
        Self {
            sources,
            pattern,
            date,
            merged: false,
            highlights: OnceCell::new(),
            stats: OnceCell::new(),
        }
    }

    /// 合并模式的集合，即使只有一个来源也输出到合并位置
    pub fn merged(sources: Vec<PathBuf>, pattern: LocationPattern) -> Self {
        Self {
            merged: true,
            ..Self::new(sources, pattern)
        }
    }

    pub fn is_merged(&self) -> bool {
        self.merged
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// 输出名称：合并集合为 `merged_` 加各文件名，否则为源文件名
    pub fn output_name(&self) -> String {
        match self.sources.as_slice() {
            [single] if !self.merged => source_basename(single),
            sources => merged_name(sources),
        }
    }

    /// 全部划线，按 (页码, 位置) 排序
    pub fn highlights(&self) -> Result<&[Highlight]> {
        if let Some(highlights) = self.highlights.get() {
            return Ok(highlights);
        }

        let documents = self
            .sources
            .iter()
            .map(|path| load_document(path))
            .collect::<Result<Vec<_>>>()?;

        let highlights = extract_highlights(&documents, &self.pattern, self.date);
        info!(
            "📝 {} 个文件中提取到 {} 条划线",
            self.sources.len(),
            highlights.len()
        );

        Ok(self.highlights.get_or_init(|| highlights))
    }

    /// 去重排序后的生词
    pub fn vocabulary(&self) -> Result<Vec<String>> {
        Ok(extract_vocabulary(self.highlights()?))
    }

    /// 多词引文
    pub fn quotes(&self) -> Result<Vec<Highlight>> {
        Ok(extract_quotes(self.highlights()?))
    }

    /// 统计结果
    pub fn stats(&self) -> Result<&HighlightStats> {
        if let Some(stats) = self.stats.get() {
            return Ok(stats);
        }

        let stats = HighlightStats::compute(self.highlights()?);
        Ok(self.stats.get_or_init(|| stats))
    }

    /// 合并两个集合，返回包含双方源文件的新实例
    pub fn merge_with(&self, other: &KindleExport) -> KindleExport {
        let sources = self
            .sources
            .iter()
            .chain(other.sources.iter())
            .cloned()
            .collect();

        KindleExport {
            merged: true,
            ..KindleExport::with_date(sources, self.pattern.clone(), self.date)
        }
    }
}

fn load_document(path: &Path) -> Result<KindleDocument> {
    debug!("读取HTML: {}", path.display());
    KindleDocument::from_file(path)
}
