//! 导出模块
//!
//! 输出布局（相对于输出根目录）：
//! - `<name>/vocabulary.txt`
//! - `<name>/quotes.txt`
//! - `stats/<name>_stats.json`

// 标准库导入
use std::fs;
use std::path::{Path, PathBuf};

// 第三方crate导入
use tracing::debug;

// 本地模块导入
use crate::constants::output_layout::{
    QUOTES_FILE_NAME, STATS_DIR_NAME, STATS_FILE_SUFFIX, VOCABULARY_FILE_NAME,
};
use crate::error::Result;
use crate::highlight::Highlight;
use crate::stats::HighlightStats;
use crate::vokindle_error;

/// 待导出的生词
#[derive(Debug, Clone, Copy)]
pub enum VocabularyExport<'a> {
    /// 每行一个单词
    Plain(&'a [String]),
    /// 每行 "单词 - 译文"
    Translated(&'a [(String, String)]),
}

/// 按输出名称写入生词、引文和统计文件
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// 某个输出名称对应的目录
    pub fn target_dir(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    pub fn vocabulary_path(&self, name: &str) -> PathBuf {
        self.target_dir(name).join(VOCABULARY_FILE_NAME)
    }

    pub fn quotes_path(&self, name: &str) -> PathBuf {
        self.target_dir(name).join(QUOTES_FILE_NAME)
    }

    pub fn stats_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(STATS_DIR_NAME)
            .join(format!("{}{}", name, STATS_FILE_SUFFIX))
    }

    /// 写入生词文件
    pub fn save_vocabulary(&self, name: &str, vocabulary: VocabularyExport<'_>) -> Result<PathBuf> {
        let content = match vocabulary {
            VocabularyExport::Plain(words) => format_vocabulary(words),
            VocabularyExport::Translated(pairs) => format_translated_vocabulary(pairs),
        };

        let path = self.vocabulary_path(name);
        write_file(&path, &content)?;
        Ok(path)
    }

    /// 写入引文文件
    pub fn save_quotes(&self, name: &str, quotes: &[Highlight]) -> Result<PathBuf> {
        let path = self.quotes_path(name);
        write_file(&path, &format_quotes(quotes))?;
        Ok(path)
    }

    /// 写入统计JSON
    pub fn save_stats(&self, name: &str, stats: &HighlightStats) -> Result<PathBuf> {
        let path = self.stats_path(name);
        let json = serde_json::to_string_pretty(stats)
            .map_err(|e| vokindle_error!(output, path.display(), "序列化", e))?;
        write_file(&path, &json)?;
        Ok(path)
    }
}

pub fn format_vocabulary(words: &[String]) -> String {
    let mut content = String::new();
    for word in words {
        content.push_str(word);
        content.push('\n');
    }
    content
}

pub fn format_translated_vocabulary(pairs: &[(String, String)]) -> String {
    let mut content = String::new();
    for (word, translation) in pairs {
        content.push_str(&format!("{} - {}\n", word, translation));
    }
    content
}

/// 每条引文：标题行、正文、空行
pub fn format_quotes(quotes: &[Highlight]) -> String {
    let mut content = String::new();
    for quote in quotes {
        content.push_str(&format!("Page {}, Position {}:\n", quote.page, quote.position));
        content.push_str(&format!("{}\n\n", quote.text));
    }
    content
}

/// 写文件前确保父目录存在
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| vokindle_error!(output, parent.display(), "创建目录", e))?;
    }

    fs::write(path, content).map_err(|e| vokindle_error!(output, path.display(), "写入", e))?;
    debug!("写入文件完成: {} ({} 字节)", path.display(), content.len());

    Ok(())
}
