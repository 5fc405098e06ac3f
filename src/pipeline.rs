//! 处理流程
//!
//! 把一组输入文件按逐个或合并的方式导出为生词、引文和统计文件。

// 标准库导入
use std::path::PathBuf;

// 第三方crate导入
use tracing::info;

// 本地模块导入
use crate::config::Cli;
use crate::error::Result;
use crate::exporter::{Exporter, VocabularyExport};
use crate::extractor::LocationPattern;
use crate::kindle_export::KindleExport;
use crate::translator::{translate_vocabulary, Translate};

/// 导出选项
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// 是否写出生词文件
    pub vocabulary: bool,
    /// 是否写出引文文件
    pub quotes: bool,
    /// 是否把所有输入合并为一组输出
    pub merge: bool,
    /// 翻译目标语言
    pub target_lang: String,
}

impl ExportOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            vocabulary: cli.export_vocabulary(),
            quotes: cli.export_quotes(),
            merge: cli.merge,
            target_lang: cli.target_lang.clone(),
        }
    }
}

/// 一个集合实际写出的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub name: String,
    pub vocabulary: Option<PathBuf>,
    pub quotes: Option<PathBuf>,
    pub stats: PathBuf,
}

/// 根据合并选项把输入文件组织成集合
pub fn build_exports(files: &[PathBuf], pattern: &LocationPattern, merge: bool) -> Vec<KindleExport> {
    if merge {
        return vec![KindleExport::merged(files.to_vec(), pattern.clone())];
    }

    files
        .iter()
        .map(|file| KindleExport::new(vec![file.clone()], pattern.clone()))
        .collect()
}

/// 导出一个集合的生词、引文和统计；统计文件总是写出
///
/// 提供翻译器时生词按 "单词 - 译文" 写出。
pub async fn process_export<T: Translate>(
    export: &KindleExport,
    options: &ExportOptions,
    translator: Option<&T>,
    exporter: &Exporter,
) -> Result<ExportReport> {
    let name = export.output_name();
    info!("📝 {}: {} 条划线", name, export.highlights()?.len());

    let vocabulary = if options.vocabulary {
        let words = export.vocabulary()?;
        let path = match translator {
            Some(translator) => {
                let translations =
                    translate_vocabulary(translator, &words, &options.target_lang).await;
                exporter.save_vocabulary(&name, VocabularyExport::Translated(&translations))?
            }
            None => exporter.save_vocabulary(&name, VocabularyExport::Plain(&words))?,
        };
        info!("💾 Vocabulary saved to {}", path.display());
        Some(path)
    } else {
        None
    };

    let quotes = if options.quotes {
        let path = exporter.save_quotes(&name, &export.quotes()?)?;
        info!("💾 Quotes saved to {}", path.display());
        Some(path)
    } else {
        None
    };

    let stats = exporter.save_stats(&name, export.stats()?)?;
    info!("💾 Statistics saved to {}", stats.display());

    Ok(ExportReport {
        name,
        vocabulary,
        quotes,
        stats,
    })
}

/// 依次处理所有集合，遇到第一个错误即停止
pub async fn run_exports<T: Translate>(
    files: &[PathBuf],
    pattern: &LocationPattern,
    options: &ExportOptions,
    translator: Option<&T>,
    exporter: &Exporter,
) -> Result<Vec<(KindleExport, ExportReport)>> {
    let exports = build_exports(files, pattern, options.merge);
    let total = exports.len();
    let mut processed = Vec::with_capacity(total);

    for (index, export) in exports.into_iter().enumerate() {
        info!("📖 [{}/{}] {}", index + 1, total, export.output_name());
        let report = process_export(&export, options, translator, exporter).await?;
        processed.push((export, report));
    }

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    struct UppercaseTranslator;

    impl Translate for UppercaseTranslator {
        async fn translate(&self, word: &str, _target_lang: &str) -> Result<String> {
            Ok(word.to_uppercase())
        }
    }

    const NO_TRANSLATOR: Option<&UppercaseTranslator> = None;

    fn write_export(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(
            &path,
            "<html><body>\
             <div class=\"noteHeading\">Seite 2 · Position 7</div><div class=\"noteText\">Abend</div>\
             <div class=\"noteHeading\">Seite 1 · Position 3</div><div class=\"noteText\">Er kam spät.</div>\
             </body></html>",
        )
        .unwrap();
        path
    }

    fn options(vocabulary: bool, quotes: bool, merge: bool) -> ExportOptions {
        ExportOptions {
            vocabulary,
            quotes,
            merge,
            target_lang: "de".to_string(),
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_vocab_only_still_writes_stats() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let book = write_export(&input, "book.html");
        let exporter = Exporter::new(output.path());

        let processed = run_exports(
            &[book],
            &LocationPattern::default(),
            &options(true, false, false),
            NO_TRANSLATOR,
            &exporter,
        )
        .await
        .unwrap();

        let report = &processed[0].1;
        assert_eq!(report.quotes, None);
        assert_eq!(entries(&output.path().join("book")), vec!["vocabulary.txt"]);
        assert_eq!(fs::read_to_string(report.vocabulary.as_ref().unwrap()).unwrap(), "abend\n");
        assert!(output.path().join("stats/book_stats.json").is_file());
    }

    #[tokio::test]
    async fn test_quotes_only_skips_vocabulary() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let book = write_export(&input, "book.html");
        let exporter = Exporter::new(output.path());

        let processed = run_exports(
            &[book],
            &LocationPattern::default(),
            &options(false, true, false),
            Some(&UppercaseTranslator),
            &exporter,
        )
        .await
        .unwrap();

        let report = &processed[0].1;
        assert_eq!(report.vocabulary, None);
        assert_eq!(entries(&output.path().join("book")), vec!["quotes.txt"]);
        assert_eq!(
            fs::read_to_string(report.quotes.as_ref().unwrap()).unwrap(),
            "Page 1, Position 3:\nEr kam spät.\n\n"
        );
        assert!(report.stats.is_file());
    }

    #[tokio::test]
    async fn test_per_file_mode_writes_one_location_per_input() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let files = vec![write_export(&input, "a.html"), write_export(&input, "b.html")];
        let exporter = Exporter::new(output.path());

        let processed = run_exports(
            &files,
            &LocationPattern::default(),
            &options(true, true, false),
            NO_TRANSLATOR,
            &exporter,
        )
        .await
        .unwrap();

        assert_eq!(processed.len(), 2);
        assert_eq!(entries(output.path()), vec!["a", "b", "stats"]);
        assert_eq!(
            entries(&output.path().join("stats")),
            vec!["a_stats.json", "b_stats.json"]
        );
    }

    #[tokio::test]
    async fn test_merge_mode_writes_single_location() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let files = vec![
            write_export(&input, "a.html"),
            write_export(&input, "b.html"),
            write_export(&input, "c.html"),
        ];
        let exporter = Exporter::new(output.path());

        let processed = run_exports(
            &files,
            &LocationPattern::default(),
            &options(true, true, true),
            Some(&UppercaseTranslator),
            &exporter,
        )
        .await
        .unwrap();

        assert_eq!(processed.len(), 1);
        let (export, report) = &processed[0];
        assert_eq!(report.name, "merged_a_b_c");
        assert_eq!(export.stats().unwrap().total_highlights, 6);

        assert_eq!(entries(output.path()), vec!["merged_a_b_c", "stats"]);
        assert_eq!(
            entries(&output.path().join("stats")),
            vec!["merged_a_b_c_stats.json"]
        );
        assert_eq!(
            fs::read_to_string(output.path().join("merged_a_b_c/vocabulary.txt")).unwrap(),
            "abend - ABEND\n"
        );
    }

    #[tokio::test]
    async fn test_merge_mode_with_single_input() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let book = write_export(&input, "book.html");
        let exporter = Exporter::new(output.path());

        let processed = run_exports(
            &[book],
            &LocationPattern::default(),
            &options(true, true, true),
            NO_TRANSLATOR,
            &exporter,
        )
        .await
        .unwrap();

        assert_eq!(processed[0].1.name, "merged_book");
        assert_eq!(entries(output.path()), vec!["merged_book", "stats"]);
        assert!(output.path().join("stats/merged_book_stats.json").is_file());
    }

    #[tokio::test]
    async fn test_missing_input_stops_run() {
        let output = tempdir().unwrap();
        let exporter = Exporter::new(output.path());

        let result = run_exports(
            &[PathBuf::from("/no/such/book.html")],
            &LocationPattern::default(),
            &options(true, true, false),
            NO_TRANSLATOR,
            &exporter,
        )
        .await;

        assert!(matches!(
            result,
            Err(crate::error::VokindleError::SourceRead { .. })
        ));
        assert!(entries(output.path()).is_empty());
    }

    #[test]
    fn test_options_from_cli() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["vokindle", "a.html", "--quotes-only", "--merge", "-l", "fr"])
            .unwrap();
        let options = ExportOptions::from_cli(&cli);

        assert!(!options.vocabulary);
        assert!(options.quotes);
        assert!(options.merge);
        assert_eq!(options.target_lang, "fr");
    }
}
