use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::constants::output_layout::MERGED_PREFIX;
use crate::error::Result;
use crate::vokindle_error;

/// 初始化日志系统
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// 验证输入文件
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(vokindle_error!(input_validation, path.display(), "输入文件不存在"));
    }

    if !path.is_file() {
        return Err(vokindle_error!(input_validation, path.display(), "输入路径不是文件"));
    }

    if !is_html_file(path) {
        warn!("⚠️  文件扩展名不是HTML: {}", path.display());
    }

    Ok(())
}

/// 展开输入：目录中的 .html/.htm 文件按路径排序加入，文件原样保留
pub fn collect_input_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| is_html_file(path))
                .collect();
            found.sort();

            if found.is_empty() {
                warn!("⚠️  目录中没有HTML文件: {}", input.display());
            }
            files.extend(found);
        } else {
            validate_input_file(input)?;
            files.push(input.clone());
        }
    }

    if files.is_empty() {
        return Err(vokindle_error!(input_validation, "inputs", "没有可处理的HTML文件"));
    }

    Ok(files)
}

fn is_html_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// 去掉目录和扩展名后的文件名
pub fn source_basename(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 多个来源合并后的输出名称: merged_a_b
pub fn merged_name<P: AsRef<Path>>(paths: &[P]) -> String {
    let names: Vec<String> = paths.iter().map(|p| source_basename(p.as_ref())).collect();
    format!("{}{}", MERGED_PREFIX, names.join("_"))
}
