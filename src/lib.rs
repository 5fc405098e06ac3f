//! Vokindle - Kindle划线生词与引文提取工具库
//!
//! 这个库提供了Kindle HTML导出解析、划线分类、词频统计、生词翻译和结果导出等核心功能。

pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod highlight;
pub mod html_processor;
pub mod kindle_export;
pub mod pipeline;
pub mod stats;
pub mod translator;
pub mod utils;

pub use error::{Result, VokindleError};
pub use highlight::Highlight;
pub use kindle_export::KindleExport;
