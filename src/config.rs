//! 配置管理模块
//!
//! 提供CLI参数解析和提取/翻译/导出配置管理功能

// 标准库导入
use std::path::{Path, PathBuf};

// 第三方crate导入
use clap::Parser;
use tracing::warn;

// 本地模块导入
use crate::constants::kindle_format::DEFAULT_LOCATION_PATTERN;
use crate::constants::output_layout::DEFAULT_OUTPUT_DIR;
use crate::constants::translation_config::{
    DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG, LOCAL_API_URL, REQUEST_TIMEOUT_SECONDS,
};
use crate::constants::{is_supported_language, is_valid_api_url};
use crate::error::Result;
use crate::extractor::LocationPattern;
use crate::vokindle_error;

/// Vokindle运行配置
///
/// 支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use vokindle::config::VokindleConfig;
///
/// let config = VokindleConfig::new()
///     .target_language("fr")
///     .with_api_url("http://localhost:1188/translate")
///     .with_output_dir("exports");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct VokindleConfig {
    /// 目标语言代码 (如: de, fr, es)
    target_lang: String,
    /// 源语言代码
    source_lang: String,
    /// 翻译API服务地址
    api_url: String,
    /// 输出根目录
    output_dir: PathBuf,
    /// 标题位置匹配正则
    location_pattern: String,
    /// 翻译请求超时时间（秒）
    request_timeout_secs: u64,
}

impl VokindleConfig {
    /// 创建新的配置实例
    ///
    /// 返回具有默认值的配置实例：
    /// - 目标语言: 德语 ("de")
    /// - 源语言: 英语 ("en")
    /// - API地址: 本地翻译服务
    /// - 输出目录: output
    /// - 请求超时: 30秒
    pub fn new() -> Self {
        Self {
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            api_url: LOCAL_API_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            location_pattern: DEFAULT_LOCATION_PATTERN.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECONDS,
        }
    }

    /// 从命令行参数构建配置
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::new()
            .target_language(&cli.target_lang)
            .with_api_url(&cli.api)
            .with_output_dir(&cli.output_dir)
            .with_request_timeout(cli.timeout);

        if let Some(pattern) = &cli.location_pattern {
            config = config.with_location_pattern(pattern);
        }

        config
    }

    /// 获取目标语言代码
    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// 获取源语言代码
    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    /// 获取API地址
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// 获取输出根目录
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 获取请求超时时间
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    /// 设置目标语言代码
    pub fn target_language(mut self, lang: &str) -> Self {
        self.target_lang = lang.to_string();
        self
    }

    /// 设置API地址
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// 设置输出根目录
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// 设置位置正则
    pub fn with_location_pattern(mut self, pattern: &str) -> Self {
        self.location_pattern = pattern.to_string();
        self
    }

    /// 设置请求超时时间
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// 编译位置正则
    pub fn build_location_pattern(&self) -> Result<LocationPattern> {
        LocationPattern::new(&self.location_pattern)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.target_lang.trim().is_empty() {
            return Err(vokindle_error!(config, "target_lang", "目标语言不能为空"));
        }

        if !is_supported_language(&self.target_lang) {
            warn!("⚠️  目标语言可能不受支持: {}", self.target_lang);
        }

        if !is_valid_api_url(&self.api_url) {
            return Err(vokindle_error!(
                config,
                "api_url",
                format!("无效的API地址: {}", self.api_url)
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(vokindle_error!(config, "request_timeout_secs", "超时时间必须大于0"));
        }

        self.build_location_pattern()?;

        Ok(())
    }
}

impl Default for VokindleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "从Kindle HTML导出中提取生词和引文 (Extract vocabulary and quotes from Kindle HTML exports)", long_about = None)]
pub struct Cli {
    /// Kindle HTML导出文件或包含导出文件的目录
    #[arg(value_name = "HTML_FILES", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// 翻译生词
    #[arg(long)]
    pub translate: bool,

    /// 目标语言代码 (如: de, fr, es)
    #[arg(short = 'l', long, default_value = DEFAULT_TARGET_LANG)]
    pub target_lang: String,

    /// 只导出生词
    #[arg(long)]
    pub vocab_only: bool,

    /// 只导出引文
    #[arg(long)]
    pub quotes_only: bool,

    /// 将所有输入合并为一组输出
    #[arg(long)]
    pub merge: bool,

    /// 输出根目录
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// 翻译API地址
    #[arg(short, long, default_value = LOCAL_API_URL)]
    pub api: String,

    /// 标题位置匹配正则（第一组页码，第二组位置）
    #[arg(long, value_name = "REGEX")]
    pub location_pattern: Option<String>,

    /// 翻译请求超时时间（秒）
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// 显示每个文件的统计摘要
    #[arg(long)]
    pub stats: bool,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// 是否导出生词
    pub fn export_vocabulary(&self) -> bool {
        !self.quotes_only
    }

    /// 是否导出引文
    pub fn export_quotes(&self) -> bool {
        !self.vocab_only
    }
}
