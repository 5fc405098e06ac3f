/// Vokindle配置常量
///
/// 该文件定义了提取、翻译和导出相关的常量配置，方便统一管理和维护

/// 翻译服务配置
pub mod translation_config {
    /// 本地翻译API地址（DeepLX兼容接口）
    pub const LOCAL_API_URL: &str = "http://localhost:1188/translate";

    /// 默认目标语言
    pub const DEFAULT_TARGET_LANG: &str = "de";

    /// 默认源语言
    pub const DEFAULT_SOURCE_LANG: &str = "en";

    /// 请求超时时间（秒）
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// 翻译失败时写入输出的前缀
    pub const TRANSLATION_ERROR_PREFIX: &str = "Translation error";

    /// 支持的语言代码
    pub const SUPPORTED_LANGUAGES: &[&str] = &[
        "zh", "en", "ja", "ko", "fr", "de", "es", "it", "pt", "ru",
        "ar", "hi", "th", "vi", "id", "ms", "tl", "nl", "sv", "da",
        "no", "fi", "pl", "cs", "sk", "hu", "ro", "bg", "hr", "sr",
        "sl", "et", "lv", "lt", "mt", "ga", "cy", "is", "mk", "sq"
    ];
}

/// Kindle导出格式配置
pub mod kindle_format {
    /// 笔记标题元素的class
    pub const NOTE_HEADING_CLASS: &str = "noteHeading";

    /// 笔记正文元素的class
    pub const NOTE_TEXT_CLASS: &str = "noteText";

    /// 默认位置匹配正则：第一组为页码，第二组为位置
    ///
    /// 兼容德语/英语导出，以及被错误解码成 `Â·` 的分隔符
    pub const DEFAULT_LOCATION_PATTERN: &str =
        r"(?:Seite|Page)\s+(\d+)\s*\S*\s*(?:Position|Location)\s+(\d+)";
}

/// 输出布局配置
pub mod output_layout {
    /// 默认输出根目录
    pub const DEFAULT_OUTPUT_DIR: &str = "output";

    /// 统计文件子目录
    pub const STATS_DIR_NAME: &str = "stats";

    /// 生词文件名
    pub const VOCABULARY_FILE_NAME: &str = "vocabulary.txt";

    /// 引文文件名
    pub const QUOTES_FILE_NAME: &str = "quotes.txt";

    /// 统计文件后缀
    pub const STATS_FILE_SUFFIX: &str = "_stats.json";

    /// 合并输出的名称前缀
    pub const MERGED_PREFIX: &str = "merged_";

    /// 摘要中显示的高频词数量
    pub const SUMMARY_TOP_WORDS: usize = 10;
}

/// 验证语言代码是否支持
pub fn is_supported_language(lang: &str) -> bool {
    translation_config::SUPPORTED_LANGUAGES.contains(&lang)
}

/// 验证API URL是否有效
pub fn is_valid_api_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.scheme() == "http" || parsed.scheme() == "https",
        Err(_) => false,
    }
}
