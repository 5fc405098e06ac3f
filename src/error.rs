//! 统一错误处理模块
//!
//! 读取/解析导出文件、写出结果和配置校验失败都会终止本次运行；
//! 单个生词的翻译错误只会写进输出，不会向上传播。

// 标准库导入
use std::fmt;

// 第三方crate导入
use anyhow::Error as AnyhowError;

/// Vokindle 统一错误类型
#[derive(Debug)]
pub enum VokindleError {
    /// 无法读取Kindle导出文件
    SourceRead {
        /// 导出文件路径
        path: String,
        /// 底层错误信息
        details: String,
    },

    /// HTML解析失败
    HtmlParse {
        /// 具体错误信息
        details: String,
    },

    /// 写出生词、引文或统计文件失败
    OutputWrite {
        /// 目标路径
        path: String,
        /// 操作类型（创建目录、写入、序列化）
        operation: String,
        /// 底层错误信息
        details: String,
    },

    /// 翻译服务请求失败（连接、超时等）
    Network {
        /// 错误消息
        message: String,
        /// HTTP状态码（如果适用）
        status_code: Option<u16>,
    },

    /// 翻译服务返回了错误状态或空结果
    TranslationApi {
        /// API响应状态码
        status_code: u16,
        /// 错误消息
        message: String,
        /// API地址
        api_url: String,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 输入文件校验失败
    InputValidation {
        /// 输入值
        input: String,
        /// 验证失败原因
        reason: String,
    },

    /// 内部处理错误（包装anyhow::Error）
    Internal {
        /// 包装的错误
        source: AnyhowError,
    },
}

impl fmt::Display for VokindleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VokindleError::SourceRead { path, details } => {
                write!(f, "无法读取Kindle导出文件 [{}]: {}", path, details)
            }
            VokindleError::HtmlParse { details } => {
                write!(f, "Kindle HTML解析失败: {}", details)
            }
            VokindleError::OutputWrite { path, operation, details } => {
                write!(f, "导出{}失败 [{}]: {}", operation, path, details)
            }
            VokindleError::Network { message, status_code } => match status_code {
                Some(code) => write!(f, "翻译服务请求失败 [{}]: {}", code, message),
                None => write!(f, "翻译服务请求失败: {}", message),
            },
            VokindleError::TranslationApi { status_code, message, api_url } => {
                write!(f, "翻译API错误 [{}] {}: {}", status_code, api_url, message)
            }
            VokindleError::Configuration { field, reason } => {
                write!(f, "配置错误 [{}]: {}", field, reason)
            }
            VokindleError::InputValidation { input, reason } => {
                write!(f, "输入文件无效 [{}]: {}", input, reason)
            }
            VokindleError::Internal { source } => {
                write!(f, "内部处理错误: {}", source)
            }
        }
    }
}

impl std::error::Error for VokindleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VokindleError::Internal { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Vokindle 结果类型别名
pub type Result<T> = std::result::Result<T, VokindleError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! vokindle_error {
    (source_read, $path:expr, $details:expr) => {
        $crate::error::VokindleError::SourceRead {
            path: $path.to_string(),
            details: $details.to_string(),
        }
    };
    (html_parse, $details:expr) => {
        $crate::error::VokindleError::HtmlParse {
            details: $details.to_string(),
        }
    };
    (output, $path:expr, $op:expr, $details:expr) => {
        $crate::error::VokindleError::OutputWrite {
            path: $path.to_string(),
            operation: $op.to_string(),
            details: $details.to_string(),
        }
    };
    (network, $msg:expr) => {
        $crate::error::VokindleError::Network {
            message: $msg.to_string(),
            status_code: None,
        }
    };
    (translation_api, $code:expr, $msg:expr, $url:expr) => {
        $crate::error::VokindleError::TranslationApi {
            status_code: $code,
            message: $msg.to_string(),
            api_url: $url.to_string(),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::VokindleError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
    (input_validation, $input:expr, $reason:expr) => {
        $crate::error::VokindleError::InputValidation {
            input: $input.to_string(),
            reason: $reason.to_string(),
        }
    };
}

/// HTTP客户端构建等内部失败
impl From<AnyhowError> for VokindleError {
    fn from(error: AnyhowError) -> Self {
        VokindleError::Internal { source: error }
    }
}

/// 翻译请求的发送与读取失败
impl From<reqwest::Error> for VokindleError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        VokindleError::Network {
            message: error.to_string(),
            status_code,
        }
    }
}
