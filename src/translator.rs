use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};

use crate::config::VokindleConfig;
use crate::constants::translation_config::TRANSLATION_ERROR_PREFIX;
use crate::error::Result;
use crate::vokindle_error;

/// 单词翻译能力
///
/// 真实实现走HTTP翻译服务，测试中可以替换为内存实现。
#[allow(async_fn_in_trait)]
pub trait Translate {
    async fn translate(&self, word: &str, target_lang: &str) -> Result<String>;
}

/// 基于HTTP的翻译客户端（DeepLX兼容接口）
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: Client,
    api_url: String,
    source_lang: String,
}

impl HttpTranslator {
    /// 根据配置创建HTTP客户端
    pub fn new(config: &VokindleConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()
            .context("创建HTTP客户端失败")?;

        Ok(Self {
            client,
            api_url: config.api_url().to_string(),
            source_lang: config.source_lang().to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl Translate for HttpTranslator {
    async fn translate(&self, word: &str, target_lang: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&json!({
                "text": word,
                "source_lang": self.source_lang,
                "target_lang": target_lang
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(vokindle_error!(
                translation_api,
                status.as_u16(),
                format!("翻译API返回错误状态: {}", status),
                self.api_url
            ));
        }

        let response_text = response.text().await?;
        let translated = parse_translation_response(&response_text);

        if translated.is_empty() {
            return Err(vokindle_error!(
                translation_api,
                status.as_u16(),
                "翻译结果为空",
                self.api_url
            ));
        }

        Ok(translated)
    }
}

/// 从响应中取出译文，支持 data / text / result 字段，非JSON时使用原文
pub fn parse_translation_response(response_text: &str) -> String {
    let translated = match serde_json::from_str::<serde_json::Value>(response_text) {
        Ok(json_val) => json_val
            .get("data")
            .or_else(|| json_val.get("text"))
            .or_else(|| json_val.get("result"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_default(),
        Err(_) => response_text.to_string(),
    };

    translated.trim().to_string()
}

/// 翻译失败时写入输出的占位文本
pub fn translation_error_marker(message: &str) -> String {
    format!("{}: {}", TRANSLATION_ERROR_PREFIX, message)
}

/// 逐个翻译生词
///
/// 按输入顺序依次调用，单词失败时记录错误占位文本并继续处理剩余单词。
pub async fn translate_vocabulary<T: Translate>(
    translator: &T,
    vocabulary: &[String],
    target_lang: &str,
) -> Vec<(String, String)> {
    let total = vocabulary.len();
    let mut translations = Vec::with_capacity(total);
    let mut failed = 0;

    info!("🌐 开始翻译 {} 个生词 → {}", total, target_lang);

    for (index, word) in vocabulary.iter().enumerate() {
        info!("🔤 [{}/{}] {}", index + 1, total, word);

        let translation = match translator.translate(word, target_lang).await {
            Ok(translation) => translation,
            Err(e) => {
                warn!("❌ 翻译失败 '{}': {}", word, e);
                failed += 1;
                translation_error_marker(&e.to_string())
            }
        };

        translations.push((word.clone(), translation));
    }

    info!("✅ 翻译完成: 成功 {}/{}", total - failed, total);

    translations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// 记录调用顺序的内存翻译器
    struct FakeTranslator {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl FakeTranslator {
        fn new() -> Self {
            Self { calls: RefCell::new(Vec::new()) }
        }
    }

    impl Translate for FakeTranslator {
        async fn translate(&self, word: &str, target_lang: &str) -> Result<String> {
            self.calls
                .borrow_mut()
                .push((word.to_string(), target_lang.to_string()));

            if word == "xyz" {
                return Err(vokindle_error!(network, "connection refused"));
            }
            Ok(format!("{}-{}", word, target_lang))
        }
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_translate_in_order() {
        let translator = FakeTranslator::new();
        let vocabulary = words(&["abend", "zeit"]);

        let translations = translate_vocabulary(&translator, &vocabulary, "fr").await;

        assert_eq!(
            translations,
            vec![
                ("abend".to_string(), "abend-fr".to_string()),
                ("zeit".to_string(), "zeit-fr".to_string()),
            ]
        );
        assert_eq!(
            *translator.calls.borrow(),
            vec![
                ("abend".to_string(), "fr".to_string()),
                ("zeit".to_string(), "fr".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_is_recorded_and_batch_continues() {
        let translator = FakeTranslator::new();
        let vocabulary = words(&["abc", "xyz", "zoo"]);

        let translations = translate_vocabulary(&translator, &vocabulary, "de").await;

        assert_eq!(translations.len(), 3);
        assert_eq!(translations[1].0, "xyz");
        assert_eq!(
            translations[1].1,
            "Translation error: 翻译服务请求失败: connection refused"
        );
        assert_eq!(translations[2].1, "zoo-de");
        assert_eq!(translator.calls.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_vocabulary() {
        let translator = FakeTranslator::new();
        let translations = translate_vocabulary(&translator, &[], "de").await;
        assert!(translations.is_empty());
        assert!(translator.calls.borrow().is_empty());
    }

    #[test]
    fn test_parse_translation_response() {
        assert_eq!(parse_translation_response(r#"{"code":200,"data":"Abend"}"#), "Abend");
        assert_eq!(parse_translation_response(r#"{"text":" Zeit "}"#), "Zeit");
        assert_eq!(parse_translation_response(r#"{"result":"Mond"}"#), "Mond");
        assert_eq!(parse_translation_response("Sonne\n"), "Sonne");
        assert_eq!(parse_translation_response(r#"{"message":"nope"}"#), "");
    }

    #[test]
    fn test_http_translator_from_config() {
        let config = VokindleConfig::new().with_api_url("http://127.0.0.1:9/translate");
        let translator = HttpTranslator::new(&config).unwrap();
        assert_eq!(translator.api_url(), "http://127.0.0.1:9/translate");
    }
}
