//! HTML处理模块
//!
//! 负责把Kindle导出的HTML解析为按文档顺序排列的笔记标题和笔记正文

// 标准库导入
use std::path::Path;

// 第三方crate导入
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::debug;

// 本地模块导入
use crate::constants::kindle_format::{NOTE_HEADING_CLASS, NOTE_TEXT_CLASS};
use crate::error::Result;
use crate::vokindle_error;

/// 按文档顺序提供笔记标题与正文的数据源
///
/// 提取器只依赖这个接口，测试中可以用内存数据替代真实的HTML解析结果。
pub trait NoteSource {
    /// 所有笔记标题元素的文本，按文档顺序
    fn note_headings(&self) -> Vec<String>;

    /// 所有笔记正文元素的文本，按文档顺序
    fn note_texts(&self) -> Vec<String>;
}

/// 解析后的Kindle导出文档
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindleDocument {
    headings: Vec<String>,
    texts: Vec<String>,
}

/// 笔记元素的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteKind {
    Heading,
    Text,
}

impl KindleDocument {
    /// 从HTML字符串解析
    pub fn parse(html: &str) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(|e| vokindle_error!(html_parse, e))?;

        let mut document = KindleDocument::default();
        collect_notes(&dom.document, &mut document);

        debug!(
            "解析HTML完成: {} 个标题, {} 个正文",
            document.headings.len(),
            document.texts.len()
        );

        Ok(document)
    }

    /// 读取并解析HTML文件
    pub fn from_file(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)
            .map_err(|e| vokindle_error!(source_read, path.display(), e))?;
        Self::parse(&html)
    }
}

impl NoteSource for KindleDocument {
    fn note_headings(&self) -> Vec<String> {
        self.headings.clone()
    }

    fn note_texts(&self) -> Vec<String> {
        self.texts.clone()
    }
}

/// 深度优先遍历DOM，保证文档顺序
fn collect_notes(root: &Handle, document: &mut KindleDocument) {
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        match note_kind(&node) {
            Some(NoteKind::Heading) => document.headings.push(own_text(&node)),
            Some(NoteKind::Text) => document.texts.push(own_text(&node)),
            None => {}
        }

        // 逆序入栈，使子节点按原顺序出栈
        for child in node.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }
}

/// 判断节点是否为笔记元素：只接受 div，按class中的独立单词匹配
fn note_kind(node: &Handle) -> Option<NoteKind> {
    let NodeData::Element { ref name, ref attrs, .. } = node.data else {
        return None;
    };

    if name.local.as_ref() != "div" {
        return None;
    }

    let attrs = attrs.borrow();
    let class_attr = attrs.iter().find(|attr| attr.name.local.as_ref() == "class")?;

    class_attr
        .value
        .split_whitespace()
        .find_map(|class| match class {
            NOTE_HEADING_CLASS => Some(NoteKind::Heading),
            NOTE_TEXT_CLASS => Some(NoteKind::Text),
            _ => None,
        })
}

/// 收集元素下的全部文本，遇到嵌套的笔记元素时停止
///
/// Kindle导出用 `</h3>` 关闭 noteText，解析后下一条笔记会嵌套在当前正文中。
fn own_text(element: &Handle) -> String {
    let mut text = String::new();
    let mut stack: Vec<Handle> = element.children.borrow().iter().rev().cloned().collect();

    while let Some(node) = stack.pop() {
        if note_kind(&node).is_some() {
            continue;
        }

        match node.data {
            NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
            NodeData::Element { .. } => {
                for child in node.children.borrow().iter().rev() {
                    stack.push(child.clone());
                }
            }
            _ => {}
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>Notebook</title></head>
<body>
<div class="bodyContainer">
<div class="notebookFor">Notizbuch für</div>
<div class="bookTitle">Der Process</div>
<div class="sectionHeading">Kapitel 1</div>
<div class="noteHeading">Markierung (<span class="highlight_yellow">Gelb</span>) - Seite 5 · Position 120</div>
<div class="noteText">Verantwortung</div>
<div class="noteHeading">Markierung (<span class="highlight_blue">Blau</span>) - Seite 7 · Position 140</div>
<div class="noteText">Jemand musste Josef K. <b>verleumdet</b> haben</div>
</div>
</body>
</html>"#;

    #[test]
    fn test_parse_sample_document() {
        let document = KindleDocument::parse(SAMPLE).unwrap();

        assert_eq!(
            document.note_headings(),
            vec![
                "Markierung (Gelb) - Seite 5 · Position 120".to_string(),
                "Markierung (Blau) - Seite 7 · Position 140".to_string(),
            ]
        );
        assert_eq!(
            document.note_texts(),
            vec![
                "Verantwortung".to_string(),
                "Jemand musste Josef K. verleumdet haben".to_string(),
            ]
        );
    }

    #[test]
    fn test_unclosed_note_text_does_not_swallow_next_note() {
        // Kindle schließt noteText mit </h3>
        let html = r#"<html><body>
<div class='noteHeading'>Highlight - Page 1 · Location 10</div>
<div class='noteText'>first</h3>
<div class='noteHeading'>Highlight - Page 2 · Location 20</div>
<div class='noteText'>second</h3>
</body></html>"#;

        let document = KindleDocument::parse(html).unwrap();

        assert_eq!(document.note_headings().len(), 2);
        let texts: Vec<String> = document.note_texts().iter().map(|t| t.trim().to_string()).collect();
        assert_eq!(texts, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_class_matching_uses_whole_tokens() {
        let html = r#"<div class="noteTextual">ignored</div>
<div class="extra noteText">kept</div>
<div class="noteHeadingX">ignored</div>"#;

        let document = KindleDocument::parse(html).unwrap();

        assert!(document.note_headings().is_empty());
        assert_eq!(document.note_texts(), vec!["kept".to_string()]);
    }

    #[test]
    fn test_only_div_elements_are_notes() {
        let html = r#"<div class="noteHeading">Seite 1 · Position 1</div>
<span class="noteText">stray span</span>
<div class="noteText">eins <span class="noteHeading">inline</span></div>
<p class="noteHeading">not a heading</p>"#;

        let document = KindleDocument::parse(html).unwrap();

        assert_eq!(document.note_headings(), vec!["Seite 1 · Position 1".to_string()]);
        assert_eq!(document.note_texts(), vec!["eins inline".to_string()]);
    }

    #[test]
    fn test_document_without_notes() {
        let document = KindleDocument::parse("<html><body><p>nothing</p></body></html>").unwrap();
        assert!(document.note_headings().is_empty());
        assert!(document.note_texts().is_empty());
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let err = KindleDocument::from_file(Path::new("/definitely/not/here.html")).unwrap_err();
        assert!(matches!(err, crate::error::VokindleError::SourceRead { .. }));
    }
}
