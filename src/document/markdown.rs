//! 通用 Markdown → 中间文档转换
//!
//! 用 `pulldown-cmark` 把模型输出解析为带显式标题级别标签的段落序列，
//! 后处理入口据此重排样式，不再解析任何样式名字符串。
//! 行内公式（`$...$`）不做解析，原样保留为文本。

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// 转换后的单个段落
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParagraph {
    /// 标题级别；None 表示正文段落
    pub heading_level: Option<usize>,
    pub text: String,
}

/// 通用转换器产出的中间文档
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
    pub paragraphs: Vec<RawParagraph>,
}

struct Walker {
    paragraphs: Vec<RawParagraph>,
    buf: String,
    heading_level: Option<usize>,
    /// 嵌套列表的编号计数，None 表示无序列表
    lists: Vec<Option<u64>>,
    /// 列表项编号前缀，延迟到第一段文本时写入
    pending_prefix: Option<String>,
}

impl Walker {
    fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            buf: String::new(),
            heading_level: None,
            lists: Vec::new(),
            pending_prefix: None,
        }
    }

    /// 向缓冲追加文本；列表项的编号前缀只附着在第一段文本之前
    fn push_text(&mut self, text: &str) {
        if self.buf.is_empty() {
            if let Some(prefix) = self.pending_prefix.take() {
                self.buf.push_str(&prefix);
            }
        }
        self.buf.push_str(text);
    }

    /// 把缓冲中的文本收束为一个段落
    fn flush(&mut self) {
        let text = self.buf.trim();
        if !text.is_empty() {
            self.paragraphs.push(RawParagraph {
                heading_level: self.heading_level,
                text: text.to_string(),
            });
        }
        self.buf.clear();
    }
}

/// 把 Markdown 文本转换为中间文档
///
/// 软换行/硬换行会把正文拆成独立段落，使得题干与各选项各占一段，
/// 有序列表项重新带上字面编号前缀。
pub fn convert_markdown(markdown: &str) -> RawDocument {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut walker = Walker::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                walker.flush();
                walker.heading_level = Some(level as usize);
            }
            Event::End(TagEnd::Heading(_)) => {
                walker.flush();
                walker.heading_level = None;
            }

            Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph) => {
                walker.flush();
            }

            Event::Start(Tag::List(start)) => {
                walker.flush();
                walker.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                walker.lists.pop();
            }
            Event::Start(Tag::Item) => {
                walker.flush();
                if let Some(Some(number)) = walker.lists.last_mut() {
                    walker.pending_prefix = Some(format!("{}. ", number));
                    *number += 1;
                }
            }
            Event::End(TagEnd::Item) => {
                walker.flush();
                walker.pending_prefix = None;
            }

            Event::Text(text) => walker.push_text(&text),
            Event::Code(code) => walker.push_text(&code),

            // 行内换行：各占一段
            Event::SoftBreak | Event::HardBreak => walker.flush(),

            Event::Rule => walker.flush(),

            // 行内标记（加粗、斜体、链接等）压平为纯文本
            _ => {}
        }
    }
    walker.flush();

    RawDocument {
        paragraphs: walker.paragraphs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_gets_explicit_level() {
        let doc = convert_markdown("## 一、选择题\n\n正文段落");
        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.paragraphs[0].heading_level, Some(2));
        assert_eq!(doc.paragraphs[0].text, "一、选择题");
        assert_eq!(doc.paragraphs[1].heading_level, None);
        assert_eq!(doc.paragraphs[1].text, "正文段落");
    }

    #[test]
    fn test_ordered_list_keeps_literal_number() {
        let doc = convert_markdown("1. 第一题\n\n2. 第二题");
        let texts: Vec<&str> = doc.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["1. 第一题", "2. 第二题"]);
    }

    #[test]
    fn test_soft_breaks_split_options_into_paragraphs() {
        let doc = convert_markdown("1. 题干（ ）\nA. 甲\nB. 乙");
        let texts: Vec<&str> = doc.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["1. 题干（ ）", "A. 甲", "B. 乙"]);
        assert!(doc.paragraphs.iter().all(|p| p.heading_level.is_none()));
    }

    #[test]
    fn test_inline_math_left_as_text() {
        let doc = convert_markdown("若 $a > 0$，则 $a$ 的相反数是______。");
        assert_eq!(doc.paragraphs[0].text, "若 $a > 0$，则 $a$ 的相反数是______。");
    }

    #[test]
    fn test_inline_markup_flattened() {
        let doc = convert_markdown("包含 **加粗** 与 `代码` 的段落");
        assert_eq!(doc.paragraphs[0].text, "包含 加粗 与 代码 的段落");
    }
}
