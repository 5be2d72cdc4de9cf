//! 文档构建
//!
//! 两条行为一致的格式化入口：
//! 1. **直接构建**：从原始文本逐行分类、套样式，自行合成标题与副标题；
//! 2. **后处理**：接收通用 Markdown 转换产出的中间文档，按显式标题级别
//!    重排样式，并把选项行拆成"加粗字母 + 正文"两个 run。
//!
//! 两者共用 [`style`](super::style) 中的同一张样式表，最终都经
//! [`pack_docx`] 渲染为 .docx 字节。

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, LineSpacing, LineSpacingType, PageMargin, Paragraph, Run, RunFonts,
};

use crate::document::line::{classify, classify_lines, LineClass};
use crate::document::markdown::RawDocument;
use crate::document::style::{
    style_for, Alignment, StyleKind, TextStyle, CREDIT_TEXT, LINE_SPACING_PT, MARGIN_BOTTOM_PT,
    MARGIN_LEFT_PT, MARGIN_RIGHT_PT, MARGIN_TOP_PT, SPACE_AFTER_PT, SPACE_BEFORE_PT,
};
use crate::error::AppResult;
use crate::model::{Difficulty, Subject};

/// 带样式的文本 run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
}

/// 带样式的段落；runs 为空表示显式的段落分隔
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledParagraph {
    pub alignment: Alignment,
    pub runs: Vec<StyledRun>,
}

impl StyledParagraph {
    /// 空段落（段落分隔）
    fn blank() -> Self {
        Self {
            alignment: Alignment::Left,
            runs: Vec::new(),
        }
    }

    /// 单 run 段落
    fn single(kind: StyleKind, text: impl Into<String>) -> Self {
        let (style, alignment) = style_for(kind);
        Self {
            alignment,
            runs: vec![StyledRun {
                text: text.into(),
                style,
            }],
        }
    }

    /// 选项段落：加粗的"字母. "前缀 + 常规正文
    fn option(letter: char, text: &str) -> Self {
        let (letter_style, alignment) = style_for(StyleKind::OptionLetter);
        let (body_style, _) = style_for(StyleKind::Body);
        Self {
            alignment,
            runs: vec![
                StyledRun {
                    text: format!("{}. ", letter),
                    style: letter_style,
                },
                StyledRun {
                    text: text.to_string(),
                    style: body_style,
                },
            ],
        }
    }

    /// 段落的可见文本（测试与日志用）
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// 直接构建入口：从原始文本生成完整的段落序列
///
/// 标题与副标题由本入口合成；正文逐行分类后套表；
/// 级别不为 2/3 的标题行不参与排版；末尾追加版权行。
pub fn build_paragraphs(
    content: &str,
    subject: Subject,
    difficulty: Difficulty,
) -> Vec<StyledParagraph> {
    let mut paragraphs = Vec::new();

    paragraphs.push(StyledParagraph::single(
        StyleKind::Title,
        format!("{}练习题", subject),
    ));
    paragraphs.push(StyledParagraph::single(
        StyleKind::Subtitle,
        format!("难度：{}", difficulty),
    ));
    paragraphs.push(StyledParagraph::blank());

    for class in classify_lines(content) {
        match class {
            LineClass::Blank => paragraphs.push(StyledParagraph::blank()),
            LineClass::Heading { level: 2, text } => {
                paragraphs.push(StyledParagraph::single(StyleKind::Heading2, text));
            }
            LineClass::Heading { level: 3, text } => {
                paragraphs.push(StyledParagraph::single(StyleKind::Heading3, text));
            }
            // 其余级别的标题不参与排版
            LineClass::Heading { .. } => {}
            LineClass::Option { letter, text } => {
                paragraphs.push(StyledParagraph::option(letter, &text));
            }
            LineClass::Numbered(text) | LineClass::Plain(text) => {
                paragraphs.push(StyledParagraph::single(StyleKind::Body, text));
            }
        }
    }

    paragraphs.push(StyledParagraph::single(StyleKind::Credit, CREDIT_TEXT));
    paragraphs
}

/// 后处理入口：重排通用转换器产出的中间文档
///
/// 显式标题级别 1 → 主标题样式（本入口不合成标题），2/3 → 对应小节标题，
/// 其他级别与不匹配任何模式的正文一律落回普通正文样式，绝不报错。
pub fn restyle_paragraphs(document: &RawDocument) -> Vec<StyledParagraph> {
    let mut paragraphs = Vec::new();

    for raw in &document.paragraphs {
        if raw.text.trim().is_empty() {
            paragraphs.push(StyledParagraph::blank());
            continue;
        }

        let styled = match raw.heading_level {
            Some(1) => StyledParagraph::single(StyleKind::Title, raw.text.clone()),
            Some(2) => StyledParagraph::single(StyleKind::Heading2, raw.text.clone()),
            Some(3) => StyledParagraph::single(StyleKind::Heading3, raw.text.clone()),
            // 更深的标题级别落回正文
            Some(_) => StyledParagraph::single(StyleKind::Body, raw.text.clone()),
            None => match classify(&raw.text) {
                LineClass::Option { letter, text } => StyledParagraph::option(letter, &text),
                // 选项模式之外的正文保持原文，统一正文样式
                _ => StyledParagraph::single(StyleKind::Body, raw.text.clone()),
            },
        };
        paragraphs.push(styled);
    }

    paragraphs.push(StyledParagraph::single(StyleKind::Credit, CREDIT_TEXT));
    paragraphs
}

/// 把段落序列渲染为 .docx 字节
///
/// 页面几何与段落间距为固定常量，与内容无关。
pub fn pack_docx(paragraphs: &[StyledParagraph]) -> AppResult<Vec<u8>> {
    let mut docx = Docx::new().page_margin(
        PageMargin::new()
            .top(MARGIN_TOP_PT * 20)
            .bottom(MARGIN_BOTTOM_PT * 20)
            .left(MARGIN_LEFT_PT * 20)
            .right(MARGIN_RIGHT_PT * 20),
    );

    for paragraph in paragraphs {
        docx = docx.add_paragraph(to_docx_paragraph(paragraph));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| crate::error::AppError::docx_pack_failed(e))?;
    Ok(cursor.into_inner())
}

fn to_docx_paragraph(paragraph: &StyledParagraph) -> Paragraph {
    let mut p = Paragraph::new();

    for run in &paragraph.runs {
        let mut r = Run::new()
            .add_text(run.text.as_str())
            // docx 字号以半磅计
            .size(run.style.size_pt * 2)
            .fonts(
                RunFonts::new()
                    .ascii(run.style.ascii)
                    .hi_ansi(run.style.ascii)
                    .east_asia(run.style.east_asia),
            );
        if run.style.bold {
            r = r.bold();
        }
        p = p.add_run(r);
    }

    let alignment = match paragraph.alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
    };

    // 间距以 1/20 磅计，所有段落统一
    p.align(alignment).line_spacing(
        LineSpacing::new()
            .line_rule(LineSpacingType::Exact)
            .line((LINE_SPACING_PT * 20) as i32)
            .before(SPACE_BEFORE_PT * 20)
            .after(SPACE_AFTER_PT * 20),
    )
}

/// 直接构建入口的一站式封装：原始文本 → .docx 字节
pub fn create_exam_docx(
    content: &str,
    subject: Subject,
    difficulty: Difficulty,
) -> AppResult<Vec<u8>> {
    pack_docx(&build_paragraphs(content, subject, difficulty))
}

/// 生产路径：Markdown → 通用转换 → 重排样式 → .docx 字节
pub fn format_markdown_docx(markdown: &str) -> AppResult<Vec<u8>> {
    let raw = crate::document::markdown::convert_markdown(markdown);
    pack_docx(&restyle_paragraphs(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::markdown::convert_markdown;
    use crate::document::style::Alignment;

    const SAMPLE: &str = "## 一、选择题\n1. What is 2+2?\nA. 3\nB. 4\nC. 5\nD. 6";

    #[test]
    fn test_direct_path_order() {
        let paragraphs = build_paragraphs(SAMPLE, Subject::Math, Difficulty::Advanced);

        // 合成的标题、副标题、分隔段
        assert_eq!(paragraphs[0].text(), "数学练习题");
        assert_eq!(paragraphs[0].alignment, Alignment::Center);
        assert_eq!(paragraphs[1].text(), "难度：提升 (B)");
        assert!(paragraphs[2].runs.is_empty());

        // 正文：二级标题、题号行、四个选项行，顺序一致
        assert_eq!(paragraphs[3].text(), "一、选择题");
        assert_eq!(paragraphs[3].runs[0].style.size_pt, 14);
        assert!(paragraphs[3].runs[0].style.bold);

        assert_eq!(paragraphs[4].text(), "1. What is 2+2?");

        for (i, expected) in ["A. 3", "B. 4", "C. 5", "D. 6"].iter().enumerate() {
            let p = &paragraphs[5 + i];
            assert_eq!(p.text(), *expected);
            assert_eq!(p.runs.len(), 2, "选项行应拆成两个 run");
            assert!(p.runs[0].style.bold);
            assert!(!p.runs[1].style.bold);
        }

        // 版权行收尾
        assert_eq!(paragraphs.last().unwrap().text(), CREDIT_TEXT);
        assert_eq!(paragraphs.last().unwrap().alignment, Alignment::Center);
    }

    #[test]
    fn test_trailing_blank_line_kept() {
        let paragraphs = build_paragraphs("最后一行\n", Subject::Chinese, Difficulty::Basic);
        // 标题、副标题、分隔、正文、空段、版权
        assert_eq!(paragraphs.len(), 6);
        assert_eq!(paragraphs[3].text(), "最后一行");
        assert!(paragraphs[4].runs.is_empty(), "结尾空行应保留为空段落");
        assert_eq!(paragraphs[5].text(), CREDIT_TEXT);
    }

    #[test]
    fn test_alternate_separator_identical() {
        let dot = build_paragraphs("A. 甲", Subject::Math, Difficulty::Basic);
        let comma = build_paragraphs("A、甲", Subject::Math, Difficulty::Basic);
        assert_eq!(dot[3], comma[3]);
    }

    #[test]
    fn test_heading_level_one_dropped_in_direct_path() {
        let paragraphs = build_paragraphs("# 大标题\n正文", Subject::Math, Difficulty::Basic);
        // 一级标题被丢弃，仅剩正文
        assert_eq!(paragraphs[3].text(), "正文");
    }

    #[test]
    fn test_restyle_heading_levels() {
        let raw = convert_markdown("# 数学练习题\n\n## 一、选择题\n\n### 提示");
        let paragraphs = restyle_paragraphs(&raw);

        assert_eq!(paragraphs[0].text(), "数学练习题");
        assert_eq!(paragraphs[0].alignment, Alignment::Center);
        assert_eq!(paragraphs[0].runs[0].style.size_pt, 22);

        assert_eq!(paragraphs[1].text(), "一、选择题");
        assert_eq!(paragraphs[1].alignment, Alignment::Left);
        assert_eq!(paragraphs[1].runs[0].style.size_pt, 14);

        assert_eq!(paragraphs[2].text(), "提示");
        assert_eq!(paragraphs[2].runs[0].style.size_pt, 12);
        assert!(paragraphs[2].runs[0].style.bold);
    }

    #[test]
    fn test_restyle_option_split_matches_direct_path() {
        let raw = convert_markdown("1. 题干（ ）\nA. $k > -1$\nB. $k \\ge 0$");
        let restyled = restyle_paragraphs(&raw);
        let direct = build_paragraphs(
            "1. 题干（ ）\nA. $k > -1$\nB. $k \\ge 0$",
            Subject::Math,
            Difficulty::Advanced,
        );

        // 去掉直接路径合成的标题/副标题/分隔段后，两条路径的正文段一致
        assert_eq!(&restyled[..3], &direct[3..6]);
    }

    #[test]
    fn test_restyle_tolerates_unmatched_text() {
        let raw = convert_markdown("没有任何模式的一行\n\n####### 超深标题");
        let paragraphs = restyle_paragraphs(&raw);
        for p in &paragraphs[..paragraphs.len() - 1] {
            assert_eq!(p.runs.len(), 1);
            assert!(!p.runs[0].style.bold);
            assert_eq!(p.runs[0].style.size_pt, 12);
        }
    }

    #[test]
    fn test_pack_docx_produces_zip_bytes() {
        let paragraphs = build_paragraphs(SAMPLE, Subject::Math, Difficulty::Advanced);
        let bytes = pack_docx(&paragraphs).expect("打包 docx 失败");
        // .docx 是 zip 容器，魔数 PK
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_format_markdown_docx_end_to_end() {
        let bytes = format_markdown_docx("## 一、选择题\n\n1. 题干\nA. 甲\nB. 乙").unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
