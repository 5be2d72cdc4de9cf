//! 排版样式表
//!
//! 两条格式化入口共用同一张"类别 → 字体/字号/对齐"查找表，
//! 字体、字号、间距与页面几何均为固定常量，与内容无关。

/// 段落对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// 单个文本 run 的字体样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// 中文字体（eastAsia）
    pub east_asia: &'static str,
    /// 西文字体（ascii / hAnsi）
    pub ascii: &'static str,
    /// 字号（磅）
    pub size_pt: usize,
    pub bold: bool,
}

/// 样式类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// 文档主标题（合成，不来自正文）
    Title,
    /// 难度副标题（合成）
    Subtitle,
    /// 二级标题
    Heading2,
    /// 三级标题
    Heading3,
    /// 选项行的字母前缀
    OptionLetter,
    /// 正文（题号行、选项正文、普通行）
    Body,
    /// 文末版权行
    Credit,
}

const HEI_CN: &str = "黑体";
const HEI_EN: &str = "SimHei";
const KAI_CN: &str = "楷体";
const KAI_EN: &str = "KaiTi";
const SONG_CN: &str = "宋体";
const SONG_EN: &str = "Times New Roman";

/// 类别 → 样式的纯查找
pub fn style_for(kind: StyleKind) -> (TextStyle, Alignment) {
    match kind {
        StyleKind::Title => (
            TextStyle { east_asia: HEI_CN, ascii: HEI_EN, size_pt: 22, bold: true },
            Alignment::Center,
        ),
        StyleKind::Subtitle => (
            TextStyle { east_asia: KAI_CN, ascii: KAI_EN, size_pt: 14, bold: false },
            Alignment::Center,
        ),
        StyleKind::Heading2 => (
            TextStyle { east_asia: HEI_CN, ascii: HEI_EN, size_pt: 14, bold: true },
            Alignment::Left,
        ),
        StyleKind::Heading3 => (
            TextStyle { east_asia: HEI_CN, ascii: HEI_EN, size_pt: 12, bold: true },
            Alignment::Left,
        ),
        StyleKind::OptionLetter => (
            TextStyle { east_asia: SONG_CN, ascii: SONG_EN, size_pt: 12, bold: true },
            Alignment::Left,
        ),
        StyleKind::Body => (
            TextStyle { east_asia: SONG_CN, ascii: SONG_EN, size_pt: 12, bold: false },
            Alignment::Left,
        ),
        StyleKind::Credit => (
            TextStyle { east_asia: SONG_CN, ascii: SONG_EN, size_pt: 10, bold: false },
            Alignment::Center,
        ),
    }
}

// ---- 统一段落间距（与类别无关）----

/// 固定行距（磅）
pub const LINE_SPACING_PT: u32 = 24;
/// 段前间距（磅）
pub const SPACE_BEFORE_PT: u32 = 6;
/// 段后间距（磅）
pub const SPACE_AFTER_PT: u32 = 6;

// ---- 固定页面几何（磅）----

pub const MARGIN_TOP_PT: i32 = 72;
pub const MARGIN_BOTTOM_PT: i32 = 72;
pub const MARGIN_LEFT_PT: i32 = 90;
pub const MARGIN_RIGHT_PT: i32 = 90;

/// 文末版权行内容
pub const CREDIT_TEXT: &str = "© 海盐县钟战华";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_subtitle_centered() {
        assert_eq!(style_for(StyleKind::Title).1, Alignment::Center);
        assert_eq!(style_for(StyleKind::Subtitle).1, Alignment::Center);
        assert_eq!(style_for(StyleKind::Credit).1, Alignment::Center);
    }

    #[test]
    fn test_option_letter_differs_from_body_only_in_bold() {
        let (letter, _) = style_for(StyleKind::OptionLetter);
        let (body, _) = style_for(StyleKind::Body);
        assert!(letter.bold);
        assert!(!body.bold);
        assert_eq!(letter.east_asia, body.east_asia);
        assert_eq!(letter.ascii, body.ascii);
        assert_eq!(letter.size_pt, body.size_pt);
    }

    #[test]
    fn test_heading_sizes() {
        assert_eq!(style_for(StyleKind::Title).0.size_pt, 22);
        assert_eq!(style_for(StyleKind::Heading2).0.size_pt, 14);
        assert_eq!(style_for(StyleKind::Heading3).0.size_pt, 12);
    }
}
