//! 文档格式化（核心算法）
//!
//! 模块结构：
//! - `line` - 行分类（纯函数）
//! - `style` - 类别 → 样式查找表
//! - `markdown` - 通用 Markdown → 中间文档转换
//! - `builder` - 两条格式化入口与 .docx 渲染

pub mod builder;
pub mod line;
pub mod markdown;
pub mod style;

pub use builder::{
    build_paragraphs, create_exam_docx, format_markdown_docx, pack_docx, restyle_paragraphs,
    StyledParagraph, StyledRun,
};
pub use line::{classify, classify_lines, LineClass};
pub use markdown::{convert_markdown, RawDocument, RawParagraph};
pub use style::{style_for, Alignment, StyleKind, TextStyle};
