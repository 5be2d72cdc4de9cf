//! 行分类
//!
//! 格式化的第一步：把模型输出中的每一行归入一个类别。
//! 分类只依赖该行自身的前导字符，与上下文和行序无关，且是幂等的。

/// 选项字母与正文之间允许的两种分隔符
pub const SEPARATORS: [char; 2] = ['.', '、'];

/// 行类别
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// 以 `#` 开头的标题行，level 为整行中 `#` 的总数
    Heading { level: usize, text: String },
    /// 以 A-D + 分隔符开头的选项行
    Option { letter: char, text: String },
    /// 以数字 + 分隔符开头的题号/答案行
    Numbered(String),
    /// 其他非空行
    Plain(String),
    /// 空行，渲染为显式的段落分隔
    Blank,
}

/// 对单行文本进行分类
///
/// 判定顺序：标题标记 → 选项字母 → 题号数字 → 普通文本。
/// 单字符行不会越界，统一落入 [`LineClass::Plain`]。
pub fn classify(line: &str) -> LineClass {
    let line = line.trim();
    if line.is_empty() {
        return LineClass::Blank;
    }

    if line.starts_with('#') {
        // 级别按整行 `#` 出现次数计，标记只从行首剥离
        let level = line.chars().filter(|&c| c == '#').count();
        let text = line.trim_start_matches('#').trim().to_string();
        return LineClass::Heading { level, text };
    }

    let mut chars = line.chars();
    let first = chars.next().unwrap_or_default();
    let second = chars.next();

    // 分隔符必须紧跟在首字符之后，否则一律按普通文本处理
    let has_separator = matches!(second, Some(c) if SEPARATORS.contains(&c));

    if ('A'..='D').contains(&first) && has_separator {
        let text: String = line.chars().skip(2).collect();
        return LineClass::Option {
            letter: first,
            text: text.trim().to_string(),
        };
    }

    if first.is_ascii_digit() && has_separator {
        return LineClass::Numbered(line.to_string());
    }

    LineClass::Plain(line.to_string())
}

/// 对整段文本逐行分类
pub fn classify_lines(content: &str) -> Vec<LineClass> {
    content.split('\n').map(classify).collect()
}
