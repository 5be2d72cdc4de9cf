//! 出题请求参数
//!
//! 表单的六个输入参数以不可变结构体的形式在 Composer 和 Formatter 之间传递，
//! 核心逻辑不依赖任何全局可变状态。

use crate::error::{AppResult, AppError, ValidationError};

/// 学科枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Subject {
    /// 语文
    Chinese,
    /// 数学
    Math,
    /// 英语
    English,
    /// 科学
    Science,
    /// 历史与社会
    HistoryAndSociety,
}

impl Subject {
    /// 全部可选学科，顺序与表单一致
    pub const ALL: [Subject; 5] = [
        Subject::Chinese,
        Subject::Math,
        Subject::English,
        Subject::Science,
        Subject::HistoryAndSociety,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Subject::Chinese => "语文",
            Subject::Math => "数学",
            Subject::English => "英语",
            Subject::Science => "科学",
            Subject::HistoryAndSociety => "历史与社会",
        }
    }

    /// 尝试从字符串解析学科（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "语文" | "语" => Some(Subject::Chinese),
            "数学" | "数" => Some(Subject::Math),
            "英语" | "英" => Some(Subject::English),
            "科学" | "科" => Some(Subject::Science),
            "历史与社会" | "历史" | "社会" => Some(Subject::HistoryAndSociety),
            _ => None,
        }
    }

    /// 智能查找学科（支持模糊匹配）
    pub fn find(s: &str) -> Option<Self> {
        // 先尝试精确匹配
        if let Some(subject) = Self::from_str(s.trim()) {
            return Some(subject);
        }

        // 模糊匹配
        let s = s.trim();
        if s.contains("语文") {
            return Some(Subject::Chinese);
        }
        if s.contains("数学") {
            return Some(Subject::Math);
        }
        if s.contains("英语") {
            return Some(Subject::English);
        }
        if s.contains("科学") {
            return Some(Subject::Science);
        }
        if s.contains("历史") || s.contains("社会") {
            return Some(Subject::HistoryAndSociety);
        }

        None
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 难度枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    /// 基础 (C)
    Basic,
    /// 提升 (B)
    Advanced,
    /// 培优 (A)
    Excellent,
}

impl Difficulty {
    /// 全部可选难度，顺序与表单一致
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Basic,
        Difficulty::Advanced,
        Difficulty::Excellent,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Basic => "基础 (C)",
            Difficulty::Advanced => "提升 (B)",
            Difficulty::Excellent => "培优 (A)",
        }
    }

    /// 尝试从字符串解析难度，支持"基础"/"C" 等简写
    pub fn find(s: &str) -> Option<Self> {
        let s = s.trim();
        match s {
            "基础 (C)" | "基础" | "C" | "c" => Some(Difficulty::Basic),
            "提升 (B)" | "提升" | "B" | "b" => Some(Difficulty::Advanced),
            "培优 (A)" | "培优" | "A" | "a" => Some(Difficulty::Excellent),
            _ => {
                if s.contains("基础") {
                    Some(Difficulty::Basic)
                } else if s.contains("提升") {
                    Some(Difficulty::Advanced)
                } else if s.contains("培优") {
                    Some(Difficulty::Excellent)
                } else {
                    None
                }
            }
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 题量设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionCounts {
    /// 单选题数量
    pub single_choice: u32,
    /// 填空题数量
    pub fill_blank: u32,
    /// 简答题数量
    pub short_answer: u32,
}

impl QuestionCounts {
    pub fn new(single_choice: u32, fill_blank: u32, short_answer: u32) -> Self {
        Self {
            single_choice,
            fill_blank,
            short_answer,
        }
    }

    /// 三种题型的总数
    pub fn total(&self) -> u32 {
        self.single_choice + self.fill_blank + self.short_answer
    }
}

/// 一次出题请求的全部参数
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExamRequest {
    /// 学科
    pub subject: Subject,
    /// 难度
    pub difficulty: Difficulty,
    /// 题量设置
    pub counts: QuestionCounts,
    /// 创意度，0.0 为保守模式，1.0 为创意模式
    pub creativity: f32,
    /// 课文内容或知识点
    pub source_text: String,
}

impl ExamRequest {
    /// 生成前的预检校验
    ///
    /// 校验失败时不允许发起任何外部调用
    pub fn validate(&self) -> AppResult<()> {
        if self.source_text.trim().is_empty() {
            return Err(AppError::Validation(ValidationError::EmptySourceText));
        }
        if self.counts.total() == 0 {
            return Err(AppError::Validation(ValidationError::NoQuestionsRequested));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(counts: QuestionCounts, text: &str) -> ExamRequest {
        ExamRequest {
            subject: Subject::Math,
            difficulty: Difficulty::Advanced,
            counts,
            creativity: 0.5,
            source_text: text.to_string(),
        }
    }

    #[test]
    fn test_subject_find() {
        assert_eq!(Subject::find("数学"), Some(Subject::Math));
        assert_eq!(Subject::find("历史与社会"), Some(Subject::HistoryAndSociety));
        assert_eq!(Subject::find("社会"), Some(Subject::HistoryAndSociety));
        assert_eq!(Subject::find(" 科学 "), Some(Subject::Science));
        assert_eq!(Subject::find("物理"), None);
    }

    #[test]
    fn test_difficulty_find() {
        assert_eq!(Difficulty::find("提升 (B)"), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::find("基础"), Some(Difficulty::Basic));
        assert_eq!(Difficulty::find("A"), Some(Difficulty::Excellent));
        assert_eq!(Difficulty::find("地狱"), None);
    }

    #[test]
    fn test_validate_empty_source_text() {
        let req = request(QuestionCounts::new(5, 3, 1), "   \n  ");
        match req.validate() {
            Err(AppError::Validation(ValidationError::EmptySourceText)) => {}
            other => panic!("应返回课文为空错误，实际: {:?}", other.err()),
        }
    }

    #[test]
    fn test_validate_no_questions() {
        let req = request(QuestionCounts::new(0, 0, 0), "一元二次方程");
        match req.validate() {
            Err(AppError::Validation(ValidationError::NoQuestionsRequested)) => {}
            other => panic!("应返回题量为零错误，实际: {:?}", other.err()),
        }
    }

    #[test]
    fn test_validate_ok() {
        let req = request(QuestionCounts::new(0, 0, 1), "一元二次方程");
        assert!(req.validate().is_ok());
    }
}
