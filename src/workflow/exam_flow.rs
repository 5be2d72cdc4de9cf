//! 出题流程 - 流程层
//!
//! 核心职责：定义"一次出题请求"的完整处理流程
//!
//! 流程顺序：
//! 1. 预检校验（不通过则不发起任何外部调用）
//! 2. 组装 prompt → 调用 LLM
//! 3. Markdown → 重排样式 → .docx

use tracing::{debug, info};

use crate::config::Config;
use crate::document::format_markdown_docx;
use crate::error::AppResult;
use crate::model::{Difficulty, ExamRequest, Subject};
use crate::services::{compose, LlmService, SYSTEM_PROMPT};
use crate::utils::logging::truncate_text;

/// 一次成功生成的全部产物
#[derive(Debug, Clone)]
pub struct GeneratedExam {
    /// 模型输出的原始 Markdown
    pub markdown: String,
    /// 排版后的 Word 文档字节
    pub docx: Vec<u8>,
    pub subject: Subject,
    pub difficulty: Difficulty,
}

impl GeneratedExam {
    /// Word 文档的 MIME 类型
    pub const DOCX_MIME: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    /// Markdown 文档的 MIME 类型
    pub const MARKDOWN_MIME: &'static str = "text/markdown";

    /// Word 文档文件名
    pub fn docx_file_name(&self) -> String {
        format!("练习题_{}_{}.docx", self.subject, self.difficulty)
    }

    /// Markdown 文档文件名
    pub fn markdown_file_name(&self) -> String {
        format!("练习题_{}_{}.md", self.subject, self.difficulty)
    }
}

/// 出题流程
///
/// - 编排校验 → 组装 → 生成 → 排版的完整顺序
/// - 单请求、全同步、无共享可变状态、不重试
pub struct ExamFlow {
    llm_service: LlmService,
}

impl ExamFlow {
    /// 创建新的出题流程
    pub fn new(config: &Config) -> Self {
        Self {
            llm_service: LlmService::new(config),
        }
    }

    /// 处理一次出题请求
    pub async fn run(&self, request: &ExamRequest) -> AppResult<GeneratedExam> {
        request.validate()?;

        info!(
            "📚 开始出题：学科 {}，难度 {}，题量 {}/{}/{}",
            request.subject,
            request.difficulty,
            request.counts.single_choice,
            request.counts.fill_blank,
            request.counts.short_answer
        );
        debug!("课文预览: {}", truncate_text(&request.source_text, 50));

        let prompt = compose(request)?;

        info!("🚀 正在生成练习题，请稍候...");
        let markdown = self
            .llm_service
            .generate(&prompt, SYSTEM_PROMPT, request.creativity)
            .await?;

        info!("✓ 练习题生成成功，共 {} 字符", markdown.chars().count());

        let docx = format_markdown_docx(&markdown)?;
        debug!("Word 文档打包完成，{} 字节", docx.len());

        Ok(GeneratedExam {
            markdown,
            docx,
            subject: request.subject,
            difficulty: request.difficulty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionCounts;

    #[test]
    fn test_artifact_names() {
        let exam = GeneratedExam {
            markdown: String::new(),
            docx: Vec::new(),
            subject: Subject::Math,
            difficulty: Difficulty::Advanced,
        };
        assert_eq!(exam.docx_file_name(), "练习题_数学_提升 (B).docx");
        assert_eq!(exam.markdown_file_name(), "练习题_数学_提升 (B).md");
    }

    /// 预检失败必须发生在任何外部调用之前：
    /// 即使没有配置 API Key，返回的也应是校验错误而非认证错误
    #[tokio::test]
    async fn test_run_rejects_before_external_call() {
        let config = Config {
            llm_api_key: String::new(),
            ..Config::default()
        };
        let flow = ExamFlow::new(&config);

        let request = ExamRequest {
            subject: Subject::Math,
            difficulty: Difficulty::Basic,
            counts: QuestionCounts::new(0, 0, 0),
            creativity: 0.5,
            source_text: "有效的课文".to_string(),
        };

        match flow.run(&request).await {
            Err(crate::error::AppError::Validation(_)) => {}
            other => panic!("应在外部调用前被拒绝，实际: {:?}", other.err()),
        }
    }
}
