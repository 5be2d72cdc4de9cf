//! 应用入口层
//!
//! 对应表单的六个输入参数：学科、难度、三种题量、创意度，外加课文来源，
//! 一次触发对应一次完整的出题流程。

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::model::{Difficulty, ExamRequest, QuestionCounts, Subject};
use crate::utils::logging::truncate_text;
use crate::workflow::ExamFlow;

/// SmartExam - 智能出题系统
///
/// 基于课本内容的初中练习题自动生成工具
#[derive(Parser, Debug)]
#[command(name = "smart-exam", version)]
#[command(about = "SmartExam - 智能出题系统：基于课本内容的初中练习题自动生成工具")]
pub struct Cli {
    /// 学科（语文 / 数学 / 英语 / 科学 / 历史与社会）
    #[arg(short, long, default_value = "数学")]
    pub subject: String,

    /// 难度（基础 / 提升 / 培优，或 C / B / A）
    #[arg(short, long, default_value = "提升")]
    pub difficulty: String,

    /// 单选题数量
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=20))]
    pub single_choice: u32,

    /// 填空题数量
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(0..=20))]
    pub fill_blank: u32,

    /// 简答题数量
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub short_answer: u32,

    /// 创意度，0.0 为保守模式，1.0 为创意模式
    #[arg(short, long, default_value_t = 0.5)]
    pub creativity: f32,

    /// 课文内容文件；缺省时从标准输入读取
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// 输出目录（覆盖 OUTPUT_DIR 配置）
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行一次完整的出题流程并写出两个产物文件
    pub async fn run(&self, cli: Cli) -> AppResult<()> {
        let request = self.build_request(&cli)?;

        let flow = ExamFlow::new(&self.config);
        let exam = flow.run(&request).await?;

        let output_dir = cli
            .output_dir
            .unwrap_or_else(|| PathBuf::from(&self.config.output_dir));
        fs::create_dir_all(&output_dir)
            .map_err(|e| AppError::file_write_failed(output_dir.display().to_string(), e))?;

        let docx_path = output_dir.join(exam.docx_file_name());
        fs::write(&docx_path, &exam.docx)
            .map_err(|e| AppError::file_write_failed(docx_path.display().to_string(), e))?;

        let md_path = output_dir.join(exam.markdown_file_name());
        fs::write(&md_path, &exam.markdown)
            .map_err(|e| AppError::file_write_failed(md_path.display().to_string(), e))?;

        info!("✅ 出题完成");
        info!("📥 Word 文档: {}", docx_path.display());
        info!("📥 Markdown 文档: {}", md_path.display());
        info!(
            "完成时间: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        Ok(())
    }

    /// 把命令行参数装配为不可变的请求结构
    fn build_request(&self, cli: &Cli) -> AppResult<ExamRequest> {
        let subject = Subject::find(&cli.subject).ok_or_else(|| {
            AppError::Other(format!(
                "无法识别的学科：{}（可选：语文、数学、英语、科学、历史与社会）",
                cli.subject
            ))
        })?;

        let difficulty = Difficulty::find(&cli.difficulty).ok_or_else(|| {
            AppError::Other(format!(
                "无法识别的难度：{}（可选：基础 (C)、提升 (B)、培优 (A)）",
                cli.difficulty
            ))
        })?;

        // 表单滑块的取值范围在 CLI 下可能被突破，越界时收回并警告
        let creativity = if (0.0..=1.0).contains(&cli.creativity) {
            cli.creativity
        } else {
            warn!("⚠️ 创意度 {} 超出 [0.0, 1.0]，已收回边界", cli.creativity);
            cli.creativity.clamp(0.0, 1.0)
        };

        let source_text = self.read_source_text(cli)?;
        if self.config.verbose_logging {
            info!("课文内容预览: {}", truncate_text(&source_text, 100));
        }

        Ok(ExamRequest {
            subject,
            difficulty,
            counts: QuestionCounts::new(cli.single_choice, cli.fill_blank, cli.short_answer),
            creativity,
            source_text,
        })
    }

    /// 从文件或标准输入读取课文内容
    fn read_source_text(&self, cli: &Cli) -> AppResult<String> {
        match &cli.input {
            Some(path) => fs::read_to_string(path)
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e)),
            None => {
                info!("请输入课文内容或知识点（Ctrl-D 结束）:");
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| AppError::file_read_failed("stdin", e))?;
                Ok(text)
            }
        }
    }
}
