//! # SmartExam 智能出题系统
//!
//! 基于课本内容的初中练习题自动生成工具：把课文或知识点交给
//! 聊天补全 API 生成一套标准化练习题，再排版为 Word 文档与 Markdown 两个产物。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构，每次请求都是无状态的一次完整流转：
//!
//! ### ① 数据模型层（Model）
//! - `model/` - 学科、难度、题量与请求参数的不可变结构
//!
//! ### ② 业务能力层（Services）
//! - `services/prompt_composer` - 固定模板的 prompt 组装能力
//! - `services/llm_service` - 单次聊天补全调用能力，错误分类、不重试
//!
//! ### ③ 文档层（Document）
//! - `document/line` - 行分类（纯函数，只看行首字符）
//! - `document/style` - 类别 → 字体/字号/对齐的查找表
//! - `document/markdown` - 通用 Markdown → 带标题级别标签的中间文档
//! - `document/builder` - 直接构建与后处理两条入口，共同渲染 .docx
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/exam_flow` - 校验 → 组装 → 生成 → 排版的完整编排
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, Cli};
pub use config::Config;
pub use document::{classify, LineClass};
pub use error::{AppError, AppResult};
pub use model::{Difficulty, ExamRequest, QuestionCounts, Subject};
pub use services::LlmService;
pub use workflow::{ExamFlow, GeneratedExam};
