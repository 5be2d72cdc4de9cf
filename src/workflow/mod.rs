//! 流程层

pub mod exam_flow;

pub use exam_flow::{ExamFlow, GeneratedExam};
