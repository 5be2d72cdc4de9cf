//! 数据模型

pub mod params;

pub use params::{Difficulty, ExamRequest, QuestionCounts, Subject};
