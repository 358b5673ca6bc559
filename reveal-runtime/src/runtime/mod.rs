//! # Runtime 模块
//!
//! 揭示序列执行引擎核心，负责阶段推进与指令生成。
//!
//! ## 模块结构
//!
//! - [`engine`]：核心执行引擎

pub mod engine;

pub use engine::{RevealOptions, RevealRuntime, RevealStatus};
