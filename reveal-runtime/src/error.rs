//! # Error 模块
//!
//! 定义 reveal-runtime 中使用的错误类型。
//!
//! 错误面被刻意收窄：触感失败由 Dispatcher 吞掉，取消不是错误，
//! 交互超时由 auto-advance 兜底。真正能返回给 Host 的只有
//! 配置解析失败和越界的目标选择。

use thiserror::Error;

/// 配置错误
///
/// 数值取值范围的检查不在这里：越界的时长/超时由
/// [`crate::diagnostic`] 的静态检查报告，不构成加载错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON 解析失败
    #[error("配置解析失败: {message}")]
    Parse { message: String },
}

/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevealError {
    /// 无效的目标选择索引
    #[error("无效的目标索引 {index}，有效范围是 0..{max}")]
    InvalidTargetIndex { index: usize, max: usize },
}

/// reveal-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 运行时错误
    #[error("运行时错误: {0}")]
    Reveal(#[from] RevealError),
}

/// Result 类型别名
pub type RevealResult<T> = Result<T, EngineError>;
