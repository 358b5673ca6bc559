//! # Input 模块
//!
//! 定义 Host 向引擎传递的输入事件。
//!
//! ## 设计说明
//!
//! - 引擎不处理原始的触摸/手势事件，只处理语义化的输入
//! - 输入只在当前阶段的门允许外部触发时生效，其余情况被忽略
//!   （不是错误，见 `runtime::engine`）
//! - 时间流逝不经过输入通道：Host 通过 `tick(dt, ..)` 注入

use serde::{Deserialize, Serialize};

/// Host 向引擎传递的输入
///
/// # 设计说明
///
/// - `Tap`：通用点击，解除 Tap 门（如扭蛋的等待开壳阶段）
/// - `TargetSelected`：选定目标，解除选择门（塔罗选牌、捕猎锁定）
/// - `Scratch`：刮除进度上报，累计覆盖清除比例，越过阈值后解除刮奖门
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RevealInput {
    /// 用户点击
    Tap,

    /// 用户选定了某个目标（索引从 0 开始）
    TargetSelected { index: usize },

    /// 刮除进度（已清除的覆盖比例，0.0 - 1.0）
    ///
    /// Host 在手势回调里持续上报当前比例；引擎只记录最新值，
    /// 不假设上报是单调的。
    Scratch { fraction: f32 },
}

impl RevealInput {
    /// 创建点击输入
    pub fn tap() -> Self {
        Self::Tap
    }

    /// 创建目标选择输入
    pub fn target(index: usize) -> Self {
        Self::TargetSelected { index }
    }

    /// 创建刮除进度输入
    pub fn scratch(fraction: f32) -> Self {
        Self::Scratch { fraction }
    }
}
