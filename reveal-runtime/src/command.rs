//! # Command 模块
//!
//! 定义引擎向 Host 发出的指令。
//! Command 是引擎与 Host 之间**唯一的通知通道**：
//! 所有阶段转换、合成交互和完成信号都以指令形式从 `tick` 流出，
//! 绝不在渲染线程的回调里直接改引擎状态。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"发生了什么"，不描述"怎么渲染"
//! - **引擎无关**：不包含任何渲染框架的类型

use serde::{Deserialize, Serialize};

use crate::phase::Phase;
use crate::role::RoleDisplayData;

/// 引擎向 Host 发出的指令
///
/// # 顺序保证
///
/// 单个实例内指令严格有序：`PhaseEntered` 按阶段图声明的顺序出现，
/// `Completed` 在整个生命周期内**至多出现一次**，且总在
/// `RoleRevealed` 之后。不同实例之间没有任何顺序保证（也不需要）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RevealCommand {
    /// 进入了新阶段
    PhaseEntered { phase: Phase },

    /// 用户选定了目标（交互门被真实输入解除）
    TargetLocked { index: usize },

    /// 超时合成了目标选择（auto-advance）
    TargetAutoSelected { index: usize },

    /// 到达终态，角色可以展示了
    ///
    /// 携带构造时传入的角色数据，Host 据此渲染揭示面。
    RoleRevealed { role: RoleDisplayData },

    /// 完成信号
    ///
    /// 终态停留结束后发出，每个实例**恰好一次**；
    /// 被取消的实例永远不会发出。
    Completed,
}

impl RevealCommand {
    /// 是否为完成信号
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// 提取进入的阶段（如果是 PhaseEntered）
    pub fn entered_phase(&self) -> Option<Phase> {
        match self {
            Self::PhaseEntered { phase } => Some(*phase),
            _ => None,
        }
    }
}
