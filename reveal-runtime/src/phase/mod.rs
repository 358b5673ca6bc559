//! # Phase 模块
//!
//! 定义揭示序列的阶段模型。
//!
//! ## 设计原则
//!
//! - 每种效果声明一条**有向无环**的阶段路径，终态统一为 [`Phase::Revealed`]
//! - 阶段单调推进：只前进，不回退，不循环
//! - 阶段的推进条件由 [`PhaseGate`] 显式建模，Host 据此决定采集什么输入

mod graph;

pub use graph::{PhaseGraph, PhaseNode};

use serde::{Deserialize, Serialize};

/// 阶段名称
///
/// 所有效果共用一个封闭集合，每种效果只使用其中的一个子集。
/// 终态统一为 `Revealed`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    // ── 翻转 ──
    /// 入场
    Entry,
    /// 悬浮
    Levitate,
    /// 翻面
    Flipping,
    /// 落地回弹
    Landing,

    // ── 刮奖 ──
    /// 刮除中（交互门）
    Scratching,
    /// 剩余涂层消散
    Clearing,

    // ── 迷雾 ──
    /// 雾中（环境微光循环）
    Veiled,
    /// 消散中
    Dispersing,

    // ── 扭蛋 ──
    /// 就绪
    Ready,
    /// 旋转中
    Spinning,
    /// 掉落中
    Dropping,
    /// 等待开壳（交互门）
    Waiting,
    /// 开壳中
    Opening,

    // ── 塔罗 ──
    /// 摊牌
    Spread,
    /// 选牌中（交互门）
    Choosing,
    /// 抽牌中
    Drawing,

    // ── 碎片 ──
    /// 散落
    Scattered,
    /// 汇聚中（逐片错峰）
    Converging,
    /// 熔合闪光
    Fusing,

    // ── 轮盘 ──
    /// 减速中
    Decelerating,
    /// 落定
    Settled,

    // ── 捕猎 ──
    /// 游荡中
    Prowling,
    /// 锁定目标中（交互门）
    Aiming,
    /// 捕捉收网
    Capturing,
    /// 已捕获（破壳）
    Captured,

    // ── 终态 ──
    /// 已揭示（所有效果的唯一终态）
    Revealed,
}

impl Phase {
    /// 获取阶段名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Levitate => "levitate",
            Self::Flipping => "flipping",
            Self::Landing => "landing",
            Self::Scratching => "scratching",
            Self::Clearing => "clearing",
            Self::Veiled => "veiled",
            Self::Dispersing => "dispersing",
            Self::Ready => "ready",
            Self::Spinning => "spinning",
            Self::Dropping => "dropping",
            Self::Waiting => "waiting",
            Self::Opening => "opening",
            Self::Spread => "spread",
            Self::Choosing => "choosing",
            Self::Drawing => "drawing",
            Self::Scattered => "scattered",
            Self::Converging => "converging",
            Self::Fusing => "fusing",
            Self::Decelerating => "decelerating",
            Self::Settled => "settled",
            Self::Prowling => "prowling",
            Self::Aiming => "aiming",
            Self::Capturing => "capturing",
            Self::Captured => "captured",
            Self::Revealed => "revealed",
        }
    }

    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 效果类型
///
/// 选择阶段图和配置分支的键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// 卡牌翻转
    Flip,
    /// 刮奖涂层
    Scratch,
    /// 迷雾消散
    FogDisperse,
    /// 扭蛋机
    GachaCapsule,
    /// 塔罗抽牌
    TarotDraw,
    /// 碎片拼合
    FragmentAssembly,
    /// 轮盘
    Roulette,
    /// 捕猎收网
    HuntCapture,
}

impl EffectKind {
    /// 所有效果类型（测试遍历用）
    pub const ALL: [EffectKind; 8] = [
        Self::Flip,
        Self::Scratch,
        Self::FogDisperse,
        Self::GachaCapsule,
        Self::TarotDraw,
        Self::FragmentAssembly,
        Self::Roulette,
        Self::HuntCapture,
    ];

    /// 获取效果名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flip => "flip",
            Self::Scratch => "scratch",
            Self::FogDisperse => "fog_disperse",
            Self::GachaCapsule => "gacha_capsule",
            Self::TarotDraw => "tarot_draw",
            Self::FragmentAssembly => "fragment_assembly",
            Self::Roulette => "roulette",
            Self::HuntCapture => "hunt_capture",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 交互类型
///
/// 交互门接受的输入种类。Host 据此决定渲染什么交互提示。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InteractionKind {
    /// 点击任意位置
    Tap,
    /// 从 `max` 个目标中选定一个
    SelectTarget { max: usize },
    /// 刮除至阈值
    Scratch { threshold: f32 },
}

/// 阶段门
///
/// 决定一个阶段何时让位给下一个阶段。
///
/// # 状态转换
///
/// ```text
/// Timeline            -> 驱动时间轴完成后推进
/// Interaction         -> 收到匹配输入后推进；超时则合成交互（auto-advance）
/// Hold                -> 固定时长计时器到期后推进
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseGate {
    /// 等待本阶段的驱动时间轴完成
    Timeline,
    /// 等待外部交互，超时后由引擎合成交互保证前进
    Interaction {
        /// 接受的交互类型
        kind: InteractionKind,
        /// 自动推进超时（秒），必须为正
        timeout: f32,
    },
    /// 固定停留时长（秒）
    Hold(f32),
}

impl PhaseGate {
    /// 创建交互门
    pub fn interaction(kind: InteractionKind, timeout: f32) -> Self {
        Self::Interaction { kind, timeout }
    }

    /// 是否为交互门
    pub fn is_interaction(&self) -> bool {
        matches!(self, Self::Interaction { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Entry.as_str(), "entry");
        assert_eq!(Phase::Revealed.as_str(), "revealed");
        assert!(Phase::Revealed.is_terminal());
        assert!(!Phase::Flipping.is_terminal());
    }

    #[test]
    fn test_effect_kind_all() {
        // 封闭集合：8 种效果，名称互不相同
        let names: std::collections::HashSet<_> =
            EffectKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_gate_interaction() {
        let gate = PhaseGate::interaction(InteractionKind::Tap, 6.0);
        assert!(gate.is_interaction());
        assert!(!PhaseGate::Timeline.is_interaction());
        assert!(!PhaseGate::Hold(0.5).is_interaction());
    }
}
