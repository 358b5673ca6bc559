//! # Config 模块
//!
//! 各揭示效果的数值参数（阶段时长、数量、阈值、停留时间）。
//!
//! ## 设计原则
//!
//! - [`defaults`] 模块是所有默认数值的**唯一来源**，任何需要默认值的
//!   地方都应使用这些常量，而非硬编码数字
//! - 配置不可变、按值共享：每个实例在构造时拿到一份拷贝，
//!   并发实例之间互不影响
//! - 支持从 JSON 加载（Host 可以把配置当资产文件分发）
//! - 时间单位统一为**秒**（f32）

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 各效果的默认参数
///
/// 这些常量是效果参数的**唯一来源**。
pub mod defaults {
    /// 终态停留时长（正常路径，完成回调前）
    pub const REVEAL_HOLD: f32 = 0.6;
    /// 终态停留时长（减少动态路径，短于正常路径）
    pub const REDUCED_MOTION_HOLD: f32 = 0.25;
    /// 揭示粒子爆发的粒子数
    pub const BURST_PARTICLE_COUNT: usize = 24;
    /// 揭示粒子爆发的单粒子时长
    pub const BURST_PARTICLE_DURATION: f32 = 0.5;

    /// 翻转：入场时长
    pub const FLIP_ENTRY_DURATION: f32 = 0.3;
    /// 翻转：悬浮时长
    pub const FLIP_LEVITATE_DURATION: f32 = 0.25;
    /// 翻转：翻面时长
    pub const FLIP_DURATION: f32 = 0.6;
    /// 翻转：落地回弹时长
    pub const FLIP_LANDING_DURATION: f32 = 0.25;

    /// 刮奖：入场时长
    pub const SCRATCH_ENTRY_DURATION: f32 = 0.3;
    /// 刮奖：判定为"刮开"的覆盖清除阈值（0.0 - 1.0）
    pub const SCRATCH_CLEAR_THRESHOLD: f32 = 0.6;
    /// 刮奖：剩余涂层消散时长
    pub const SCRATCH_CLEARING_DURATION: f32 = 0.4;
    /// 刮奖：无交互时的自动刮开超时
    pub const SCRATCH_TIMEOUT: f32 = 8.0;

    /// 迷雾：凝聚时长
    pub const FOG_VEIL_DURATION: f32 = 0.4;
    /// 迷雾：微光呼吸周期（环境循环动画）
    pub const FOG_SHIMMER_PERIOD: f32 = 1.2;
    /// 迷雾：消散时长
    pub const FOG_DISPERSE_DURATION: f32 = 0.8;

    /// 扭蛋：就绪停顿
    pub const CAPSULE_READY_HOLD: f32 = 0.15;
    /// 扭蛋：摇杆旋转时长
    pub const CAPSULE_SPIN_DURATION: f32 = 0.8;
    /// 扭蛋：胶囊掉落时长
    pub const CAPSULE_DROP_DURATION: f32 = 0.5;
    /// 扭蛋：开壳时长
    pub const CAPSULE_OPEN_DURATION: f32 = 0.45;
    /// 扭蛋：等待点击开壳的超时
    pub const CAPSULE_OPEN_TIMEOUT: f32 = 6.0;

    /// 塔罗：摊牌时长
    pub const TAROT_SPREAD_DURATION: f32 = 0.5;
    /// 塔罗：摊牌的逐张错峰间隔
    pub const TAROT_SPREAD_STAGGER: f32 = 0.06;
    /// 塔罗：牌数
    pub const TAROT_CARD_COUNT: usize = 5;
    /// 塔罗：等待选牌的超时
    pub const TAROT_CHOOSE_TIMEOUT: f32 = 8.0;
    /// 塔罗：抽牌时长
    pub const TAROT_DRAW_DURATION: f32 = 0.4;
    /// 塔罗：翻牌时长
    pub const TAROT_FLIP_DURATION: f32 = 0.5;

    /// 碎片：散开时长
    pub const FRAGMENT_SCATTER_DURATION: f32 = 0.3;
    /// 碎片：单片汇聚时长
    pub const FRAGMENT_CONVERGE_DURATION: f32 = 0.7;
    /// 碎片：汇聚的逐片错峰间隔
    pub const FRAGMENT_CONVERGE_STAGGER: f32 = 0.05;
    /// 碎片：熔合闪光时长
    pub const FRAGMENT_FUSE_DURATION: f32 = 0.35;
    /// 碎片网格行数
    pub const FRAGMENT_ROWS: usize = 4;
    /// 碎片网格列数
    pub const FRAGMENT_COLS: usize = 3;

    /// 轮盘：加速时长
    pub const ROULETTE_SPIN_UP_DURATION: f32 = 0.4;
    /// 轮盘：匀速旋转时长
    pub const ROULETTE_SPIN_DURATION: f32 = 1.2;
    /// 轮盘：减速时长
    pub const ROULETTE_DECELERATE_DURATION: f32 = 0.9;
    /// 轮盘：落定回摆时长
    pub const ROULETTE_SETTLE_DURATION: f32 = 0.3;

    /// 捕猎：游荡入场时长
    pub const HUNT_PROWL_DURATION: f32 = 0.6;
    /// 捕猎：游魂入场的逐个错峰间隔
    pub const HUNT_PROWL_STAGGER: f32 = 0.1;
    /// 捕猎：游魂数量
    pub const HUNT_GHOST_COUNT: usize = 3;
    /// 捕猎：等待选定目标的超时
    pub const HUNT_SELECT_TIMEOUT: f32 = 8.0;
    /// 捕猎：捕捉收网时长
    pub const HUNT_CAPTURE_DURATION: f32 = 0.5;
    /// 捕猎：破壳时长
    pub const HUNT_BREAK_DURATION: f32 = 0.35;
}

/// 所有效果共享的参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// 终态停留时长（正常路径）
    pub reveal_hold: f32,
    /// 终态停留时长（减少动态路径）
    pub reduced_motion_hold: f32,
    /// 揭示粒子爆发的粒子数
    pub burst_particle_count: usize,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            reveal_hold: defaults::REVEAL_HOLD,
            reduced_motion_hold: defaults::REDUCED_MOTION_HOLD,
            burst_particle_count: defaults::BURST_PARTICLE_COUNT,
        }
    }
}

/// 翻转效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipConfig {
    pub entry_duration: f32,
    pub levitate_duration: f32,
    pub flip_duration: f32,
    pub landing_duration: f32,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            entry_duration: defaults::FLIP_ENTRY_DURATION,
            levitate_duration: defaults::FLIP_LEVITATE_DURATION,
            flip_duration: defaults::FLIP_DURATION,
            landing_duration: defaults::FLIP_LANDING_DURATION,
        }
    }
}

/// 刮奖效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    pub entry_duration: f32,
    /// 判定为"刮开"的覆盖清除阈值（0.0 - 1.0）
    pub clear_threshold: f32,
    pub clearing_duration: f32,
    /// 无交互时的自动刮开超时
    pub scratch_timeout: f32,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            entry_duration: defaults::SCRATCH_ENTRY_DURATION,
            clear_threshold: defaults::SCRATCH_CLEAR_THRESHOLD,
            clearing_duration: defaults::SCRATCH_CLEARING_DURATION,
            scratch_timeout: defaults::SCRATCH_TIMEOUT,
        }
    }
}

/// 迷雾消散效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub veil_duration: f32,
    /// 微光呼吸周期（环境循环动画，由阶段退出时取消）
    pub shimmer_period: f32,
    pub disperse_duration: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            veil_duration: defaults::FOG_VEIL_DURATION,
            shimmer_period: defaults::FOG_SHIMMER_PERIOD,
            disperse_duration: defaults::FOG_DISPERSE_DURATION,
        }
    }
}

/// 扭蛋效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleConfig {
    pub ready_hold: f32,
    pub spin_duration: f32,
    pub drop_duration: f32,
    pub open_duration: f32,
    /// 等待点击开壳的超时
    pub open_timeout: f32,
}

impl Default for CapsuleConfig {
    fn default() -> Self {
        Self {
            ready_hold: defaults::CAPSULE_READY_HOLD,
            spin_duration: defaults::CAPSULE_SPIN_DURATION,
            drop_duration: defaults::CAPSULE_DROP_DURATION,
            open_duration: defaults::CAPSULE_OPEN_DURATION,
            open_timeout: defaults::CAPSULE_OPEN_TIMEOUT,
        }
    }
}

/// 塔罗抽牌效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TarotConfig {
    pub spread_duration: f32,
    /// 相邻两张牌入场的间隔
    pub spread_stagger: f32,
    pub card_count: usize,
    /// 等待选牌的超时
    pub choose_timeout: f32,
    pub draw_duration: f32,
    pub flip_duration: f32,
}

impl Default for TarotConfig {
    fn default() -> Self {
        Self {
            spread_duration: defaults::TAROT_SPREAD_DURATION,
            spread_stagger: defaults::TAROT_SPREAD_STAGGER,
            card_count: defaults::TAROT_CARD_COUNT,
            choose_timeout: defaults::TAROT_CHOOSE_TIMEOUT,
            draw_duration: defaults::TAROT_DRAW_DURATION,
            flip_duration: defaults::TAROT_FLIP_DURATION,
        }
    }
}

/// 碎片拼合效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    pub scatter_duration: f32,
    pub converge_duration: f32,
    /// 汇聚的逐片错峰间隔
    pub converge_stagger: f32,
    pub fuse_duration: f32,
    pub rows: usize,
    pub cols: usize,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            scatter_duration: defaults::FRAGMENT_SCATTER_DURATION,
            converge_duration: defaults::FRAGMENT_CONVERGE_DURATION,
            converge_stagger: defaults::FRAGMENT_CONVERGE_STAGGER,
            fuse_duration: defaults::FRAGMENT_FUSE_DURATION,
            rows: defaults::FRAGMENT_ROWS,
            cols: defaults::FRAGMENT_COLS,
        }
    }
}

/// 轮盘效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouletteConfig {
    pub spin_up_duration: f32,
    pub spin_duration: f32,
    pub decelerate_duration: f32,
    pub settle_duration: f32,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            spin_up_duration: defaults::ROULETTE_SPIN_UP_DURATION,
            spin_duration: defaults::ROULETTE_SPIN_DURATION,
            decelerate_duration: defaults::ROULETTE_DECELERATE_DURATION,
            settle_duration: defaults::ROULETTE_SETTLE_DURATION,
        }
    }
}

/// 捕猎效果参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuntConfig {
    pub prowl_duration: f32,
    /// 相邻幽影浮现的间隔
    pub prowl_stagger: f32,
    pub ghost_count: usize,
    /// 等待选定目标的超时
    pub select_timeout: f32,
    pub capture_duration: f32,
    pub break_duration: f32,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            prowl_duration: defaults::HUNT_PROWL_DURATION,
            prowl_stagger: defaults::HUNT_PROWL_STAGGER,
            ghost_count: defaults::HUNT_GHOST_COUNT,
            select_timeout: defaults::HUNT_SELECT_TIMEOUT,
            capture_duration: defaults::HUNT_CAPTURE_DURATION,
            break_duration: defaults::HUNT_BREAK_DURATION,
        }
    }
}

/// 揭示效果总配置
///
/// 按值传入每个实例，实例之间不共享可变引用。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub common: CommonConfig,
    pub flip: FlipConfig,
    pub scratch: ScratchConfig,
    pub fog: FogConfig,
    pub capsule: CapsuleConfig,
    pub tarot: TarotConfig,
    pub fragments: FragmentConfig,
    pub roulette: RouletteConfig,
    pub hunt: HuntConfig,
}

impl RevealConfig {
    /// 从 JSON 文本加载配置
    ///
    /// 缺省字段回落到 [`defaults`] 中的常量。
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}
