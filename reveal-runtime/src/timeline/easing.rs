//! # Easing 模块
//!
//! 缓动函数库，用于轨道插值。
//! 集合收敛到揭示效果实际使用的曲线。

use std::f32::consts::PI;

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// 线性（匀速，轮盘匀速段）
    Linear,
    /// 三次缓入（轮盘加速）
    EaseInCubic,
    /// 三次缓出（胶囊开壳、迷雾消散）
    EaseOutCubic,
    /// 三次缓入缓出（通用默认）
    #[default]
    EaseInOut,
    /// 二次缓出（入场淡入）
    EaseOutQuad,
    /// 正弦缓入缓出（悬浮、微光呼吸）
    EaseInOutSine,
    /// 弹性缓出（碎片熔合）
    EaseOutElastic,
    /// 弹跳缓出（翻转落地、胶囊落桶）
    EaseOutBounce,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInCubic => t * t * t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingFunction::EaseOutElastic => ease_out_elastic(t),
            EasingFunction::EaseOutBounce => ease_out_bounce(t),
        }
    }
}

/// 弹性缓出
fn ease_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        let c4 = (2.0 * PI) / 3.0;
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
    }
}

/// 弹跳缓出
fn ease_out_bounce(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}
