//! # Timeline 模块
//!
//! 时间轴系统：插值轨道 + 组合子 + 句柄。
//!
//! ## 核心设计理念
//!
//! 时间轴系统只负责**时间轴管理**：
//! - 知道某个视觉量从 A 到 B 需要在 duration 内变化
//! - 组合子（顺序/并行/错峰/循环/延迟）决定多条轨道如何编排
//! - 把当前值写入 [`crate::values::ValueStore`]，**不假设**这些值
//!   渲染成透明度、角度还是位移——Host 自己决定
//!
//! ## 核心概念
//!
//! - [`TrackKey`]: 轨道键，唯一标识一个被驱动的视觉量
//! - [`Track`]: 单条插值轨道
//! - [`TimelineSpec`] / [`Timeline`]: 声明式组合与运行时形态
//! - [`TimelineHandle`]: 运行中复合动画的控制器，承载取消契约
//! - [`EasingFunction`]: 缓动函数

mod combinator;
mod easing;
mod handle;
mod track;

pub use combinator::{Timeline, TimelineSpec};
pub use easing::EasingFunction;
pub use handle::TimelineHandle;
pub use track::{Track, TrackKey, TrackState};
