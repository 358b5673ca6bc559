//! # Handle 模块
//!
//! 运行中复合动画的不透明控制器。
//!
//! ## 取消即抑制
//!
//! 这是整个时间轴系统最容易被意外破坏的契约：
//! **被取消的句柄永远不再报告完成**。取消不是另一种完成，
//! 而是让后续的一切继续无声地消失。`update` 在报告任何完成之前
//! 都先显式检查取消标记。

use super::combinator::{Timeline, TimelineSpec};
use crate::values::ValueStore;

/// 时间轴句柄
///
/// 生命周期：阶段开始驱动动画时创建，阶段的推进触发后释放，
/// 或随实例取消一并作废。
#[derive(Debug, Clone)]
pub struct TimelineHandle {
    /// 运行中的时间轴（取消后被丢弃）
    timeline: Option<Timeline>,
    /// 取消标记
    canceled: bool,
    /// 完成标记
    completed: bool,
}

impl TimelineHandle {
    /// 从声明创建句柄
    pub fn new(spec: &TimelineSpec) -> Self {
        Self {
            timeline: Some(Timeline::build(spec)),
            canceled: false,
            completed: false,
        }
    }

    /// 推进时间轴
    ///
    /// # 返回
    /// - `None`: 进行中，或句柄已被取消（取消抑制完成报告）
    /// - `Some(leftover)`: 已完成，剩余时间未消耗
    pub fn update(&mut self, dt: f32, store: &mut ValueStore) -> Option<f32> {
        // 取消检查必须先于任何完成报告
        if self.canceled {
            return None;
        }
        if self.completed {
            return Some(dt);
        }

        let timeline = self.timeline.as_mut()?;
        match timeline.update(dt, store) {
            Some(leftover) => {
                self.completed = true;
                self.timeline = None;
                Some(leftover)
            }
            None => None,
        }
    }

    /// 取消时间轴
    ///
    /// 丢弃内部状态；视觉量停在取消时刻的值。
    pub fn cancel(&mut self) {
        self.canceled = true;
        self.timeline = None;
    }

    /// 是否已被取消
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// 是否已完成
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
