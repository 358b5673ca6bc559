//! # Motion 模块
//!
//! 减少动态（reduce motion）偏好的解析。
//!
//! ## 设计原则
//!
//! - 偏好在实例**构造时解析一次**并冻结，序列播放中途不再变化
//! - 显式传入的开关优先于系统偏好；系统偏好查询失败视为关闭
//! - 查询方本身作为协作者注入，引擎不直接触碰平台 API

/// 系统"减少动态"偏好的查询方
///
/// 由 Host 实现并注入；查询失败返回 `None`，引擎按关闭处理。
pub trait MotionPreference {
    /// 查询当前系统偏好
    ///
    /// # 返回
    /// - `Some(true)`: 用户开启了减少动态
    /// - `Some(false)`: 用户未开启
    /// - `None`: 查询不可用或失败
    fn prefers_reduced_motion(&self) -> Option<bool>;
}

/// 固定返回某个偏好值（测试和无平台环境用）
#[derive(Debug, Clone, Copy)]
pub struct FixedMotionPreference(pub bool);

impl MotionPreference for FixedMotionPreference {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        Some(self.0)
    }
}

/// 查询永远不可用（默认协作者）
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableMotionPreference;

impl MotionPreference for UnavailableMotionPreference {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        None
    }
}

/// 解析最终生效的减少动态开关
///
/// 优先级：显式开关 > 系统偏好 > 关闭。
pub fn resolve_reduced_motion(
    explicit: Option<bool>,
    preference: &dyn MotionPreference,
) -> bool {
    match explicit {
        Some(value) => value,
        None => preference.prefers_reduced_motion().unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins_over_preference() {
        assert!(resolve_reduced_motion(
            Some(true),
            &FixedMotionPreference(false)
        ));
        assert!(!resolve_reduced_motion(
            Some(false),
            &FixedMotionPreference(true)
        ));
    }

    #[test]
    fn test_falls_back_to_preference() {
        assert!(resolve_reduced_motion(None, &FixedMotionPreference(true)));
        assert!(!resolve_reduced_motion(None, &FixedMotionPreference(false)));
    }

    #[test]
    fn test_unavailable_means_off() {
        assert!(!resolve_reduced_motion(None, &UnavailableMotionPreference));
    }
}
