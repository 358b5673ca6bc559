//! # Haptics 模块
//!
//! 触感反馈的能力接口与尽力而为派发器。
//!
//! ## 设计说明
//!
//! - 触感能力以注入的协作方（trait）建模，不是进程级单例，
//!   测试可以用假实现隔离验证
//! - 派发是 fire-and-forget：能力不可用、被禁用或抛错都静默吞掉，
//!   绝不传播到阶段图，绝不延迟阶段转换

use thiserror::Error;

/// 触感反馈类型（强度/语义）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    /// 轻触（选牌、锁定目标）
    LightTick,
    /// 中等冲击（翻转落地、胶囊落桶）
    MediumImpact,
    /// 重冲击（开壳、破壳）
    HeavyImpact,
    /// 成功提示（轮盘落定）
    Success,
}

impl FeedbackKind {
    /// 获取反馈名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LightTick => "light_tick",
            Self::MediumImpact => "medium_impact",
            Self::HeavyImpact => "heavy_impact",
            Self::Success => "success",
        }
    }
}

/// 触感能力错误
///
/// 只存在于能力边界内部，派发器负责吞掉它。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HapticsError {
    /// 平台不支持触感
    #[error("触感能力不可用")]
    Unavailable,
}

/// 触感能力接口
///
/// 由 Host 注入的协作方实现（移动端桥接、测试假实现等）。
pub trait HapticsSink {
    /// 触发一次触感脉冲
    fn pulse(&self, kind: FeedbackKind) -> Result<(), HapticsError>;
}

/// 无操作触感实现
///
/// 非移动平台或未注入能力时的默认实现。
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHaptics;

impl HapticsSink for NullHaptics {
    fn pulse(&self, _kind: FeedbackKind) -> Result<(), HapticsError> {
        Ok(())
    }
}

/// 副作用派发器
///
/// 包装注入的触感能力，在阶段入口被调用。
/// 失败被吞掉：装饰性反馈与正确性关键的阶段图解耦。
pub struct SideEffectDispatcher {
    sink: Box<dyn HapticsSink>,
    enabled: bool,
}

impl std::fmt::Debug for SideEffectDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SideEffectDispatcher")
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl SideEffectDispatcher {
    /// 创建派发器
    pub fn new(sink: Box<dyn HapticsSink>, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    /// 尽力而为地触发一次反馈
    ///
    /// 未启用时是静默空操作；能力返回错误也被忽略。
    pub fn fire_and_forget(&self, kind: FeedbackKind) {
        if !self.enabled {
            return;
        }
        // 失败不重试、不上报：装饰性反馈不允许影响主契约
        let _ = self.sink.pulse(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 记录所有脉冲的测试实现
    pub(crate) struct RecordingHaptics {
        pub pulses: Rc<RefCell<Vec<FeedbackKind>>>,
    }

    impl HapticsSink for RecordingHaptics {
        fn pulse(&self, kind: FeedbackKind) -> Result<(), HapticsError> {
            self.pulses.borrow_mut().push(kind);
            Ok(())
        }
    }

    /// 永远失败的测试实现
    struct FailingHaptics;

    impl HapticsSink for FailingHaptics {
        fn pulse(&self, _kind: FeedbackKind) -> Result<(), HapticsError> {
            Err(HapticsError::Unavailable)
        }
    }

    #[test]
    fn test_dispatch_records_when_enabled() {
        let pulses = Rc::new(RefCell::new(Vec::new()));
        let dispatcher = SideEffectDispatcher::new(
            Box::new(RecordingHaptics {
                pulses: pulses.clone(),
            }),
            true,
        );

        dispatcher.fire_and_forget(FeedbackKind::MediumImpact);
        dispatcher.fire_and_forget(FeedbackKind::HeavyImpact);

        assert_eq!(
            *pulses.borrow(),
            vec![FeedbackKind::MediumImpact, FeedbackKind::HeavyImpact]
        );
    }

    #[test]
    fn test_dispatch_noop_when_disabled() {
        let pulses = Rc::new(RefCell::new(Vec::new()));
        let dispatcher = SideEffectDispatcher::new(
            Box::new(RecordingHaptics {
                pulses: pulses.clone(),
            }),
            false,
        );

        dispatcher.fire_and_forget(FeedbackKind::Success);
        assert!(pulses.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_swallows_failure() {
        let dispatcher = SideEffectDispatcher::new(Box::new(FailingHaptics), true);
        // 不 panic、不返回错误
        dispatcher.fire_and_forget(FeedbackKind::LightTick);
    }

    #[test]
    fn test_null_haptics() {
        let null = NullHaptics;
        assert!(null.pulse(FeedbackKind::LightTick).is_ok());
    }
}
