//! # Trace 模块
//!
//! 阶段轨迹：实例生命周期内走过的阶段记录。
//!
//! ## 设计原则
//!
//! - 只追加，不修改：每次阶段推进追加一条记录
//! - 可序列化，便于 Host 落盘排查或做回放
//! - 记录引擎内部时钟（累计 tick 秒数），不记录挂钟时间

use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// 一条阶段记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 进入的阶段
    pub phase: Phase,
    /// 进入时刻（实例内部时钟，秒）
    pub at: f32,
    /// 是否由超时合成的交互推进而来
    pub auto_advanced: bool,
}

/// 阶段轨迹
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseTrace {
    entries: Vec<TraceEntry>,
}

impl PhaseTrace {
    /// 创建空轨迹
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条阶段记录
    pub fn record(&mut self, phase: Phase, at: f32) {
        self.entries.push(TraceEntry {
            phase,
            at,
            auto_advanced: false,
        });
    }

    /// 追加一条由超时合成推进的阶段记录
    pub fn record_auto(&mut self, phase: Phase, at: f32) {
        self.entries.push(TraceEntry {
            phase,
            at,
            auto_advanced: true,
        });
    }

    /// 所有记录（追加顺序）
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// 按顺序列出走过的阶段
    pub fn phases(&self) -> Vec<Phase> {
        self.entries.iter().map(|e| e.phase).collect()
    }

    /// 记录条数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_append_order() {
        let mut trace = PhaseTrace::new();
        trace.record(Phase::Entry, 0.0);
        trace.record(Phase::Flipping, 0.55);
        trace.record_auto(Phase::Revealed, 1.4);

        assert_eq!(
            trace.phases(),
            vec![Phase::Entry, Phase::Flipping, Phase::Revealed]
        );
        assert!(!trace.entries()[0].auto_advanced);
        assert!(trace.entries()[2].auto_advanced);
        // 时刻单调不减
        assert!(trace.entries()[0].at <= trace.entries()[1].at);
    }

    #[test]
    fn test_trace_serializable() {
        let mut trace = PhaseTrace::new();
        trace.record(Phase::Veiled, 0.0);

        let json = serde_json::to_string(&trace).unwrap();
        let back: PhaseTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phases(), trace.phases());
    }
}
