//! # 诊断模块
//!
//! 阶段图与配置的静态检查，不依赖 IO 或引擎。
//!
//! ## 设计原则
//!
//! - 纯函数 API，可在无 IO 环境下运行（开发工具和测试共用）
//! - 诊断分级：Error（必须修复）、Warn（建议修复）、Info（信息提示）
//! - 复用阶段图构建逻辑，不重复定义规则

use crate::config::RevealConfig;
use crate::phase::{EffectKind, Phase, PhaseGate, PhaseGraph};
use crate::timeline::TimelineSpec;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 诊断主体（效果名或配置字段）
    pub subject: String,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（可选）
    pub detail: Option<String>,
}

impl Diagnostic {
    /// 创建错误诊断
    pub fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            subject: subject.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 创建警告诊断
    pub fn warn(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            subject: subject.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.subject, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .count()
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warn)
            .count()
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

//=============================================================================
// 阶段图分析 API
//=============================================================================

/// 分析一张阶段图，返回诊断结果
///
/// 执行以下检查：
/// - 终态必须存在、唯一且位于最后
/// - 含循环的时间轴不得挂在 `Timeline` 门上（阶段永远无法推进）
/// - `Timeline` 门的节点必须有时间轴
/// - 交互门超时与 `Hold` 时长必须为正
/// - 时间轴不得含负时长或负延迟
/// - 阶段不得重复出现
pub fn analyze_graph(graph: &PhaseGraph) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();
    let subject = graph.kind.as_str();
    let nodes = graph.nodes();

    match nodes.last() {
        None => {
            result.push(Diagnostic::error(subject, "阶段图为空"));
            return result;
        }
        Some(last) if last.phase != Phase::Revealed => {
            result.push(
                Diagnostic::error(subject, "阶段图必须以终态结尾")
                    .with_detail(format!("最后一个阶段是 '{}'", last.phase)),
            );
        }
        Some(_) => {}
    }

    let terminal_count = nodes.iter().filter(|n| n.phase.is_terminal()).count();
    if terminal_count != 1 {
        result.push(Diagnostic::error(
            subject,
            format!("终态必须唯一，实际出现 {} 次", terminal_count),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for node in nodes {
        if !seen.insert(node.phase) {
            result.push(Diagnostic::error(
                subject,
                format!("阶段 '{}' 重复出现", node.phase),
            ));
        }

        match node.gate {
            PhaseGate::Timeline => match &node.timeline {
                None => result.push(
                    Diagnostic::error(subject, "等待时间轴的节点没有时间轴")
                        .with_detail(format!("阶段 '{}'", node.phase)),
                ),
                Some(timeline) if timeline.has_loop() => result.push(
                    Diagnostic::error(subject, "含循环的时间轴挂在了等待时间轴的门上")
                        .with_detail(format!("阶段 '{}' 将永远无法推进", node.phase)),
                ),
                Some(_) => {}
            },
            PhaseGate::Interaction { timeout, .. } => {
                if timeout <= 0.0 {
                    result.push(
                        Diagnostic::error(subject, "交互超时必须为正")
                            .with_detail(format!("阶段 '{}'：timeout = {}", node.phase, timeout)),
                    );
                }
            }
            PhaseGate::Hold(duration) => {
                if duration < 0.0 {
                    result.push(
                        Diagnostic::error(subject, "停留时长不得为负")
                            .with_detail(format!("阶段 '{}'：hold = {}", node.phase, duration)),
                    );
                } else if duration == 0.0 {
                    result.push(
                        Diagnostic::warn(subject, "停留时长为零")
                            .with_detail(format!("阶段 '{}' 将在当帧穿过", node.phase)),
                    );
                }
            }
        }

        if let Some(timeline) = &node.timeline {
            check_spec_durations(timeline, subject, node.phase, &mut result);
        }
    }

    result
}

/// 分析某配置下的全部阶段图
pub fn analyze_all(config: &RevealConfig, seed: u64) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();
    for kind in EffectKind::ALL {
        result.merge(analyze_graph(&PhaseGraph::for_kind(kind, config, seed)));
    }
    result
}

/// 递归检查时间轴声明里的时长与延迟
fn check_spec_durations(
    spec: &TimelineSpec,
    subject: &str,
    phase: Phase,
    result: &mut DiagnosticResult,
) {
    match spec {
        TimelineSpec::Track {
            key,
            duration,
            delay,
            ..
        } => {
            if *duration < 0.0 || *delay < 0.0 {
                result.push(
                    Diagnostic::error(subject, "轨道时长或延迟为负").with_detail(format!(
                        "阶段 '{}' 轨道 '{}'：duration = {}, delay = {}",
                        phase,
                        key.as_str(),
                        duration,
                        delay
                    )),
                );
            }
        }
        TimelineSpec::Delay(d) => {
            if *d < 0.0 {
                result.push(
                    Diagnostic::error(subject, "延迟为负")
                        .with_detail(format!("阶段 '{}'：delay = {}", phase, d)),
                );
            }
        }
        TimelineSpec::Sequence(steps) | TimelineSpec::Parallel(steps) => {
            for step in steps {
                check_spec_durations(step, subject, phase, result);
            }
        }
        TimelineSpec::Stagger { steps, interval } => {
            if *interval < 0.0 {
                result.push(
                    Diagnostic::error(subject, "错峰间隔为负")
                        .with_detail(format!("阶段 '{}'：interval = {}", phase, interval)),
                );
            }
            for step in steps {
                check_spec_durations(step, subject, phase, result);
            }
        }
        TimelineSpec::Loop(step) => check_spec_durations(step, subject, phase, result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error("flip", "终态必须唯一").with_detail("出现 2 次");
        let display = format!("{}", diag);
        assert!(display.contains("[ERROR]"));
        assert!(display.contains("flip"));
        assert!(display.contains("终态必须唯一"));
    }

    #[test]
    fn test_default_graphs_are_clean() {
        // 默认配置下所有阶段图都应通过检查
        let result = analyze_all(&RevealConfig::default(), 42);
        assert!(
            !result.has_errors(),
            "unexpected diagnostics: {:?}",
            result.diagnostics
        );
    }

    #[test]
    fn test_negative_timeout_is_error() {
        let mut config = RevealConfig::default();
        config.hunt.select_timeout = -1.0;
        let graph = PhaseGraph::for_kind(EffectKind::HuntCapture, &config, 0);
        let result = analyze_graph(&graph);

        assert!(result.has_errors());
        assert!(result.diagnostics.iter().any(|d| d.message.contains("超时")));
    }

    #[test]
    fn test_negative_duration_is_error() {
        let mut config = RevealConfig::default();
        config.flip.flip_duration = -0.5;
        let graph = PhaseGraph::for_kind(EffectKind::Flip, &config, 0);
        let result = analyze_graph(&graph);

        assert!(result.has_errors());
    }

    #[test]
    fn test_zero_hold_is_warning() {
        let mut config = RevealConfig::default();
        config.common.reveal_hold = 0.0;
        let graph = PhaseGraph::for_kind(EffectKind::Flip, &config, 0);
        let result = analyze_graph(&graph);

        assert!(!result.has_errors());
        assert_eq!(result.warn_count(), 1);
    }

    #[test]
    fn test_filter_by_level() {
        let mut result = DiagnosticResult::new();
        result.push(Diagnostic::error("a", "错误"));
        result.push(Diagnostic::warn("a", "警告"));

        assert_eq!(result.filter_by_level(DiagnosticLevel::Error).len(), 1);
        assert_eq!(result.filter_by_level(DiagnosticLevel::Warn).len(), 2);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warn_count(), 1);
    }
}
