//! # Engine 模块
//!
//! 揭示序列的核心执行引擎。
//!
//! ## 执行模型
//!
//! ```text
//! Host                        RevealRuntime
//!  │  tick(dt, input)  ───────────▶ │
//!  │                                │ 1. 输入解门（不消耗时间）
//!  │                                │ 2. 时间推进：剩余时间跨阶段流动
//!  │                                │ 3. 触感提示尽力派发
//!  │  ◀─── (Vec<Command>, Status) ──│
//! ```
//!
//! ## 设计原则
//!
//! - **引擎管推进，Host 管渲染**：引擎只产出阶段转换指令和轨道值，
//!   不触碰任何渲染 API
//! - **单次 tick 可以穿过多个阶段**：大步长的剩余时间依次流入后续
//!   阶段的时间轴，丢帧不会拖慢序列
//! - **完成恰好一次**：完成信号由一次性令牌守护；取消作废令牌，
//!   之后这个实例永远沉默

use crate::command::RevealCommand;
use crate::completion::CompletionToken;
use crate::config::{CommonConfig, RevealConfig};
use crate::error::{RevealError, RevealResult};
use crate::haptics::{HapticsSink, NullHaptics, SideEffectDispatcher};
use crate::input::RevealInput;
use crate::motion::{resolve_reduced_motion, MotionPreference, UnavailableMotionPreference};
use crate::phase::{EffectKind, InteractionKind, Phase, PhaseGate, PhaseGraph};
use crate::role::RoleDisplayData;
use crate::timeline::{TimelineHandle, TrackKey};
use crate::trace::PhaseTrace;
use crate::values::ValueStore;

/// 实例构造选项
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    /// 显式的减少动态开关（`None` 表示跟随系统偏好）
    pub reduced_motion: Option<bool>,
    /// 是否启用触感反馈
    pub haptics_enabled: bool,
    /// 一次性随机取值（发牌顺序、轮盘落点、布局朝向）的种子
    pub seed: u64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            reduced_motion: None,
            haptics_enabled: true,
            seed: 0,
        }
    }
}

/// `tick` 返回的实例状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealStatus {
    /// 阶段时间轴推进中
    Running,
    /// 等待外部交互（Host 据此渲染交互提示）
    AwaitingInteraction(InteractionKind),
    /// 终态停留中
    Holding,
    /// 已完成（完成信号已发出）
    Completed,
    /// 已取消（实例沉默，永不完成）
    Canceled,
}

/// 揭示序列执行引擎
///
/// 每个待揭示的角色一个实例；实例之间不共享任何可变状态，
/// 并发揭示天然隔离。
pub struct RevealRuntime {
    graph: PhaseGraph,
    role: RoleDisplayData,
    common: CommonConfig,
    seed: u64,
    reduced_motion: bool,

    /// 当前节点下标
    node_index: usize,
    /// 当前阶段的运行中时间轴
    handle: Option<TimelineHandle>,
    /// 当前门的已流逝时间（Hold 与交互超时共用）
    gate_elapsed: f32,
    /// 实例内部时钟（累计 tick 秒数）
    clock: f32,

    values: ValueStore,
    trace: PhaseTrace,
    pending: Vec<RevealCommand>,
    dispatcher: SideEffectDispatcher,
    token: CompletionToken,
    canceled: bool,
}

impl std::fmt::Debug for RevealRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealRuntime")
            .field("kind", &self.graph.kind)
            .field("phase", &self.phase())
            .field("clock", &self.clock)
            .field("canceled", &self.canceled)
            .finish()
    }
}

impl RevealRuntime {
    /// 用默认协作者创建实例
    ///
    /// 系统偏好查询不可用（按关闭处理），触感为无操作实现。
    pub fn new(
        kind: EffectKind,
        role: RoleDisplayData,
        config: &RevealConfig,
        options: RevealOptions,
    ) -> Self {
        Self::with_collaborators(
            kind,
            role,
            config,
            options,
            &UnavailableMotionPreference,
            Box::new(NullHaptics),
        )
    }

    /// 用注入的协作者创建实例
    ///
    /// 减少动态偏好在这里**解析一次并冻结**，播放中途不再变化。
    pub fn with_collaborators(
        kind: EffectKind,
        role: RoleDisplayData,
        config: &RevealConfig,
        options: RevealOptions,
        motion: &dyn MotionPreference,
        haptics: Box<dyn HapticsSink>,
    ) -> Self {
        let reduced_motion = resolve_reduced_motion(options.reduced_motion, motion);
        let graph = PhaseGraph::for_kind(kind, config, options.seed);
        let dispatcher = SideEffectDispatcher::new(haptics, options.haptics_enabled);

        let mut runtime = Self {
            graph,
            role,
            common: config.common.clone(),
            seed: options.seed,
            reduced_motion,
            node_index: 0,
            handle: None,
            gate_elapsed: 0.0,
            clock: 0.0,
            values: ValueStore::new(),
            trace: PhaseTrace::new(),
            pending: Vec::new(),
            dispatcher,
            token: CompletionToken::new(),
            canceled: false,
        };

        if reduced_motion {
            // 减少动态：跳过全部动画阶段，把视觉量钉在终值上，
            // 直接落在终态做一段缩短的停留
            for (key, value) in runtime.graph.terminal_values() {
                runtime.values.set(key, value);
            }
            runtime.enter_node(runtime.graph.nodes().len() - 1, false);
        } else {
            runtime.enter_node(0, false);
        }

        runtime
    }

    /// 推进实例
    ///
    /// `dt` 为距上次 tick 的秒数；`input` 为本帧的语义化输入（若有）。
    /// 输入先于时间生效且不消耗时间；单次大步长可以穿过多个阶段。
    ///
    /// # 错误
    ///
    /// 仅当在选择门上收到越界索引时返回
    /// [`RevealError::InvalidTargetIndex`]；其余不匹配的输入被忽略。
    pub fn tick(
        &mut self,
        dt: f32,
        input: Option<RevealInput>,
    ) -> RevealResult<(Vec<RevealCommand>, RevealStatus)> {
        if self.canceled {
            return Ok((Vec::new(), RevealStatus::Canceled));
        }
        if self.token.is_fired() {
            return Ok((std::mem::take(&mut self.pending), RevealStatus::Completed));
        }

        self.clock += dt;

        if let Some(input) = input {
            self.apply_input(input)?;
        }
        self.advance_time(dt);

        let status = self.current_status();
        Ok((std::mem::take(&mut self.pending), status))
    }

    /// 取消实例
    ///
    /// 取消后实例沉默：不再产出任何指令，完成信号永远不会发出。
    pub fn cancel(&mut self) {
        self.canceled = true;
        self.token.void();
        if let Some(handle) = &mut self.handle {
            handle.cancel();
        }
        self.pending.clear();
    }

    /// 当前阶段
    pub fn phase(&self) -> Phase {
        self.graph.nodes()[self.node_index].phase
    }

    /// 效果类型
    pub fn kind(&self) -> EffectKind {
        self.graph.kind
    }

    /// 是否已取消
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// 是否已发出完成信号
    pub fn is_completed(&self) -> bool {
        self.token.is_fired()
    }

    /// 本实例是否走减少动态路径
    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// 读取某条轨道的当前值
    pub fn value(&self, key: &TrackKey) -> Option<f32> {
        self.values.get(key)
    }

    /// 全部轨道的当前值
    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    /// 阶段轨迹（排查与回放用）
    pub fn trace(&self) -> &PhaseTrace {
        &self.trace
    }

    //=========================================================================
    // 内部推进
    //=========================================================================

    /// 输入解门：只在当前门接受该输入时生效，不消耗时间
    fn apply_input(&mut self, input: RevealInput) -> RevealResult<()> {
        let PhaseGate::Interaction { kind, .. } = self.graph.nodes()[self.node_index].gate else {
            return Ok(());
        };

        match (kind, input) {
            (InteractionKind::Tap, RevealInput::Tap) => {
                self.advance(false);
            }
            (InteractionKind::SelectTarget { max }, RevealInput::TargetSelected { index }) => {
                if index >= max {
                    return Err(RevealError::InvalidTargetIndex { index, max }.into());
                }
                self.pending.push(RevealCommand::TargetLocked { index });
                self.advance(false);
            }
            (InteractionKind::Scratch { threshold }, RevealInput::Scratch { fraction }) => {
                // 记录最新比例，顺带把涂层剩余量写进轨道值
                let fraction = fraction.clamp(0.0, 1.0);
                self.values.set(TrackKey::mask_coverage(), 1.0 - fraction);
                if fraction >= threshold {
                    self.advance(false);
                }
            }
            // 与当前门不匹配的输入直接忽略
            _ => {}
        }
        Ok(())
    }

    /// 时间推进：剩余时间依次流入后续阶段
    fn advance_time(&mut self, dt: f32) {
        let mut remaining = dt;
        loop {
            let gate = self.graph.nodes()[self.node_index].gate;
            let terminal = self.phase().is_terminal();

            match gate {
                PhaseGate::Timeline => {
                    let finished = self
                        .handle
                        .as_mut()
                        .and_then(|h| h.update(remaining, &mut self.values));
                    match finished {
                        Some(leftover) => {
                            self.advance(false);
                            remaining = leftover;
                        }
                        None => return,
                    }
                }

                PhaseGate::Hold(duration) => {
                    // 环境时间轴（如迷雾微光）继续走，完成报告被忽略
                    if let Some(handle) = &mut self.handle {
                        let _ = handle.update(remaining, &mut self.values);
                    }
                    let duration = if terminal && self.reduced_motion {
                        self.common.reduced_motion_hold
                    } else {
                        duration
                    };
                    self.gate_elapsed += remaining;
                    if self.gate_elapsed < duration {
                        return;
                    }
                    let leftover = self.gate_elapsed - duration;
                    if terminal {
                        self.finish();
                        return;
                    }
                    self.advance(false);
                    remaining = leftover;
                }

                PhaseGate::Interaction { kind, timeout } => {
                    if let Some(handle) = &mut self.handle {
                        let _ = handle.update(remaining, &mut self.values);
                    }
                    self.gate_elapsed += remaining;
                    if self.gate_elapsed < timeout {
                        return;
                    }
                    // 超时：合成交互保证序列永远前进
                    let leftover = self.gate_elapsed - timeout;
                    if let InteractionKind::SelectTarget { max } = kind {
                        let index = (self.seed % max.max(1) as u64) as usize;
                        self.pending
                            .push(RevealCommand::TargetAutoSelected { index });
                    }
                    self.advance(true);
                    remaining = leftover;
                }
            }
        }
    }

    /// 推进到下一个节点
    fn advance(&mut self, auto: bool) {
        self.enter_node(self.node_index + 1, auto);
    }

    /// 进入指定节点：发指令、派触感、起时间轴
    fn enter_node(&mut self, index: usize, auto: bool) {
        if let Some(handle) = &mut self.handle {
            handle.cancel();
        }

        let node = self.graph.nodes()[index].clone();
        self.node_index = index;
        self.gate_elapsed = 0.0;

        self.pending
            .push(RevealCommand::PhaseEntered { phase: node.phase });
        if auto {
            self.trace.record_auto(node.phase, self.clock);
        } else {
            self.trace.record(node.phase, self.clock);
        }
        // 减少动态路径跳过一切装饰性反馈，终态的提示也不例外
        if !self.reduced_motion {
            if let Some(cue) = node.cue {
                self.dispatcher.fire_and_forget(cue);
            }
        }
        if node.phase.is_terminal() {
            self.pending.push(RevealCommand::RoleRevealed {
                role: self.role.clone(),
            });
        }

        // 减少动态路径不驱动任何时间轴（视觉量已钉在终值上）
        self.handle = if self.reduced_motion {
            None
        } else {
            node.timeline.as_ref().map(TimelineHandle::new)
        };
    }

    /// 终态停留结束：经由一次性令牌发出完成信号
    fn finish(&mut self) {
        if self.token.consume() {
            self.pending.push(RevealCommand::Completed);
        }
    }

    fn current_status(&self) -> RevealStatus {
        if self.canceled {
            return RevealStatus::Canceled;
        }
        if self.token.is_fired() {
            return RevealStatus::Completed;
        }
        match self.graph.nodes()[self.node_index].gate {
            PhaseGate::Interaction { kind, .. } => RevealStatus::AwaitingInteraction(kind),
            _ if self.phase().is_terminal() => RevealStatus::Holding,
            _ => RevealStatus::Running,
        }
    }
}
