//! # Graph 模块
//!
//! 阶段图：每种效果的阶段序列及其时间轴、触感提示与推进门。
//!
//! ## 设计原则
//!
//! - 阶段图在实例构造时由 `(效果类型, 配置, seed)` **一次性**构建，
//!   此后只读：布局、发牌顺序、轮盘落点全部在这里冻结
//! - 节点按推进顺序排列，最后一个节点必然是 [`Phase::Revealed`]
//! - 含循环（环境动画）的时间轴只允许挂在非 `Timeline` 门的节点上，
//!   否则阶段永远无法推进（由 diagnostic 检查强制）

use crate::config::RevealConfig;
use crate::haptics::FeedbackKind;
use crate::layout::{deal_order, fragment_grid, ghost_placements, particle_burst};
use crate::timeline::{EasingFunction, TimelineSpec, TrackKey};

use super::{EffectKind, InteractionKind, Phase, PhaseGate};

/// 阶段图中的一个节点
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseNode {
    /// 阶段名称
    pub phase: Phase,
    /// 进入本阶段时触发的触感提示
    pub cue: Option<FeedbackKind>,
    /// 本阶段的驱动时间轴（纯等待阶段为 `None`）
    pub timeline: Option<TimelineSpec>,
    /// 推进门
    pub gate: PhaseGate,
}

impl PhaseNode {
    /// 创建无时间轴、无触感的节点
    pub fn new(phase: Phase, gate: PhaseGate) -> Self {
        Self {
            phase,
            cue: None,
            timeline: None,
            gate,
        }
    }

    /// 附加驱动时间轴
    pub fn with_timeline(mut self, timeline: TimelineSpec) -> Self {
        self.timeline = Some(timeline);
        self
    }

    /// 附加进入时的触感提示
    pub fn with_cue(mut self, cue: FeedbackKind) -> Self {
        self.cue = Some(cue);
        self
    }
}

/// 一种效果的完整阶段图
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseGraph {
    /// 效果类型
    pub kind: EffectKind,
    nodes: Vec<PhaseNode>,
}

impl PhaseGraph {
    /// 按效果类型构建阶段图
    ///
    /// 同样的 `(kind, config, seed)` 永远构建出相同的图。
    pub fn for_kind(kind: EffectKind, config: &RevealConfig, seed: u64) -> Self {
        let nodes = match kind {
            EffectKind::Flip => flip_nodes(config, seed),
            EffectKind::Scratch => scratch_nodes(config, seed),
            EffectKind::FogDisperse => fog_nodes(config, seed),
            EffectKind::GachaCapsule => capsule_nodes(config, seed),
            EffectKind::TarotDraw => tarot_nodes(config, seed),
            EffectKind::FragmentAssembly => fragment_nodes(config, seed),
            EffectKind::Roulette => roulette_nodes(config, seed),
            EffectKind::HuntCapture => hunt_nodes(config, seed),
        };
        Self { kind, nodes }
    }

    /// 所有节点（推进顺序）
    pub fn nodes(&self) -> &[PhaseNode] {
        &self.nodes
    }

    /// 按推进顺序列出阶段名称
    pub fn phases(&self) -> Vec<Phase> {
        self.nodes.iter().map(|n| n.phase).collect()
    }

    /// 收集整个图的轨道终点值（节点顺序，后写覆盖先写）
    ///
    /// 减少动态路径用它一次性钉住全部视觉量。
    pub fn terminal_values(&self) -> Vec<(TrackKey, f32)> {
        let mut values = Vec::new();
        for node in &self.nodes {
            if let Some(timeline) = &node.timeline {
                timeline.collect_terminal_values(&mut values);
            }
        }
        values
    }
}

/// 揭示粒子爆发的时间轴
///
/// 每个粒子一条进度轨道，按布局给出的延迟错开启动。
/// 粒子的位置与颜色由 Host 从 [`particle_burst`] 布局读取。
fn burst_spec(count: usize, seed: u64) -> TimelineSpec {
    let steps: Vec<TimelineSpec> = particle_burst(count, seed)
        .into_iter()
        .map(|p| {
            TimelineSpec::track_eased(
                TrackKey::particle_progress(p.index),
                0.0,
                1.0,
                crate::config::defaults::BURST_PARTICLE_DURATION,
                EasingFunction::EaseOutCubic,
            )
            .delayed(p.delay)
        })
        .collect();
    TimelineSpec::parallel(steps)
}

/// 统一的终态节点：粒子爆发 + 停留
fn revealed_node(config: &RevealConfig, seed: u64) -> PhaseNode {
    PhaseNode::new(Phase::Revealed, PhaseGate::Hold(config.common.reveal_hold))
        .with_cue(FeedbackKind::Success)
        .with_timeline(burst_spec(config.common.burst_particle_count, seed))
}

fn flip_nodes(config: &RevealConfig, seed: u64) -> Vec<PhaseNode> {
    let c = &config.flip;
    vec![
        PhaseNode::new(Phase::Entry, PhaseGate::Timeline).with_timeline(TimelineSpec::parallel(
            vec![
                TimelineSpec::track_eased(
                    TrackKey::card_alpha(),
                    0.0,
                    1.0,
                    c.entry_duration,
                    EasingFunction::EaseOutQuad,
                ),
                TimelineSpec::track_eased(
                    TrackKey::card_offset_y(),
                    40.0,
                    0.0,
                    c.entry_duration,
                    EasingFunction::EaseOutQuad,
                ),
            ],
        )),
        PhaseNode::new(Phase::Levitate, PhaseGate::Timeline).with_timeline(
            TimelineSpec::track_eased(
                TrackKey::card_offset_y(),
                0.0,
                -12.0,
                c.levitate_duration,
                EasingFunction::EaseInOutSine,
            ),
        ),
        PhaseNode::new(Phase::Flipping, PhaseGate::Timeline).with_timeline(TimelineSpec::parallel(
            vec![
                TimelineSpec::track(TrackKey::card_rotation(), 0.0, 1.0, c.flip_duration),
                TimelineSpec::track(TrackKey::card_offset_y(), -12.0, 0.0, c.flip_duration),
            ],
        )),
        PhaseNode::new(Phase::Landing, PhaseGate::Timeline)
            .with_cue(FeedbackKind::MediumImpact)
            .with_timeline(TimelineSpec::track_eased(
                TrackKey::card_scale(),
                1.08,
                1.0,
                c.landing_duration,
                EasingFunction::EaseOutBounce,
            )),
        revealed_node(config, seed),
    ]
}

fn scratch_nodes(config: &RevealConfig, seed: u64) -> Vec<PhaseNode> {
    let c = &config.scratch;
    vec![
        PhaseNode::new(Phase::Entry, PhaseGate::Timeline).with_timeline(
            TimelineSpec::track_eased(
                TrackKey::card_alpha(),
                0.0,
                1.0,
                c.entry_duration,
                EasingFunction::EaseOutQuad,
            ),
        ),
        // 刮除进度由 Host 上报，引擎只负责达阈值判定与超时兜底
        PhaseNode::new(
            Phase::Scratching,
            PhaseGate::interaction(
                InteractionKind::Scratch {
                    threshold: c.clear_threshold,
                },
                c.scratch_timeout,
            ),
        ),
        PhaseNode::new(Phase::Clearing, PhaseGate::Timeline)
            .with_cue(FeedbackKind::MediumImpact)
            .with_timeline(TimelineSpec::track_eased(
                TrackKey::mask_coverage(),
                1.0 - c.clear_threshold,
                0.0,
                c.clearing_duration,
                EasingFunction::EaseOutQuad,
            )),
        revealed_node(config, seed),
    ]
}

fn fog_nodes(config: &RevealConfig, seed: u64) -> Vec<PhaseNode> {
    let c = &config.fog;
    let half = c.shimmer_period / 2.0;
    let shimmer = TimelineSpec::looped(TimelineSpec::sequence(vec![
        TimelineSpec::track_eased(
            TrackKey::fog_shimmer(),
            0.0,
            1.0,
            half,
            EasingFunction::EaseInOutSine,
        ),
        TimelineSpec::track_eased(
            TrackKey::fog_shimmer(),
            1.0,
            0.0,
            half,
            EasingFunction::EaseInOutSine,
        ),
    ]));
    vec![
        // 微光是环境循环，门用固定时长而不是等待时间轴完成
        PhaseNode::new(Phase::Veiled, PhaseGate::Hold(c.veil_duration)).with_timeline(
            TimelineSpec::parallel(vec![
                TimelineSpec::track(TrackKey::fog_density(), 0.0, 1.0, c.veil_duration),
                shimmer,
            ]),
        ),
        PhaseNode::new(Phase::Dispersing, PhaseGate::Timeline).with_timeline(
            TimelineSpec::parallel(vec![
                TimelineSpec::track_eased(
                    TrackKey::fog_density(),
                    1.0,
                    0.0,
                    c.disperse_duration,
                    EasingFunction::EaseOutCubic,
                ),
                TimelineSpec::track(TrackKey::card_alpha(), 0.0, 1.0, c.disperse_duration),
            ]),
        ),
        revealed_node(config, seed),
    ]
}

fn capsule_nodes(config: &RevealConfig, seed: u64) -> Vec<PhaseNode> {
    let c = &config.capsule;
    // 待开时的轻微晃动，点击开壳时随阶段退出一起取消
    let wobble = TimelineSpec::looped(TimelineSpec::sequence(vec![
        TimelineSpec::track_eased(
            TrackKey::capsule_wobble(),
            0.0,
            0.06,
            0.25,
            EasingFunction::EaseInOutSine,
        ),
        TimelineSpec::track_eased(
            TrackKey::capsule_wobble(),
            0.06,
            -0.06,
            0.5,
            EasingFunction::EaseInOutSine,
        ),
        TimelineSpec::track_eased(
            TrackKey::capsule_wobble(),
            -0.06,
            0.0,
            0.25,
            EasingFunction::EaseInOutSine,
        ),
    ]));
    vec![
        PhaseNode::new(Phase::Ready, PhaseGate::Hold(c.ready_hold)),
        PhaseNode::new(Phase::Spinning, PhaseGate::Timeline).with_timeline(
            TimelineSpec::track_eased(
                TrackKey::capsule_crank(),
                0.0,
                2.0,
                c.spin_duration,
                EasingFunction::EaseInOutSine,
            ),
        ),
        PhaseNode::new(Phase::Dropping, PhaseGate::Timeline).with_timeline(
            TimelineSpec::track_eased(
                TrackKey::capsule_drop_y(),
                -160.0,
                0.0,
                c.drop_duration,
                EasingFunction::EaseOutBounce,
            ),
        ),
        PhaseNode::new(
            Phase::Waiting,
            PhaseGate::interaction(InteractionKind::Tap, c.open_timeout),
        )
        .with_cue(FeedbackKind::MediumImpact)
        .with_timeline(wobble),
        PhaseNode::new(Phase::Opening, PhaseGate::Timeline)
            .with_cue(FeedbackKind::HeavyImpact)
            .with_timeline(TimelineSpec::parallel(vec![
                TimelineSpec::track_eased(
                    TrackKey::capsule_lid(),
                    0.0,
                    1.0,
                    c.open_duration,
                    EasingFunction::EaseOutCubic,
                ),
                TimelineSpec::track(TrackKey::card_alpha(), 0.0, 1.0, c.open_duration),
            ])),
        revealed_node(config, seed),
    ]
}

fn tarot_nodes(config: &RevealConfig, seed: u64) -> Vec<PhaseNode> {
    let c = &config.tarot;
    // 发牌顺序由 seed 在构造时冻结
    let order = deal_order(c.card_count, seed);
    let spread_steps: Vec<TimelineSpec> = order
        .iter()
        .map(|&card| {
            TimelineSpec::track_eased(
                TrackKey::tarot_spread(card),
                0.0,
                1.0,
                c.spread_duration,
                EasingFunction::EaseOutCubic,
            )
        })
        .collect();
    vec![
        PhaseNode::new(Phase::Spread, PhaseGate::Timeline)
            .with_timeline(TimelineSpec::stagger(spread_steps, c.spread_stagger)),
        PhaseNode::new(
            Phase::Choosing,
            PhaseGate::interaction(
                InteractionKind::SelectTarget { max: c.card_count },
                c.choose_timeout,
            ),
        ),
        PhaseNode::new(Phase::Drawing, PhaseGate::Timeline)
            .with_cue(FeedbackKind::LightTick)
            .with_timeline(TimelineSpec::parallel(vec![
                TimelineSpec::track_eased(
                    TrackKey::card_offset_y(),
                    0.0,
                    -24.0,
                    c.draw_duration,
                    EasingFunction::EaseOutQuad,
                ),
                TimelineSpec::track(TrackKey::card_scale(), 1.0, 1.1, c.draw_duration),
            ])),
        PhaseNode::new(Phase::Flipping, PhaseGate::Timeline).with_timeline(TimelineSpec::track(
            TrackKey::card_rotation(),
            0.0,
            1.0,
            c.flip_duration,
        )),
        revealed_node(config, seed),
    ]
}

fn fragment_nodes(config: &RevealConfig, seed: u64) -> Vec<PhaseNode> {
    let c = &config.fragments;
    let fragments = fragment_grid(c.rows, c.cols, seed);
    let count = fragments.len();

    // 散落阶段给每片写入进度 0，保证 Host 首帧就能读到全部轨道
    let mut scatter_steps: Vec<TimelineSpec> = (0..count)
        .map(|i| TimelineSpec::track(TrackKey::fragment_progress(i), 0.0, 0.0, 0.0))
        .collect();
    scatter_steps.push(TimelineSpec::track(
        TrackKey::card_alpha(),
        0.0,
        1.0,
        c.scatter_duration,
    ));

    // 汇聚顺序按布局的错峰槽位排列
    let mut by_slot = fragments.clone();
    by_slot.sort_by_key(|f| f.delay_slot);
    let converge_steps: Vec<TimelineSpec> = by_slot
        .iter()
        .map(|f| {
            TimelineSpec::track(
                TrackKey::fragment_progress(f.index),
                0.0,
                1.0,
                c.converge_duration,
            )
        })
        .collect();

    vec![
        PhaseNode::new(Phase::Scattered, PhaseGate::Timeline)
            .with_timeline(TimelineSpec::parallel(scatter_steps)),
        PhaseNode::new(Phase::Converging, PhaseGate::Timeline)
            .with_timeline(TimelineSpec::stagger(converge_steps, c.converge_stagger)),
        PhaseNode::new(Phase::Fusing, PhaseGate::Timeline)
            .with_cue(FeedbackKind::MediumImpact)
            .with_timeline(TimelineSpec::parallel(vec![
                TimelineSpec::track_eased(
                    TrackKey::new("fuse.flash"),
                    0.0,
                    1.0,
                    c.fuse_duration,
                    EasingFunction::EaseOutQuad,
                ),
                TimelineSpec::track_eased(
                    TrackKey::card_scale(),
                    0.96,
                    1.0,
                    c.fuse_duration,
                    EasingFunction::EaseOutElastic,
                ),
            ])),
        revealed_node(config, seed),
    ]
}

fn roulette_nodes(config: &RevealConfig, seed: u64) -> Vec<PhaseNode> {
    let c = &config.roulette;
    // 落点由 seed 冻结：3 圈整 + 八分之一圈的整数倍
    let final_turns = 3.0 + (seed % 8) as f32 * 0.125;
    let overshoot = 0.02;
    vec![
        PhaseNode::new(Phase::Ready, PhaseGate::Timeline).with_timeline(
            TimelineSpec::track_eased(
                TrackKey::wheel_angle(),
                0.0,
                -0.05,
                c.spin_up_duration,
                EasingFunction::EaseInOutSine,
            ),
        ),
        PhaseNode::new(Phase::Spinning, PhaseGate::Timeline).with_timeline(
            TimelineSpec::track_eased(
                TrackKey::wheel_angle(),
                -0.05,
                3.0,
                c.spin_duration,
                EasingFunction::Linear,
            ),
        ),
        PhaseNode::new(Phase::Decelerating, PhaseGate::Timeline).with_timeline(
            TimelineSpec::track_eased(
                TrackKey::wheel_angle(),
                3.0,
                final_turns + overshoot,
                c.decelerate_duration,
                EasingFunction::EaseOutCubic,
            ),
        ),
        PhaseNode::new(Phase::Settled, PhaseGate::Timeline)
            .with_cue(FeedbackKind::MediumImpact)
            .with_timeline(TimelineSpec::track_eased(
                TrackKey::wheel_angle(),
                final_turns + overshoot,
                final_turns,
                c.settle_duration,
                EasingFunction::EaseOutBounce,
            )),
        revealed_node(config, seed),
    ]
}

fn hunt_nodes(config: &RevealConfig, seed: u64) -> Vec<PhaseNode> {
    let c = &config.hunt;
    let ghosts = ghost_placements(c.ghost_count, seed);

    let prowl_steps: Vec<TimelineSpec> = ghosts
        .iter()
        .map(|g| {
            TimelineSpec::track_eased(
                TrackKey::indexed("ghost", g.index, "alpha"),
                0.0,
                1.0,
                c.prowl_duration,
                EasingFunction::EaseOutQuad,
            )
        })
        .collect();

    // 每个游魂按自己的周期起伏，整体作为环境循环
    let bob_steps: Vec<TimelineSpec> = ghosts
        .iter()
        .map(|g| {
            let half = g.drift_period / 2.0;
            TimelineSpec::sequence(vec![
                TimelineSpec::track_eased(
                    TrackKey::ghost_bob(g.index),
                    0.0,
                    1.0,
                    half,
                    EasingFunction::EaseInOutSine,
                ),
                TimelineSpec::track_eased(
                    TrackKey::ghost_bob(g.index),
                    1.0,
                    0.0,
                    half,
                    EasingFunction::EaseInOutSine,
                ),
            ])
        })
        .collect();
    let drift = TimelineSpec::looped(TimelineSpec::parallel(bob_steps));

    vec![
        PhaseNode::new(Phase::Prowling, PhaseGate::Timeline)
            .with_timeline(TimelineSpec::stagger(prowl_steps, c.prowl_stagger)),
        PhaseNode::new(
            Phase::Aiming,
            PhaseGate::interaction(
                InteractionKind::SelectTarget { max: c.ghost_count },
                c.select_timeout,
            ),
        )
        .with_timeline(drift),
        PhaseNode::new(Phase::Capturing, PhaseGate::Timeline)
            .with_cue(FeedbackKind::LightTick)
            .with_timeline(TimelineSpec::track_eased(
                TrackKey::net_radius(),
                1.0,
                0.0,
                c.capture_duration,
                EasingFunction::EaseInCubic,
            )),
        PhaseNode::new(Phase::Captured, PhaseGate::Timeline)
            .with_cue(FeedbackKind::HeavyImpact)
            .with_timeline(TimelineSpec::track_eased(
                TrackKey::shell_crack(),
                0.0,
                1.0,
                c.break_duration,
                EasingFunction::EaseOutQuad,
            )),
        revealed_node(config, seed),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(kind: EffectKind) -> PhaseGraph {
        PhaseGraph::for_kind(kind, &RevealConfig::default(), 42)
    }

    #[test]
    fn test_flip_phase_order() {
        assert_eq!(
            graph(EffectKind::Flip).phases(),
            vec![
                Phase::Entry,
                Phase::Levitate,
                Phase::Flipping,
                Phase::Landing,
                Phase::Revealed,
            ]
        );
    }

    #[test]
    fn test_hunt_phase_order() {
        assert_eq!(
            graph(EffectKind::HuntCapture).phases(),
            vec![
                Phase::Prowling,
                Phase::Aiming,
                Phase::Capturing,
                Phase::Captured,
                Phase::Revealed,
            ]
        );
    }

    #[test]
    fn test_all_graphs_end_in_revealed() {
        for kind in EffectKind::ALL {
            let g = graph(kind);
            let phases = g.phases();
            // 终态唯一且在最后
            assert_eq!(*phases.last().unwrap(), Phase::Revealed, "kind = {}", kind);
            assert_eq!(
                phases.iter().filter(|p| p.is_terminal()).count(),
                1,
                "kind = {}",
                kind
            );
        }
    }

    #[test]
    fn test_loops_never_gate_on_timeline() {
        // 含循环的时间轴若挂在 Timeline 门上，阶段永远无法推进
        for kind in EffectKind::ALL {
            for node in graph(kind).nodes() {
                if let Some(timeline) = &node.timeline {
                    if timeline.has_loop() {
                        assert_ne!(
                            node.gate,
                            PhaseGate::Timeline,
                            "kind = {}, phase = {}",
                            kind,
                            node.phase
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_interaction_gates_present() {
        let expectations = [
            (EffectKind::Scratch, Phase::Scratching),
            (EffectKind::GachaCapsule, Phase::Waiting),
            (EffectKind::TarotDraw, Phase::Choosing),
            (EffectKind::HuntCapture, Phase::Aiming),
        ];
        for (kind, phase) in expectations {
            let g = graph(kind);
            let node = g.nodes().iter().find(|n| n.phase == phase).unwrap();
            assert!(node.gate.is_interaction(), "kind = {}", kind);
        }
    }

    #[test]
    fn test_graph_deterministic() {
        let config = RevealConfig::default();
        for kind in EffectKind::ALL {
            let a = PhaseGraph::for_kind(kind, &config, 7);
            let b = PhaseGraph::for_kind(kind, &config, 7);
            assert_eq!(a, b, "kind = {}", kind);
        }
    }

    #[test]
    fn test_roulette_final_angle_from_seed() {
        let config = RevealConfig::default();
        let a = PhaseGraph::for_kind(EffectKind::Roulette, &config, 0);
        let b = PhaseGraph::for_kind(EffectKind::Roulette, &config, 3);
        // 不同 seed 的落点不同
        assert_ne!(a, b);
    }

    #[test]
    fn test_terminal_values_cover_visible_tracks() {
        let g = graph(EffectKind::Flip);
        let values = g.terminal_values();
        let find = |key: &TrackKey| {
            values
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| *v)
        };
        assert_eq!(find(&TrackKey::card_alpha()), Some(1.0));
        assert_eq!(find(&TrackKey::card_rotation()), Some(1.0));
        assert_eq!(find(&TrackKey::card_offset_y()), Some(0.0));
        assert_eq!(find(&TrackKey::card_scale()), Some(1.0));
    }

    #[test]
    fn test_tarot_spread_uses_deal_order() {
        let g = graph(EffectKind::TarotDraw);
        let spread = &g.nodes()[0];
        // 摊牌是错峰时间轴，份数等于牌数
        match spread.timeline.as_ref().unwrap() {
            TimelineSpec::Stagger { steps, .. } => assert_eq!(steps.len(), 5),
            other => panic!("unexpected timeline: {:?}", other),
        }
    }
}
