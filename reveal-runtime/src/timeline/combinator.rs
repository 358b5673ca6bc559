//! # Combinator 模块
//!
//! 时间轴组合子：顺序、并行、错峰、循环、延迟。
//!
//! ## 设计说明
//!
//! - [`TimelineSpec`] 是**声明式**描述（标签变体表），由阶段图按配置
//!   构建，可以随时重新编译成运行时形态
//! - [`Timeline`] 是运行时形态，由 `update(dt)` 驱动，把插值结果写进
//!   [`ValueStore`]
//! - 完成语义：
//!   - `sequence` 在最后一步完成时完成，剩余时间流入下一步
//!   - `parallel` 在**所有**步完成时完成（不是第一步）
//!   - `stagger` 的第 i 份延迟 `interval × i`，最后一份完成时完成
//!   - `loop` 永不自行完成，必须由所属阶段显式取消

use super::easing::EasingFunction;
use super::track::{Track, TrackKey};
use crate::values::ValueStore;

/// 时间轴声明
///
/// 阶段图为每个阶段构建一份；同一份声明可以多次编译
/// （`loop` 每个周期重建内部时间轴时使用）。
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineSpec {
    /// 单条插值轨道
    Track {
        key: TrackKey,
        from: f32,
        to: f32,
        duration: f32,
        easing: EasingFunction,
        delay: f32,
    },
    /// 顺序执行
    Sequence(Vec<TimelineSpec>),
    /// 并行执行，全部完成才算完成
    Parallel(Vec<TimelineSpec>),
    /// 错峰执行：第 i 步延迟 `interval × i`
    Stagger {
        steps: Vec<TimelineSpec>,
        interval: f32,
    },
    /// 无限循环（环境动画），永不完成
    Loop(Box<TimelineSpec>),
    /// 纯延迟
    Delay(f32),
}

impl TimelineSpec {
    /// 创建默认缓动的轨道
    pub fn track(key: TrackKey, from: f32, to: f32, duration: f32) -> Self {
        Self::Track {
            key,
            from,
            to,
            duration,
            easing: EasingFunction::default(),
            delay: 0.0,
        }
    }

    /// 创建指定缓动的轨道
    pub fn track_eased(
        key: TrackKey,
        from: f32,
        to: f32,
        duration: f32,
        easing: EasingFunction,
    ) -> Self {
        Self::Track {
            key,
            from,
            to,
            duration,
            easing,
            delay: 0.0,
        }
    }

    /// 为轨道或子树整体附加启动延迟
    pub fn delayed(self, delay: f32) -> Self {
        match self {
            Self::Track {
                key,
                from,
                to,
                duration,
                easing,
                delay: d,
            } => Self::Track {
                key,
                from,
                to,
                duration,
                easing,
                delay: d + delay,
            },
            other => Self::Sequence(vec![Self::Delay(delay), other]),
        }
    }

    /// 顺序组合
    pub fn sequence(steps: Vec<TimelineSpec>) -> Self {
        Self::Sequence(steps)
    }

    /// 并行组合
    pub fn parallel(steps: Vec<TimelineSpec>) -> Self {
        Self::Parallel(steps)
    }

    /// 错峰组合
    pub fn stagger(steps: Vec<TimelineSpec>, interval: f32) -> Self {
        Self::Stagger { steps, interval }
    }

    /// 循环组合
    pub fn looped(step: TimelineSpec) -> Self {
        Self::Loop(Box::new(step))
    }

    /// 是否包含循环（永不完成的）子树
    pub fn has_loop(&self) -> bool {
        match self {
            Self::Loop(_) => true,
            Self::Track { .. } | Self::Delay(_) => false,
            Self::Sequence(steps) | Self::Parallel(steps) => steps.iter().any(Self::has_loop),
            Self::Stagger { steps, .. } => steps.iter().any(Self::has_loop),
        }
    }

    /// 总时长（秒）
    ///
    /// # 返回
    /// - `Some(seconds)`: 有限时间轴
    /// - `None`: 包含循环，永不完成
    pub fn total_duration(&self) -> Option<f32> {
        match self {
            Self::Track {
                duration, delay, ..
            } => Some(duration + delay),
            Self::Delay(d) => Some(*d),
            Self::Sequence(steps) => steps
                .iter()
                .map(Self::total_duration)
                .try_fold(0.0, |acc, d| d.map(|d| acc + d)),
            Self::Parallel(steps) => steps
                .iter()
                .map(Self::total_duration)
                .try_fold(0.0_f32, |acc, d| d.map(|d| acc.max(d))),
            Self::Stagger { steps, interval } => steps
                .iter()
                .enumerate()
                .map(|(i, s)| s.total_duration().map(|d| d + interval * i as f32))
                .try_fold(0.0_f32, |acc, d| d.map(|d| acc.max(d))),
            Self::Loop(_) => None,
        }
    }

    /// 收集所有轨道的终点值（声明顺序，后写覆盖先写）
    ///
    /// 减少动态路径用它把一切视觉量直接钉在终值上。
    /// 循环子树是环境装饰，没有终值，跳过。
    pub fn collect_terminal_values(&self, out: &mut Vec<(TrackKey, f32)>) {
        match self {
            Self::Track { key, to, .. } => out.push((key.clone(), *to)),
            Self::Delay(_) | Self::Loop(_) => {}
            Self::Sequence(steps) | Self::Parallel(steps) => {
                for step in steps {
                    step.collect_terminal_values(out);
                }
            }
            Self::Stagger { steps, .. } => {
                for step in steps {
                    step.collect_terminal_values(out);
                }
            }
        }
    }
}

/// 运行时时间轴
///
/// 由 [`TimelineSpec`] 编译而来，`update(dt)` 推进并把值写入存储。
#[derive(Debug, Clone)]
pub enum Timeline {
    /// 单条轨道
    Track(Track),
    /// 顺序执行
    Sequence { steps: Vec<Timeline>, current: usize },
    /// 并行执行
    Parallel { steps: Vec<Timeline> },
    /// 循环：每个周期从声明重建内部时间轴
    Loop {
        spec: Box<TimelineSpec>,
        inner: Box<Timeline>,
    },
    /// 纯延迟
    Delay { duration: f32, elapsed: f32 },
}

impl Timeline {
    /// 从声明编译运行时时间轴
    pub fn build(spec: &TimelineSpec) -> Self {
        match spec {
            TimelineSpec::Track {
                key,
                from,
                to,
                duration,
                easing,
                delay,
            } => Timeline::Track(
                Track::new(key.clone(), *from, *to, *duration)
                    .with_easing(*easing)
                    .with_delay(*delay),
            ),
            TimelineSpec::Sequence(steps) => Timeline::Sequence {
                steps: steps.iter().map(Timeline::build).collect(),
                current: 0,
            },
            TimelineSpec::Parallel(steps) => Timeline::Parallel {
                steps: steps.iter().map(Timeline::build).collect(),
            },
            TimelineSpec::Stagger { steps, interval } => {
                // 错峰 = 并行 + 逐份递增延迟
                let delayed: Vec<Timeline> = steps
                    .iter()
                    .enumerate()
                    .map(|(i, s)| Timeline::build(&s.clone().delayed(interval * i as f32)))
                    .collect();
                Timeline::Parallel { steps: delayed }
            }
            TimelineSpec::Loop(step) => Timeline::Loop {
                spec: step.clone(),
                inner: Box::new(Timeline::build(step)),
            },
            TimelineSpec::Delay(d) => Timeline::Delay {
                duration: *d,
                elapsed: 0.0,
            },
        }
    }

    /// 推进时间轴
    ///
    /// # 返回
    /// - `None`: 仍在进行中
    /// - `Some(leftover)`: 已完成，剩余 `leftover` 秒未消耗
    pub fn update(&mut self, dt: f32, store: &mut ValueStore) -> Option<f32> {
        match self {
            Timeline::Track(track) => {
                let result = track.update(dt);
                store.set(track.key.clone(), track.current_value());
                result
            }

            Timeline::Delay { duration, elapsed } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    Some(*elapsed - *duration)
                } else {
                    None
                }
            }

            Timeline::Sequence { steps, current } => {
                let mut remaining = dt;
                loop {
                    let Some(step) = steps.get_mut(*current) else {
                        // 已经走完所有步
                        return Some(remaining);
                    };
                    match step.update(remaining, store) {
                        None => return None,
                        Some(leftover) => {
                            *current += 1;
                            remaining = leftover;
                            if *current >= steps.len() {
                                return Some(remaining);
                            }
                            // 剩余时间流入下一步（可能为 0，让下一步落到起点）
                        }
                    }
                }
            }

            Timeline::Parallel { steps } => {
                let mut all_finished = true;
                let mut min_leftover = dt;
                for step in steps.iter_mut() {
                    match step.update(dt, store) {
                        Some(leftover) => min_leftover = min_leftover.min(leftover),
                        None => all_finished = false,
                    }
                }
                if all_finished { Some(min_leftover) } else { None }
            }

            Timeline::Loop { spec, inner } => {
                let mut remaining = dt;
                loop {
                    match inner.update(remaining, store) {
                        None => return None,
                        Some(leftover) => {
                            // 周期结束，重建后继续；若本周期未消耗任何时间
                            // （零时长声明），每次 tick 只推进一圈，防止死循环
                            **inner = Timeline::build(spec);
                            if leftover >= remaining || leftover <= 0.0 {
                                return None;
                            }
                            remaining = leftover;
                        }
                    }
                }
            }
        }
    }
}
