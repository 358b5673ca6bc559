//! # 揭示序列集成测试
//!
//! 测试 RevealRuntime → Command 流 → 轨道值的完整链路。
//! 这些测试不依赖真实的渲染设备，以固定步长模拟 Host 主循环。

use reveal_runtime::{
    Alignment, EffectKind, InteractionKind, Phase, RevealCommand, RevealConfig, RevealInput,
    RevealOptions, RevealRuntime, RevealStatus, RoleDisplayData, TrackKey, analyze_all,
};

fn role() -> RoleDisplayData {
    RoleDisplayData::new("seer", "预言家", Alignment::Good)
        .with_icon("icons/seer.png")
        .with_description("每晚查验一名玩家的阵营")
}

fn options(seed: u64) -> RevealOptions {
    RevealOptions {
        seed,
        ..RevealOptions::default()
    }
}

/// 以固定步长驱动实例直到完成，返回全部指令
fn drive_to_completion(runtime: &mut RevealRuntime, step: f32, max_ticks: usize) -> Vec<RevealCommand> {
    let mut all = Vec::new();
    for _ in 0..max_ticks {
        let (commands, status) = runtime.tick(step, None).unwrap();
        all.extend(commands);
        if status == RevealStatus::Completed {
            return all;
        }
    }
    panic!("sequence did not complete within {} ticks", max_ticks);
}

fn entered_phases(commands: &[RevealCommand]) -> Vec<Phase> {
    commands.iter().filter_map(|c| c.entered_phase()).collect()
}

/// 每种效果声明的阶段顺序
#[test]
fn test_phase_orders_per_kind() {
    let expected: [(EffectKind, &[Phase]); 8] = [
        (
            EffectKind::Flip,
            &[
                Phase::Entry,
                Phase::Levitate,
                Phase::Flipping,
                Phase::Landing,
                Phase::Revealed,
            ],
        ),
        (
            EffectKind::Scratch,
            &[
                Phase::Entry,
                Phase::Scratching,
                Phase::Clearing,
                Phase::Revealed,
            ],
        ),
        (
            EffectKind::FogDisperse,
            &[Phase::Veiled, Phase::Dispersing, Phase::Revealed],
        ),
        (
            EffectKind::GachaCapsule,
            &[
                Phase::Ready,
                Phase::Spinning,
                Phase::Dropping,
                Phase::Waiting,
                Phase::Opening,
                Phase::Revealed,
            ],
        ),
        (
            EffectKind::TarotDraw,
            &[
                Phase::Spread,
                Phase::Choosing,
                Phase::Drawing,
                Phase::Flipping,
                Phase::Revealed,
            ],
        ),
        (
            EffectKind::FragmentAssembly,
            &[
                Phase::Scattered,
                Phase::Converging,
                Phase::Fusing,
                Phase::Revealed,
            ],
        ),
        (
            EffectKind::Roulette,
            &[
                Phase::Ready,
                Phase::Spinning,
                Phase::Decelerating,
                Phase::Settled,
                Phase::Revealed,
            ],
        ),
        (
            EffectKind::HuntCapture,
            &[
                Phase::Prowling,
                Phase::Aiming,
                Phase::Capturing,
                Phase::Captured,
                Phase::Revealed,
            ],
        ),
    ];

    for (kind, phases) in expected {
        let mut runtime = RevealRuntime::new(kind, role(), &RevealConfig::default(), options(42));
        // 交互门由超时兜底（最长 8 秒），放宽步数上限
        let commands = drive_to_completion(&mut runtime, 0.5, 64);
        assert_eq!(entered_phases(&commands), phases, "kind = {}", kind);
    }
}

/// 刮奖：交互驱动的完整序列
#[test]
fn test_scratch_interactive_sequence() {
    let mut runtime = RevealRuntime::new(
        EffectKind::Scratch,
        role(),
        &RevealConfig::default(),
        options(0),
    );

    // 入场后停在刮除门
    let (_, status) = runtime.tick(0.3, None).unwrap();
    assert!(matches!(
        status,
        RevealStatus::AwaitingInteraction(InteractionKind::Scratch { .. })
    ));

    // 分多次上报刮除进度
    let mut all = Vec::new();
    for fraction in [0.2, 0.4, 0.55, 0.7] {
        let (commands, _) = runtime
            .tick(0.05, Some(RevealInput::scratch(fraction)))
            .unwrap();
        all.extend(commands);
    }
    assert!(entered_phases(&all).contains(&Phase::Clearing));

    // 走完消散与停留
    let commands = drive_to_completion(&mut runtime, 0.25, 16);
    assert_eq!(commands.iter().filter(|c| c.is_completed()).count(), 1);
}

/// 扭蛋：点击开壳的完整序列
#[test]
fn test_capsule_tap_sequence() {
    let mut runtime = RevealRuntime::new(
        EffectKind::GachaCapsule,
        role(),
        &RevealConfig::default(),
        options(3),
    );

    // 就绪 + 旋转 + 掉落 = 1.45 秒
    let (_, status) = runtime.tick(1.5, None).unwrap();
    assert_eq!(
        status,
        RevealStatus::AwaitingInteraction(InteractionKind::Tap)
    );

    // 等待期间胶囊有晃动轨道在走
    runtime.tick(0.3, None).unwrap();
    assert!(runtime.value(&TrackKey::capsule_wobble()).is_some());

    let (commands, _) = runtime.tick(0.0, Some(RevealInput::tap())).unwrap();
    assert!(entered_phases(&commands).contains(&Phase::Opening));

    let commands = drive_to_completion(&mut runtime, 0.25, 16);
    assert_eq!(commands.iter().filter(|c| c.is_completed()).count(), 1);
}

/// 塔罗：选牌产生 TargetLocked，超时产生 TargetAutoSelected
#[test]
fn test_tarot_select_vs_timeout() {
    let config = RevealConfig::default();

    // 真实选择
    let mut chosen = RevealRuntime::new(EffectKind::TarotDraw, role(), &config, options(5));
    chosen.tick(1.0, None).unwrap();
    let (commands, _) = chosen.tick(0.0, Some(RevealInput::target(3))).unwrap();
    assert!(commands
        .iter()
        .any(|c| matches!(c, RevealCommand::TargetLocked { index: 3 })));

    // 超时合成
    let mut idle = RevealRuntime::new(EffectKind::TarotDraw, role(), &config, options(5));
    idle.tick(1.0, None).unwrap();
    let (commands, _) = idle.tick(8.0, None).unwrap();
    let auto = commands.iter().find_map(|c| match c {
        RevealCommand::TargetAutoSelected { index } => Some(*index),
        _ => None,
    });
    assert_eq!(auto, Some(0)); // 5 % 5
}

/// 同一 seed 的两个实例产出逐位相同的轨道值序列
#[test]
fn test_same_seed_is_deterministic() {
    let config = RevealConfig::default();
    let mut a = RevealRuntime::new(EffectKind::Roulette, role(), &config, options(9));
    let mut b = RevealRuntime::new(EffectKind::Roulette, role(), &config, options(9));

    for _ in 0..20 {
        a.tick(0.2, None).unwrap();
        b.tick(0.2, None).unwrap();
        assert_eq!(
            a.value(&TrackKey::wheel_angle()),
            b.value(&TrackKey::wheel_angle())
        );
    }
}

/// 不同 seed 的轮盘停在不同落点
#[test]
fn test_roulette_landing_depends_on_seed() {
    let config = RevealConfig::default();
    let mut a = RevealRuntime::new(EffectKind::Roulette, role(), &config, options(1));
    let mut b = RevealRuntime::new(EffectKind::Roulette, role(), &config, options(2));
    drive_to_completion(&mut a, 0.5, 16);
    drive_to_completion(&mut b, 0.5, 16);

    assert_ne!(
        a.value(&TrackKey::wheel_angle()),
        b.value(&TrackKey::wheel_angle())
    );
}

/// 减少动态：全部效果同步落到终态，完成恰好一次，停留更短
#[test]
fn test_reduced_motion_sweep() {
    let config = RevealConfig::default();
    for kind in EffectKind::ALL {
        let mut runtime = RevealRuntime::with_collaborators(
            kind,
            role(),
            &config,
            RevealOptions {
                reduced_motion: None,
                seed: 13,
                ..RevealOptions::default()
            },
            &reveal_runtime::FixedMotionPreference(true),
            Box::new(reveal_runtime::NullHaptics),
        );
        assert!(runtime.is_reduced_motion(), "kind = {}", kind);
        assert_eq!(runtime.phase(), Phase::Revealed, "kind = {}", kind);

        // 缩短停留（0.25 秒）内完成，远短于正常路径
        let (commands, status) = runtime.tick(0.25, None).unwrap();
        assert_eq!(status, RevealStatus::Completed, "kind = {}", kind);
        assert_eq!(
            commands.iter().filter(|c| c.is_completed()).count(),
            1,
            "kind = {}",
            kind
        );
        assert!(commands
            .iter()
            .any(|c| matches!(c, RevealCommand::RoleRevealed { .. })));
    }
}

/// 取消中途退出：此后任何推进都不产出完成信号
#[test]
fn test_cancel_mid_sequence() {
    let mut runtime = RevealRuntime::new(
        EffectKind::FragmentAssembly,
        role(),
        &RevealConfig::default(),
        options(0),
    );
    runtime.tick(0.5, None).unwrap();
    runtime.cancel();

    for _ in 0..20 {
        let (commands, status) = runtime.tick(1.0, None).unwrap();
        assert!(commands.is_empty());
        assert_eq!(status, RevealStatus::Canceled);
    }
    assert!(!runtime.is_completed());
}

/// 并发实例互不影响：各自的时钟、轨道值与完成信号完全隔离
#[test]
fn test_concurrent_reveals() {
    let config = RevealConfig::default();
    let mut runtimes: Vec<RevealRuntime> = EffectKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| RevealRuntime::new(kind, role(), &config, options(i as u64)))
        .collect();

    // 交错推进，中途取消其中一个
    runtimes[2].cancel();
    let mut completed = vec![0usize; runtimes.len()];
    for _ in 0..40 {
        for (i, runtime) in runtimes.iter_mut().enumerate() {
            let (commands, _) = runtime.tick(0.5, None).unwrap();
            completed[i] += commands.iter().filter(|c| c.is_completed()).count();
        }
    }

    for (i, count) in completed.iter().enumerate() {
        let expected = if i == 2 { 0 } else { 1 };
        assert_eq!(*count, expected, "instance = {}", i);
    }
}

/// 阶段轨迹按顺序记录全部阶段，时刻单调不减
#[test]
fn test_trace_records_full_path() {
    let mut runtime = RevealRuntime::new(
        EffectKind::Flip,
        role(),
        &RevealConfig::default(),
        options(0),
    );
    drive_to_completion(&mut runtime, 0.3, 16);

    let trace = runtime.trace();
    assert_eq!(
        trace.phases(),
        vec![
            Phase::Entry,
            Phase::Levitate,
            Phase::Flipping,
            Phase::Landing,
            Phase::Revealed,
        ]
    );
    for pair in trace.entries().windows(2) {
        assert!(pair[0].at <= pair[1].at);
    }
}

/// JSON 里局部覆盖的配置照常驱动完整序列
#[test]
fn test_config_from_json_drives_sequence() {
    let config = RevealConfig::from_json(
        r#"{
            "common": { "reveal_hold": 0.2 },
            "flip": { "flip_duration": 0.2, "levitate_duration": 0.1 }
        }"#,
    )
    .unwrap();

    // 改短后的总时长：0.3 + 0.1 + 0.2 + 0.25 + 0.2 = 1.05
    let mut runtime = RevealRuntime::new(EffectKind::Flip, role(), &config, options(0));
    let (commands, status) = runtime.tick(1.1, None).unwrap();
    assert_eq!(status, RevealStatus::Completed);
    assert_eq!(commands.iter().filter(|c| c.is_completed()).count(), 1);

    // 覆盖后的配置仍通过静态检查
    assert!(!analyze_all(&config, 0).has_errors());
}
