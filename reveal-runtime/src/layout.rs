//! # Layout 模块
//!
//! 确定性布局生成：粒子爆发、碎片网格、游魂站位、塔罗发牌顺序。
//!
//! ## 设计原则
//!
//! - **纯函数**：同样的 `(count, seed_basis)` 永远产生逐位相同的输出，
//!   重渲染不会打乱粒子身份，快照式测试可以直接比较
//! - **零随机源**：位置/角度/延迟全部由序号经三角函数与模运算算出，
//!   需要"随机感"的一次性取值（如发牌顺序）由 seed 推导，
//!   在实例构造时冻结，之后绝不重新计算
//! - `count = 0` 产生空布局，不是错误

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// 黄金角（弧度），用于均匀又不规则的圆周分布
const GOLDEN_ANGLE: f32 = 2.399_963;

/// 二维偏移
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的二维偏移
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 爆发粒子的布局参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutParticle {
    /// 粒子序号
    pub index: usize,
    /// 相对爆发中心的终点偏移
    pub offset: Vec2,
    /// 启动延迟（秒）
    pub delay: f32,
    /// 粒子尺寸
    pub size: f32,
    /// 调色板索引（具体颜色由 Host 的主题决定）
    pub color_index: usize,
}

/// 碎片网格的布局参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFragment {
    /// 碎片序号（行优先）
    pub index: usize,
    /// 网格行
    pub row: usize,
    /// 网格列
    pub col: usize,
    /// 散落起点偏移（相对碎片的网格位置）
    pub scatter: Vec2,
    /// 散落时的旋转（弧度）
    pub scatter_rotation: f32,
    /// 汇聚错峰槽位（乘以配置的 stagger 间隔得到秒数）
    pub delay_slot: usize,
}

/// 游魂的布局参数（捕猎效果的可选目标）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutGhost {
    /// 游魂序号
    pub index: usize,
    /// 站位原点
    pub origin: Vec2,
    /// 漂移半径
    pub drift_radius: f32,
    /// 漂移周期（秒）
    pub drift_period: f32,
}

/// 由 seed 推导一个 [0, 2π) 的整体旋转，让不同实例的布局朝向不同
fn seed_rotation(seed_basis: u64) -> f32 {
    (seed_basis % 360) as f32 * PI / 180.0
}

/// 生成粒子爆发布局
///
/// 粒子沿黄金角螺旋分布在三圈同心环上，延迟与尺寸由序号取模错开。
pub fn particle_burst(count: usize, seed_basis: u64) -> Vec<LayoutParticle> {
    let rotation = seed_rotation(seed_basis);

    (0..count)
        .map(|i| {
            let angle = rotation + i as f32 * GOLDEN_ANGLE;
            let radius = 40.0 + (i % 3) as f32 * 14.0;
            LayoutParticle {
                index: i,
                offset: Vec2::new(angle.cos() * radius, angle.sin() * radius),
                delay: (i % 5) as f32 * 0.04,
                size: 6.0 + ((i as u64 + seed_basis) % 4) as f32 * 2.0,
                color_index: ((i as u64 + seed_basis) % 6) as usize,
            }
        })
        .collect()
}

/// 生成碎片网格布局
///
/// 每片记录自己的网格位置与散落起点；汇聚槽位用与片数互质的步长
/// 打散，保证槽位是 0..count 的置换，避免行优先汇聚的机械感。
pub fn fragment_grid(rows: usize, cols: usize, seed_basis: u64) -> Vec<LayoutFragment> {
    let count = rows * cols;
    let rotation = seed_rotation(seed_basis);
    // 互质步长保证每片一个槽位，不因 count 的因数而碰撞
    let slot_step = (3usize..).find(|s| gcd(*s, count.max(1)) == 1).unwrap_or(3);

    (0..count)
        .map(|i| {
            let angle = rotation + i as f32 * GOLDEN_ANGLE;
            let distance = 120.0 + (i % 4) as f32 * 30.0;
            LayoutFragment {
                index: i,
                row: i / cols.max(1),
                col: i % cols.max(1),
                scatter: Vec2::new(angle.cos() * distance, angle.sin() * distance),
                scatter_rotation: ((i % 7) as f32 - 3.0) * 0.35,
                delay_slot: (i * slot_step + (seed_basis % 13) as usize) % count.max(1),
            }
        })
        .collect()
}

/// 生成游魂站位布局
///
/// 游魂横向均匀铺开，纵向与漂移参数由序号取模错开。
pub fn ghost_placements(count: usize, seed_basis: u64) -> Vec<LayoutGhost> {
    let span = 160.0;
    let step = if count > 1 {
        span / (count - 1) as f32
    } else {
        0.0
    };

    (0..count)
        .map(|i| {
            let lane = ((i as u64 * 2 + seed_basis) % 3) as f32 - 1.0;
            let x = if count > 1 {
                -span / 2.0 + i as f32 * step
            } else {
                0.0
            };
            LayoutGhost {
                index: i,
                origin: Vec2::new(x, lane * 30.0),
                drift_radius: 12.0 + (i % 3) as f32 * 6.0,
                drift_period: 1.6 + (i % 4) as f32 * 0.3,
            }
        })
        .collect()
}

/// 生成塔罗发牌顺序（模运算置换）
///
/// "一次性随机"的体现：顺序只取决于 seed，
/// 在实例构造时算一次并冻结，渲染期间绝不重排。
pub fn deal_order(count: usize, seed_basis: u64) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }

    // 与 count 互质的步长保证覆盖所有下标
    let steps: Vec<usize> = (1..=count).filter(|s| gcd(*s, count) == 1).collect();
    let step = steps[(seed_basis % steps.len() as u64) as usize];
    let offset = ((seed_basis / 7) % count as u64) as usize;

    (0..count).map(|i| (offset + i * step) % count).collect()
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}
