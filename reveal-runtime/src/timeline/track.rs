//! # Track 模块
//!
//! 单条插值轨道：一个 f32 值从 `from` 到 `to` 在 `duration` 内的变化。
//!
//! 核心设计：轨道只关注值的时间轴变化，不假设这个值渲染成什么。

use super::EasingFunction;

/// 轨道键
///
/// 唯一标识一个被驱动的视觉量。格式：`"target.field"` 或
/// `"target:index.field"`。
///
/// 例如：
/// - `"card.alpha"` - 卡面透明度
/// - `"particle:3.progress"` - 第 3 个爆发粒子的进度
/// - `"ghost:1.bob"` - 第 1 个游魂的漂移相位
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey(pub String);

impl TrackKey {
    /// 创建轨道键
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// 卡面透明度
    pub fn card_alpha() -> Self {
        Self::new("card.alpha")
    }

    /// 卡面纵向偏移
    pub fn card_offset_y() -> Self {
        Self::new("card.offset_y")
    }

    /// 卡面翻转角（0.0 = 背面，1.0 = 正面）
    pub fn card_rotation() -> Self {
        Self::new("card.rotation")
    }

    /// 卡面缩放
    pub fn card_scale() -> Self {
        Self::new("card.scale")
    }

    /// 刮奖涂层覆盖率（1.0 = 全覆盖，0.0 = 全清除）
    pub fn mask_coverage() -> Self {
        Self::new("mask.coverage")
    }

    /// 迷雾浓度
    pub fn fog_density() -> Self {
        Self::new("fog.density")
    }

    /// 迷雾微光相位
    pub fn fog_shimmer() -> Self {
        Self::new("fog.shimmer")
    }

    /// 扭蛋摇杆角度
    pub fn capsule_crank() -> Self {
        Self::new("capsule.crank")
    }

    /// 胶囊纵向位置
    pub fn capsule_drop_y() -> Self {
        Self::new("capsule.drop_y")
    }

    /// 胶囊盖开合度
    pub fn capsule_lid() -> Self {
        Self::new("capsule.lid")
    }

    /// 胶囊待开时的轻微晃动角
    pub fn capsule_wobble() -> Self {
        Self::new("capsule.wobble")
    }

    /// 轮盘角度（累计圈数）
    pub fn wheel_angle() -> Self {
        Self::new("wheel.angle")
    }

    /// 捕网收拢半径
    pub fn net_radius() -> Self {
        Self::new("net.radius")
    }

    /// 壳体裂纹进度
    pub fn shell_crack() -> Self {
        Self::new("shell.crack")
    }

    /// 带序号的轨道键，如 `particle:3.progress`
    pub fn indexed(target: &str, index: usize, field: &str) -> Self {
        Self::new(format!("{}:{}.{}", target, index, field))
    }

    /// 爆发粒子进度
    pub fn particle_progress(index: usize) -> Self {
        Self::indexed("particle", index, "progress")
    }

    /// 碎片汇聚进度
    pub fn fragment_progress(index: usize) -> Self {
        Self::indexed("fragment", index, "progress")
    }

    /// 塔罗牌摊开进度
    pub fn tarot_spread(index: usize) -> Self {
        Self::indexed("tarot", index, "spread")
    }

    /// 游魂漂移相位
    pub fn ghost_bob(index: usize) -> Self {
        Self::indexed("ghost", index, "bob")
    }

    /// 获取键字符串
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 轨道状态
///
/// 单向推进：`Pending -> Playing -> Completed`，没有回头路。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// 等待开始（有延迟）
    #[default]
    Pending,
    /// 正在播放
    Playing,
    /// 已完成
    Completed,
}

/// 插值轨道
#[derive(Debug, Clone)]
pub struct Track {
    /// 轨道键
    pub key: TrackKey,
    /// 起始值
    pub from: f32,
    /// 目标值
    pub to: f32,
    /// 时长（秒）
    pub duration: f32,
    /// 缓动函数
    pub easing: EasingFunction,
    /// 延迟启动（秒）
    pub delay: f32,
    /// 当前状态
    pub state: TrackState,
    /// 当前进度（0.0 - 1.0，已应用缓动）
    pub progress: f32,
    /// 已经过的时间（从轨道启动起，含延迟）
    elapsed: f32,
}

impl Track {
    /// 创建新的轨道
    pub fn new(key: TrackKey, from: f32, to: f32, duration: f32) -> Self {
        Self {
            key,
            from,
            to,
            duration: duration.max(0.0),
            easing: EasingFunction::default(),
            delay: 0.0,
            state: TrackState::Pending,
            progress: 0.0,
            elapsed: 0.0,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 设置延迟
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// 更新轨道
    ///
    /// # 返回
    /// - `None`: 轨道仍在进行中
    /// - `Some(leftover)`: 轨道本次更新内结束，剩余 `leftover` 秒未消耗
    ///   （用于让序列中的下一步在同一次 tick 内继续推进）
    pub fn update(&mut self, dt: f32) -> Option<f32> {
        match self.state {
            TrackState::Completed => Some(dt),
            TrackState::Pending => {
                self.elapsed += dt;
                if self.elapsed >= self.delay {
                    self.state = TrackState::Playing;
                    self.advance_playing()
                } else {
                    None
                }
            }
            TrackState::Playing => {
                self.elapsed += dt;
                self.advance_playing()
            }
        }
    }

    /// 推进播放中的轨道
    fn advance_playing(&mut self) -> Option<f32> {
        let into = self.elapsed - self.delay;

        if self.duration <= 0.0 {
            self.progress = 1.0;
            self.state = TrackState::Completed;
            return Some(into.max(0.0));
        }

        let raw = into / self.duration;
        if raw >= 1.0 {
            self.progress = 1.0;
            self.state = TrackState::Completed;
            Some(into - self.duration)
        } else {
            self.progress = self.easing.apply(raw);
            None
        }
    }

    /// 获取当前值
    pub fn current_value(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state == TrackState::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track() -> Track {
        Track::new(TrackKey::card_alpha(), 0.0, 1.0, 1.0)
    }

    #[test]
    fn test_track_creation() {
        let track = create_test_track();
        assert_eq!(track.state, TrackState::Pending);
        assert_eq!(track.progress, 0.0);
        assert_eq!(track.current_value(), 0.0);
    }

    #[test]
    fn test_track_update() {
        let mut track = create_test_track();

        // 无延迟，第一次更新即进入 Playing
        assert!(track.update(0.1).is_none());
        assert_eq!(track.state, TrackState::Playing);

        assert!(track.update(0.4).is_none());
        let value = track.current_value();
        assert!(value > 0.0 && value < 1.0);

        // 完成并报告剩余时间
        let leftover = track.update(0.7).unwrap();
        assert!((leftover - 0.2).abs() < 1e-5);
        assert!(track.is_finished());
        assert_eq!(track.current_value(), 1.0);
    }

    #[test]
    fn test_track_with_delay() {
        let mut track = create_test_track().with_delay(0.5);

        assert!(track.update(0.3).is_none());
        assert_eq!(track.state, TrackState::Pending);

        assert!(track.update(0.3).is_none());
        assert_eq!(track.state, TrackState::Playing);
    }

    #[test]
    fn test_zero_duration() {
        let mut track = Track::new(TrackKey::card_alpha(), 0.0, 1.0, 0.0);
        // 零时长轨道在第一次更新内立即完成
        let leftover = track.update(0.25).unwrap();
        assert!((leftover - 0.25).abs() < 1e-5);
        assert_eq!(track.current_value(), 1.0);
    }

    #[test]
    fn test_track_key_format() {
        assert_eq!(TrackKey::card_alpha().as_str(), "card.alpha");
        assert_eq!(
            TrackKey::particle_progress(3).as_str(),
            "particle:3.progress"
        );
        assert_eq!(TrackKey::ghost_bob(1).as_str(), "ghost:1.bob");
    }
}
