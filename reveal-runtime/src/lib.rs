//! # Reveal Runtime
//!
//! 角色揭示序列的核心运行时库。
//!
//! ## 架构概述
//!
//! `reveal-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它通过 **命令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                          Runtime
//!   │                              │
//!   │──── dt + RevealInput ──────►│
//!   │                              │ tick()
//!   │◄─── (Vec<RevealCommand>, RevealStatus) ──│
//!   │                              │
//! ```
//!
//! 每帧 Host 注入时间步长和语义化输入，引擎推进当前效果的阶段图，
//! 把插值结果写进轨道值存储，并以指令流报告阶段转换与完成。
//! Host 读取轨道值渲染，怎样把数值画成透明度、角度或位移由 Host 决定。
//!
//! ## 核心类型
//!
//! - [`RevealRuntime`]：执行引擎，每个待揭示角色一个实例
//! - [`RevealCommand`]：引擎向 Host 发出的指令
//! - [`RevealInput`]：Host 向引擎传递的输入
//! - [`RevealStatus`]：tick 返回的实例状态
//! - [`EffectKind`]：八种揭示效果
//!
//! ## 使用示例
//!
//! ```ignore
//! use reveal_runtime::{
//!     EffectKind, RevealConfig, RevealOptions, RevealRuntime, RevealStatus, RoleDisplayData,
//! };
//!
//! let role = RoleDisplayData::new("witch", "女巫", Alignment::Good);
//! let mut runtime = RevealRuntime::new(
//!     EffectKind::TarotDraw,
//!     role,
//!     &RevealConfig::default(),
//!     RevealOptions::default(),
//! );
//!
//! // 渲染主循环
//! loop {
//!     let (commands, status) = runtime.tick(frame_dt, take_input())?;
//!     for cmd in commands {
//!         host.execute(cmd);
//!     }
//!     match status {
//!         RevealStatus::AwaitingInteraction(kind) => host.show_prompt(kind),
//!         RevealStatus::Completed => break,
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`command`]：RevealCommand 定义
//! - [`input`]：RevealInput 定义
//! - [`phase`]：阶段模型与八种效果的阶段图
//! - [`timeline`]：时间轴系统（轨道、组合子、句柄）
//! - [`layout`]：确定性布局生成
//! - [`runtime`]：执行引擎
//! - [`config`]：效果参数与默认值
//! - [`haptics`]：触感反馈协作方
//! - [`motion`]：减少动态偏好解析
//! - [`diagnostic`]：阶段图静态检查
//! - [`trace`]：阶段轨迹
//! - [`error`]：错误类型定义

pub mod command;
pub mod completion;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod haptics;
pub mod input;
pub mod layout;
pub mod motion;
pub mod phase;
pub mod role;
pub mod runtime;
pub mod timeline;
pub mod trace;
pub mod values;

// 重导出核心类型
pub use command::RevealCommand;
pub use config::{RevealConfig, defaults};
pub use diagnostic::{
    Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_all, analyze_graph,
};
pub use error::{ConfigError, EngineError, RevealError, RevealResult};
pub use haptics::{FeedbackKind, HapticsError, HapticsSink, NullHaptics};
pub use input::RevealInput;
pub use layout::{LayoutFragment, LayoutGhost, LayoutParticle, Vec2};
pub use motion::{FixedMotionPreference, MotionPreference, UnavailableMotionPreference};
pub use phase::{EffectKind, InteractionKind, Phase, PhaseGate, PhaseGraph, PhaseNode};
pub use role::{Alignment, RoleDisplayData};
pub use runtime::{RevealOptions, RevealRuntime, RevealStatus};
pub use timeline::{EasingFunction, Timeline, TimelineHandle, TimelineSpec, Track, TrackKey};
pub use trace::{PhaseTrace, TraceEntry};
pub use values::ValueStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let _cmd = RevealCommand::PhaseEntered {
            phase: Phase::Entry,
        };

        let _input = RevealInput::Tap;

        let _options = RevealOptions::default();

        let _config = RevealConfig::default();
    }
}
