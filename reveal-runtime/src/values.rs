//! # Values 模块
//!
//! 每个实例独占的视觉量存储。
//!
//! ## 设计说明
//!
//! 这是"显式最新值单元"：Host 的渲染回调每帧从这里读**当前**值，
//! 而不是捕获注册时的旧快照。引擎在每次 `tick` 中写入，
//! 渲染侧只读，两边通过实例的所有权边界隔离。

use std::collections::HashMap;

use crate::timeline::TrackKey;

/// 视觉量存储
///
/// `TrackKey -> f32` 的平面映射。实例独占，不跨实例共享。
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: HashMap<TrackKey, f32>,
}

impl ValueStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入值
    pub fn set(&mut self, key: TrackKey, value: f32) {
        self.values.insert(key, value);
    }

    /// 读取值
    pub fn get(&self, key: &TrackKey) -> Option<f32> {
        self.values.get(key).copied()
    }

    /// 读取值，缺省时返回默认值
    pub fn get_or(&self, key: &TrackKey, default: f32) -> f32 {
        self.get(key).unwrap_or(default)
    }

    /// 当前存储的值数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 遍历所有值
    pub fn iter(&self) -> impl Iterator<Item = (&TrackKey, f32)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}
