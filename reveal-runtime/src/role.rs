//! # Role 模块
//!
//! 定义 Host 传入的角色展示数据。
//!
//! ## 设计说明
//!
//! - `RoleDisplayData` 是**不可变值对象**：引擎只读取，从不修改
//! - 引擎不理解游戏规则，阵营标签只用于 Host 渲染（配色等）
//! - 所有字段可序列化，便于 Host 在进程边界间传递

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 阵营标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    /// 好人阵营
    Good,
    /// 狼人/坏人阵营
    Evil,
    /// 中立阵营
    Neutral,
}

impl Alignment {
    /// 获取阵营名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Evil => "evil",
            Self::Neutral => "neutral",
        }
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "evil" => Ok(Self::Evil),
            "neutral" => Ok(Self::Neutral),
            other => Err(format!("未知阵营: {}", other)),
        }
    }
}

/// 角色展示数据
///
/// 由外部协作方（游戏状态层）提供，引擎在构造时克隆一份，
/// 在到达终态时随 `RoleRevealed` 指令交还给 Host 渲染。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDisplayData {
    /// 角色标识符
    pub id: String,
    /// 展示名称
    pub name: String,
    /// 阵营标签
    pub alignment: Alignment,
    /// 图标资源引用（可选，由 Host 解析）
    #[serde(default)]
    pub icon: Option<String>,
    /// 角色描述（可选）
    #[serde(default)]
    pub description: Option<String>,
}

impl RoleDisplayData {
    /// 创建新的角色展示数据
    pub fn new(id: impl Into<String>, name: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alignment,
            icon: None,
            description: None,
        }
    }

    /// 设置图标引用
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_creation() {
        let role = RoleDisplayData::new("werewolf", "狼人", Alignment::Evil)
            .with_icon("icons/werewolf.png")
            .with_description("夜晚袭击村民");

        assert_eq!(role.id, "werewolf");
        assert_eq!(role.name, "狼人");
        assert_eq!(role.alignment, Alignment::Evil);
        assert_eq!(role.icon.as_deref(), Some("icons/werewolf.png"));
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("good".parse::<Alignment>(), Ok(Alignment::Good));
        assert_eq!("Evil".parse::<Alignment>(), Ok(Alignment::Evil));
        assert!("unknown".parse::<Alignment>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        let role = RoleDisplayData::new("seer", "预言家", Alignment::Good);
        let json = serde_json::to_string(&role).unwrap();
        let deserialized: RoleDisplayData = serde_json::from_str(&json).unwrap();
        assert_eq!(role, deserialized);
    }
}
