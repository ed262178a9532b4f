// 通用类型定义

use crate::errors::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 日志严重级别
///
/// 顺序固定且全序：`Debug < Info < Warning < Error`。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl Level {
    /// 全部级别，按严重程度升序
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warning, Level::Error];

    /// 规范的小写名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// 严重程度排名（0 最低）
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// 按名称查找级别，忽略大小写
    pub fn from_name(name: &str) -> Result<Self, CommonError> {
        let normalized = name.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| CommonError::unknown_level(name))
    }

    /// 按排名查找级别
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<String> for Level {
    type Error = CommonError;

    fn try_from(value: String) -> Result<Self, CommonError> {
        Self::from_name(&value)
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}
