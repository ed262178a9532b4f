// 通用错误类型定义

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 通用错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error_type", content = "details")]
pub enum CommonError {
    /// 未知的日志级别名称
    #[error("未知的日志级别: [{name}]")]
    UnknownLevel { name: String },
}

impl CommonError {
    /// 获取错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLevel { .. } => "UNKNOWN_LEVEL",
        }
    }

    /// 创建未知级别错误
    pub fn unknown_level(name: impl Into<String>) -> Self {
        Self::UnknownLevel { name: name.into() }
    }
}
