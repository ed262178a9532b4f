// 统一错误类型定义

use nounlog_common::{CommonError, Level};
use thiserror::Error;

/// 日志门面统一错误类型
///
/// 除 `Adapter` 外均为配置期错误：表示程序或部署配置有误，调用方应当立即中止。
#[derive(Debug, Error)]
pub enum LogError {
    /// 适配器名称重复注册
    #[error("适配器已注册: [{name}]")]
    AdapterAlreadyRegistered { name: String },

    /// 日志级别名称无效
    #[error("日志级别无效: [{name}]")]
    InvalidLevelName { name: String },

    /// 排除绕过级别名称无效
    #[error("排除绕过级别无效: [{name}]")]
    InvalidBypassLevelName { name: String },

    /// 格式字符串为空
    #[error("日志格式为空")]
    FormatEmpty,

    /// 格式模板无法编译
    #[error("日志格式模板无效: {message}")]
    TemplateInvalid { message: String },

    /// 尚未加载配置
    #[error("无法配置日志器: 配置尚未加载")]
    ConfigurationNotLoaded,

    /// 配置源加载失败
    #[error("配置源加载失败: {message}")]
    Provider { message: String },

    /// tracing 订阅器配置无效或安装失败
    #[error("订阅器配置错误: {message}")]
    Subscriber { message: String },

    /// 适配器写出失败
    #[error("适配器处理 {level} 级别消息失败: {source}")]
    Adapter {
        level: Level,
        #[source]
        source: anyhow::Error,
    },
}

impl LogError {
    /// 获取错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AdapterAlreadyRegistered { .. } => "ADAPTER_ALREADY_REGISTERED",
            Self::InvalidLevelName { .. } => "INVALID_LEVEL_NAME",
            Self::InvalidBypassLevelName { .. } => "INVALID_BYPASS_LEVEL_NAME",
            Self::FormatEmpty => "FORMAT_EMPTY",
            Self::TemplateInvalid { .. } => "TEMPLATE_INVALID",
            Self::ConfigurationNotLoaded => "CONFIGURATION_NOT_LOADED",
            Self::Provider { .. } => "PROVIDER_ERROR",
            Self::Subscriber { .. } => "SUBSCRIBER_ERROR",
            Self::Adapter { .. } => "ADAPTER_ERROR",
        }
    }

    /// 是否为配置期错误
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::Adapter { .. })
    }

    /// 创建适配器重复注册错误
    pub fn adapter_already_registered(name: impl Into<String>) -> Self {
        Self::AdapterAlreadyRegistered { name: name.into() }
    }

    /// 创建无效级别错误
    pub fn invalid_level_name(name: impl Into<String>) -> Self {
        Self::InvalidLevelName { name: name.into() }
    }

    /// 创建无效绕过级别错误
    pub fn invalid_bypass_level_name(name: impl Into<String>) -> Self {
        Self::InvalidBypassLevelName { name: name.into() }
    }

    /// 创建模板错误
    pub fn template_invalid(message: impl Into<String>) -> Self {
        Self::TemplateInvalid {
            message: message.into(),
        }
    }

    /// 创建配置源错误
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// 创建订阅器错误
    pub fn subscriber(message: impl Into<String>) -> Self {
        Self::Subscriber {
            message: message.into(),
        }
    }

    /// 创建适配器错误
    pub fn adapter(level: Level, source: anyhow::Error) -> Self {
        Self::Adapter { level, source }
    }
}

/// 从 CommonError 转换
impl From<CommonError> for LogError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::UnknownLevel { name } => Self::invalid_level_name(name),
        }
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for LogError {
    fn from(err: config::ConfigError) -> Self {
        Self::provider(format!("配置加载错误: {}", err))
    }
}
