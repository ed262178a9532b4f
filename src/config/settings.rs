// 日志门面设置和配置
// 定义配置状态、快照以及 tracing 订阅器配置

use nounlog_common::Level;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 默认日志格式
pub const DEFAULT_FORMAT: &str =
    "{{.Noun}}: [{{.Level}}] {{if eq .ExcludeBypass true}} [BYPASS]{{end}} {{.Message}}";

/// 默认日志级别
pub const DEFAULT_LEVEL: Level = Level::Info;

/// 配置状态
///
/// 名词列表由过滤集合持有，默认适配器名称由适配器注册表持有。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigState {
    pub format: String,
    pub level: Level,
    /// 达到或超过该级别的消息无视排除过滤
    pub bypass_level: Option<Level>,
    pub loaded: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            level: DEFAULT_LEVEL,
            bypass_level: None,
            loaded: false,
        }
    }
}

/// 完整配置快照，可用于保存与恢复
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub format: String,
    pub default_adapter_name: String,
    pub level: Level,
    /// 逗号分隔
    pub include_nouns: String,
    /// 逗号分隔
    pub exclude_nouns: String,
    pub bypass_level: Option<Level>,
    pub loaded: bool,
}

impl ConfigSnapshot {
    /// 转换为 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current configuration:\n  FORMAT=[{}]\n  DEFAULT-ADAPTER-NAME=[{}]\n  LEVEL-NAME=[{}]\n  INCLUDE-NOUNS=[{}]\n  EXCLUDE-NOUNS=[{}]\n  EXCLUDE-BYPASS-LEVEL-NAME=[{}]",
            self.format,
            self.default_adapter_name,
            self.level,
            self.include_nouns,
            self.exclude_nouns,
            self.bypass_level.map(|level| level.as_str()).unwrap_or(""),
        )
    }
}

/// tracing 订阅器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberConfig {
    pub level: String,
    pub format: String,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "full".to_string(),
        }
    }
}
