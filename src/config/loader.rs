// 配置加载器
// 定义配置提供者契约：环境变量、内存静态配置、配置文件

use crate::errors::LogError;
use config::{Config, Environment, File};
use dotenvy::dotenv;
use nounlog_common::Level;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{info, warn};

/// 环境变量键
pub const ENV_FORMAT: &str = "LogFormat";
pub const ENV_DEFAULT_ADAPTER_NAME: &str = "LogDefaultAdapterName";
/// 旧版键名，仅在新键为空时读取
pub const ENV_LEGACY_ADAPTER_NAME: &str = "LogAdapterName";
pub const ENV_LEVEL_NAME: &str = "LogLevelName";
pub const ENV_INCLUDE_NOUNS: &str = "LogIncludeNouns";
pub const ENV_EXCLUDE_NOUNS: &str = "LogExcludeNouns";
pub const ENV_EXCLUDE_BYPASS_LEVEL_NAME: &str = "LogExcludeBypassLevelName";

/// 配置文件对应的环境变量前缀
pub const FILE_ENV_PREFIX: &str = "NOUNLOG";

/// 配置提供者
///
/// 空字符串表示"未配置"。格式、默认适配器与级别为空时保持原值；
/// 名词列表与绕过级别总是整体覆盖。
pub trait ConfigurationProvider {
    /// 日志格式模板
    fn format(&self) -> String;

    /// 默认适配器名称
    fn default_adapter_name(&self) -> String;

    /// 日志级别名称
    fn level_name(&self) -> String;

    /// 逗号分隔的包含名词
    fn include_nouns(&self) -> String;

    /// 逗号分隔的排除名词
    fn exclude_nouns(&self) -> String;

    /// 达到或超过该级别时无视排除过滤
    fn exclude_bypass_level_name(&self) -> String;
}

fn read_env(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

/// 环境变量配置提供者
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentConfigurationProvider;

impl EnvironmentConfigurationProvider {
    pub fn new() -> Self {
        Self
    }

    /// 先加载 .env 文件再读取环境变量
    pub fn with_dotenv() -> Self {
        if let Err(e) = dotenv() {
            warn!("无法加载 .env 文件: {}", e);
        }

        Self
    }
}

impl ConfigurationProvider for EnvironmentConfigurationProvider {
    fn format(&self) -> String {
        read_env(ENV_FORMAT)
    }

    fn default_adapter_name(&self) -> String {
        let name = read_env(ENV_DEFAULT_ADAPTER_NAME);
        if name.is_empty() {
            read_env(ENV_LEGACY_ADAPTER_NAME)
        } else {
            name
        }
    }

    fn level_name(&self) -> String {
        read_env(ENV_LEVEL_NAME)
    }

    fn include_nouns(&self) -> String {
        read_env(ENV_INCLUDE_NOUNS)
    }

    fn exclude_nouns(&self) -> String {
        read_env(ENV_EXCLUDE_NOUNS)
    }

    fn exclude_bypass_level_name(&self) -> String {
        read_env(ENV_EXCLUDE_BYPASS_LEVEL_NAME)
    }
}

/// 内存静态配置提供者，用于测试和程序化设置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticConfigurationProvider {
    format: String,
    default_adapter_name: String,
    level_name: String,
    include_nouns: String,
    exclude_nouns: String,
    exclude_bypass_level_name: String,
}

impl StaticConfigurationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.format = format.into();
        self
    }

    pub fn set_default_adapter_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.default_adapter_name = name.into();
        self
    }

    pub fn set_level_name(&mut self, level_name: impl Into<String>) -> &mut Self {
        self.level_name = level_name.into().to_lowercase();
        self
    }

    pub fn set_level(&mut self, level: Level) -> &mut Self {
        self.level_name = level.as_str().to_string();
        self
    }

    pub fn set_include_nouns(&mut self, nouns: impl Into<String>) -> &mut Self {
        self.include_nouns = nouns.into();
        self
    }

    pub fn set_exclude_nouns(&mut self, nouns: impl Into<String>) -> &mut Self {
        self.exclude_nouns = nouns.into();
        self
    }

    pub fn set_exclude_bypass_level_name(&mut self, level_name: impl Into<String>) -> &mut Self {
        self.exclude_bypass_level_name = level_name.into();
        self
    }
}

impl ConfigurationProvider for StaticConfigurationProvider {
    fn format(&self) -> String {
        self.format.clone()
    }

    fn default_adapter_name(&self) -> String {
        self.default_adapter_name.clone()
    }

    fn level_name(&self) -> String {
        self.level_name.clone()
    }

    fn include_nouns(&self) -> String {
        self.include_nouns.clone()
    }

    fn exclude_nouns(&self) -> String {
        self.exclude_nouns.clone()
    }

    fn exclude_bypass_level_name(&self) -> String {
        self.exclude_bypass_level_name.clone()
    }
}

/// 配置文件中的日志设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub format: String,
    pub default_adapter_name: String,
    pub level_name: String,
    pub include_nouns: String,
    pub exclude_nouns: String,
    pub exclude_bypass_level_name: String,
}

/// 配置文件提供者
///
/// 按扩展名识别 TOML/JSON/YAML 文件，`NOUNLOG_` 前缀的环境变量优先级更高。
#[derive(Debug, Clone, Default)]
pub struct FileConfigurationProvider {
    settings: LogSettings,
}

impl FileConfigurationProvider {
    /// 从配置文件加载
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LogError::provider(format!(
                "配置文件不存在: {}",
                path.display()
            )));
        }

        let mut config = Config::builder();

        // 1. 默认值
        config = config.add_source(Config::try_from(&LogSettings::default())?);

        // 2. 配置文件
        config = config.add_source(File::from(path));

        // 3. 环境变量（优先级最高）
        config = config.add_source(Environment::with_prefix(FILE_ENV_PREFIX).prefix_separator("_"));

        let settings: LogSettings = config.build()?.try_deserialize()?;

        info!(path = %path.display(), "已从配置文件读取日志设置");

        Ok(Self { settings })
    }

    /// 直接使用已有设置
    pub fn from_settings(settings: LogSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }
}

impl ConfigurationProvider for FileConfigurationProvider {
    fn format(&self) -> String {
        self.settings.format.clone()
    }

    fn default_adapter_name(&self) -> String {
        self.settings.default_adapter_name.clone()
    }

    fn level_name(&self) -> String {
        self.settings.level_name.clone()
    }

    fn include_nouns(&self) -> String {
        self.settings.include_nouns.clone()
    }

    fn exclude_nouns(&self) -> String {
        self.settings.exclude_nouns.clone()
    }

    fn exclude_bypass_level_name(&self) -> String {
        self.settings.exclude_bypass_level_name.clone()
    }
}
