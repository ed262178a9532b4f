// 配置验证器
// 在加载时校验级别名称与格式，未知名称立即拒绝

use crate::config::SubscriberConfig;
use crate::errors::LogError;
use crate::logging::Template;
use nounlog_common::Level;

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 校验日志级别名称，空字符串表示不修改
    pub fn validate_level_name(name: &str) -> Result<Option<Level>, LogError> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(Level::from_name(name)?))
    }

    /// 校验排除绕过级别名称，空字符串表示不启用绕过
    pub fn validate_bypass_level_name(name: &str) -> Result<Option<Level>, LogError> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        Level::from_name(name)
            .map(Some)
            .map_err(|_| LogError::invalid_bypass_level_name(name))
    }

    /// 校验格式字符串并编译
    pub fn validate_format(format: &str) -> Result<Template, LogError> {
        if format.is_empty() {
            return Err(LogError::FormatEmpty);
        }

        Template::compile(format)
    }

    /// 拆分逗号分隔的名词列表
    pub fn split_nouns(csv: &str) -> Vec<String> {
        csv.split(',')
            .map(str::trim)
            .filter(|noun| !noun.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 验证 tracing 订阅器配置
    pub fn validate_subscriber(config: &SubscriberConfig) -> Result<(), LogError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
            return Err(LogError::subscriber(format!(
                "无效的日志级别: {}，有效值: {:?}",
                config.level, valid_levels
            )));
        }

        let valid_formats = ["json", "pretty", "compact", "full"];
        if !valid_formats.contains(&config.format.as_str()) {
            return Err(LogError::subscriber(format!(
                "无效的日志格式: {}，有效值: {:?}",
                config.format, valid_formats
            )));
        }

        Ok(())
    }
}
