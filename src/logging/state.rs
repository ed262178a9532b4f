// 日志门面运行时状态
// 将配置状态、名词过滤集合与适配器注册表收拢到一个显式对象中

use crate::adapters::{AdapterRegistry, LogAdapter};
use crate::config::{
    ConfigSnapshot, ConfigState, ConfigValidator, ConfigurationProvider,
    EnvironmentConfigurationProvider,
};
use crate::errors::LogError;
use crate::logging::{FilterSet, Template};
use nounlog_common::Level;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 进程级默认上下文，首次使用时从环境变量加载配置
static GLOBAL: Lazy<Arc<LoggingContext>> = Lazy::new(|| {
    let context = LoggingContext::new();
    if let Err(e) = context.load_configuration(&EnvironmentConfigurationProvider::new()) {
        error!(error = %e, "从环境变量加载日志配置失败");
    }
    Arc::new(context)
});

/// 日志器绑定结果：适配器、级别阈值与编译后的模板
#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) adapter_name: String,
    pub(crate) adapter: Option<Arc<dyn LogAdapter>>,
    pub(crate) threshold: Level,
    pub(crate) template: Template,
}

/// 日志上下文
///
/// 各部分分别由读写锁保护，配置变更与日志器（重新）绑定之间不会观察到半更新的状态。
#[derive(Debug, Default)]
pub struct LoggingContext {
    config: RwLock<ConfigState>,
    filters: RwLock<FilterSet>,
    adapters: RwLock<AdapterRegistry>,
}

impl LoggingContext {
    /// 创建尚未加载配置的上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建上下文并立即从提供者加载配置
    pub fn from_provider(provider: &dyn ConfigurationProvider) -> Result<Self, LogError> {
        let context = Self::new();
        context.load_configuration(provider)?;
        Ok(context)
    }

    /// 进程级默认上下文
    pub fn global() -> Arc<LoggingContext> {
        Arc::clone(&GLOBAL)
    }

    pub(crate) fn global_ref() -> &'static LoggingContext {
        &GLOBAL
    }

    /// 进程级上下文是否已经初始化
    pub fn is_global_initialized() -> bool {
        Lazy::get(&GLOBAL).is_some()
    }

    /// 从提供者加载配置
    ///
    /// 级别名称先行校验，任何一个无效都会使本次加载整体失败且不修改状态。
    pub fn load_configuration(&self, provider: &dyn ConfigurationProvider) -> Result<(), LogError> {
        let level = ConfigValidator::validate_level_name(&provider.level_name())?;
        let bypass_level =
            ConfigValidator::validate_bypass_level_name(&provider.exclude_bypass_level_name())?;
        let include_nouns = ConfigValidator::split_nouns(&provider.include_nouns());
        let exclude_nouns = ConfigValidator::split_nouns(&provider.exclude_nouns());
        let format = provider.format();
        let default_adapter_name = provider.default_adapter_name();

        let mut config = self.config.write();
        let mut filters = self.filters.write();
        let mut adapters = self.adapters.write();

        if !format.is_empty() {
            config.format = format;
        }

        if let Some(level) = level {
            config.level = level;
        }

        if !default_adapter_name.is_empty() {
            adapters.set_default_name(default_adapter_name);
        }

        filters.replace_include(include_nouns);
        filters.replace_exclude(exclude_nouns);
        config.bypass_level = bypass_level;
        config.loaded = true;

        debug!(
            level = %config.level,
            default_adapter = %adapters.default_name(),
            include = %filters.include_csv(),
            exclude = %filters.exclude_csv(),
            "日志配置已加载"
        );

        Ok(())
    }

    /// 是否已加载过配置
    pub fn is_configuration_loaded(&self) -> bool {
        self.config.read().loaded
    }

    /// 保存当前配置
    pub fn snapshot(&self) -> ConfigSnapshot {
        let config = self.config.read();
        let filters = self.filters.read();
        let adapters = self.adapters.read();

        ConfigSnapshot {
            format: config.format.clone(),
            default_adapter_name: adapters.default_name().to_string(),
            level: config.level,
            include_nouns: filters.include_csv(),
            exclude_nouns: filters.exclude_csv(),
            bypass_level: config.bypass_level,
            loaded: config.loaded,
        }
    }

    /// 恢复先前保存的配置（不影响已注册的适配器）
    pub fn restore(&self, snapshot: &ConfigSnapshot) {
        let mut config = self.config.write();
        let mut filters = self.filters.write();
        let mut adapters = self.adapters.write();

        config.format = snapshot.format.clone();
        config.level = snapshot.level;
        config.bypass_level = snapshot.bypass_level;
        config.loaded = snapshot.loaded;
        filters.replace_include(ConfigValidator::split_nouns(&snapshot.include_nouns));
        filters.replace_exclude(ConfigValidator::split_nouns(&snapshot.exclude_nouns));
        adapters.set_default_name(snapshot.default_adapter_name.clone());
    }

    /// 配置转储，便于排查
    pub fn config_dump(&self) -> String {
        self.snapshot().to_string()
    }

    pub fn format(&self) -> String {
        self.config.read().format.clone()
    }

    /// 直接设置格式，校验推迟到日志器绑定时
    pub fn set_format(&self, format: impl Into<String>) {
        self.config.write().format = format.into();
    }

    pub fn level(&self) -> Level {
        self.config.read().level
    }

    pub fn set_level(&self, level: Level) {
        self.config.write().level = level;
    }

    pub fn bypass_level(&self) -> Option<Level> {
        self.config.read().bypass_level
    }

    pub fn set_bypass_level(&self, level: Option<Level>) {
        self.config.write().bypass_level = level;
    }

    pub fn add_include_filter(&self, noun: impl Into<String>) {
        self.filters.write().add_include(noun);
    }

    pub fn remove_include_filter(&self, noun: &str) {
        self.filters.write().remove_include(noun);
    }

    pub fn add_exclude_filter(&self, noun: impl Into<String>) {
        self.filters.write().add_exclude(noun);
    }

    pub fn remove_exclude_filter(&self, noun: &str) {
        self.filters.write().remove_exclude(noun);
    }

    pub fn clear_filters(&self) {
        self.filters.write().clear();
    }

    /// 当前过滤集合的副本
    pub fn filters(&self) -> FilterSet {
        self.filters.read().clone()
    }

    /// 名词是否通过过滤
    pub fn allow(&self, noun: &str) -> bool {
        self.filters.read().allow(noun)
    }

    /// 注册适配器
    pub fn register_adapter(
        &self,
        name: impl Into<String>,
        adapter: Arc<dyn LogAdapter>,
    ) -> Result<(), LogError> {
        self.adapters.write().register(name, adapter)
    }

    /// 清空适配器并重置默认名称
    pub fn clear_adapters(&self) {
        self.adapters.write().clear();
    }

    pub fn adapter(&self, name: &str) -> Option<Arc<dyn LogAdapter>> {
        self.adapters.read().get(name)
    }

    pub fn adapter_names(&self) -> Vec<String> {
        self.adapters.read().names()
    }

    pub fn default_adapter_name(&self) -> String {
        self.adapters.read().default_name().to_string()
    }

    pub fn set_default_adapter_name(&self, name: impl Into<String>) {
        self.adapters.write().set_default_name(name);
    }

    /// 从当前配置推导日志器绑定
    ///
    /// 未指定适配器名称时使用默认适配器。找不到适配器不算错误，
    /// 日志器退化为静默空操作。
    pub(crate) fn resolve_binding(&self, adapter_name: Option<&str>) -> Result<Binding, LogError> {
        let config = self.config.read();
        if !config.loaded {
            return Err(LogError::ConfigurationNotLoaded);
        }

        let adapters = self.adapters.read();
        let adapter_name = adapter_name
            .unwrap_or_else(|| adapters.default_name())
            .to_string();
        let adapter = adapters.get(&adapter_name);
        if adapter.is_none() {
            warn!(adapter = %adapter_name, "找不到日志适配器，日志器将不输出任何内容");
        }

        let template = ConfigValidator::validate_format(&config.format)?;

        Ok(Binding {
            adapter_name,
            adapter,
            threshold: config.level,
            template,
        })
    }
}
