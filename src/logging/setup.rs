// 日志系统设置
// 为使用 TracingAdapter 的程序安装 tracing 订阅器

use crate::adapters::TracingAdapter;
use crate::config::{ConfigValidator, SubscriberConfig};
use crate::errors::LogError;
use crate::logging::LoggingContext;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// tracing 订阅器安装器
pub struct LoggingSetup;

impl LoggingSetup {
    /// 安装全局 tracing 订阅器
    ///
    /// 每个进程只能成功一次，之后的调用返回 `LogError::Subscriber`。
    pub fn init(config: &SubscriberConfig) -> Result<(), LogError> {
        ConfigValidator::validate_subscriber(config)?;

        let builder = tracing_subscriber::fmt()
            .with_env_filter(Self::env_filter(config))
            .with_target(true);

        let subscriber: Box<dyn Subscriber + Send + Sync> = match config.format.as_str() {
            "json" => Box::new(builder.json().with_thread_names(true).finish()),
            "pretty" => Box::new(builder.pretty().finish()),
            "compact" => Box::new(builder.compact().finish()),
            _ => Box::new(builder.with_thread_ids(true).finish()),
        };

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| LogError::subscriber(e.to_string()))?;

        tracing::debug!(level = %config.level, format = %config.format, "tracing 订阅器已安装");
        Ok(())
    }

    /// 安装订阅器，并把 TracingAdapter 以指定名称注册到上下文
    ///
    /// 订阅器安装失败时不注册适配器。
    pub fn init_with_adapter(
        config: &SubscriberConfig,
        context: &LoggingContext,
        adapter_name: &str,
    ) -> Result<(), LogError> {
        Self::init(config)?;
        context.register_adapter(adapter_name, Arc::new(TracingAdapter::new()))
    }

    /// 构造环境过滤器，RUST_LOG 优先
    pub fn env_filter(config: &SubscriberConfig) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}
