// Nounlog Library
// 结构化日志门面：名词过滤、级别门控与可插拔适配器

pub mod config;
pub mod errors;
pub mod logging;
pub mod adapters;

pub use adapters::{AdapterRegistry, CaptureAdapter, ConsoleAdapter, LogAdapter, TracingAdapter};
pub use config::{
    ConfigSnapshot, ConfigurationProvider, EnvironmentConfigurationProvider,
    FileConfigurationProvider, StaticConfigurationProvider,
};
pub use errors::LogError;
pub use logging::{CallContext, FilterSet, LogContext, Logger, LoggerState, LoggingContext};
pub use nounlog_common::{CommonError, Level};
