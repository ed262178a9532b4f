// 日志适配器模块
// 定义适配器契约、注册表以及内置的输出目标

pub mod registry;
pub mod console;
pub mod capture;
pub mod tracing_adapter;

#[cfg(test)]
mod tests;

pub use registry::*;
pub use console::*;
pub use capture::*;
pub use tracing_adapter::*;

use crate::logging::LogContext;
use nounlog_common::Level;

/// 日志适配器契约
///
/// 每个严重级别对应一个方法，接收日志上下文与渲染后的消息。这是唯一的扩展点，
/// 任何输出目标（控制台、网络、文件）都通过实现该 trait 接入。
pub trait LogAdapter: Send + Sync {
    fn debug(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()>;

    fn info(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()>;

    fn warning(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()>;

    fn error(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()>;

    /// 按级别分发到对应方法
    fn dispatch(&self, level: Level, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        match level {
            Level::Debug => self.debug(lc, message),
            Level::Info => self.info(lc, message),
            Level::Warning => self.warning(lc, message),
            Level::Error => self.error(lc, message),
        }
    }
}
