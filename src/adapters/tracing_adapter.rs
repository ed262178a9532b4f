// tracing 适配器
// 将门面的消息转交给 tracing 生态（订阅器、JSON 输出等）

use crate::adapters::LogAdapter;
use crate::logging::LogContext;

/// 委托给 `tracing` 宏的适配器
///
/// 事件目标固定为 `nounlog`，并附带 `noun`、`exclude_bypass`、`trace_id`，
/// 调用方上下文的其余字段放在 `call` 中。订阅器需由应用自行安装
/// （见 [`crate::logging::LoggingSetup`]）。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAdapter;

impl TracingAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl LogAdapter for TracingAdapter {
    fn debug(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        tracing::debug!(
            target: "nounlog",
            noun = %lc.noun,
            exclude_bypass = lc.exclude_bypass,
            trace_id = ?lc.trace_id(),
            call = ?lc.call_fields(),
            "{}",
            message
        );
        Ok(())
    }

    fn info(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        tracing::info!(
            target: "nounlog",
            noun = %lc.noun,
            exclude_bypass = lc.exclude_bypass,
            trace_id = ?lc.trace_id(),
            call = ?lc.call_fields(),
            "{}",
            message
        );
        Ok(())
    }

    fn warning(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        tracing::warn!(
            target: "nounlog",
            noun = %lc.noun,
            exclude_bypass = lc.exclude_bypass,
            trace_id = ?lc.trace_id(),
            call = ?lc.call_fields(),
            "{}",
            message
        );
        Ok(())
    }

    fn error(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        tracing::error!(
            target: "nounlog",
            noun = %lc.noun,
            exclude_bypass = lc.exclude_bypass,
            trace_id = ?lc.trace_id(),
            call = ?lc.call_fields(),
            "{}",
            message
        );
        Ok(())
    }
}
