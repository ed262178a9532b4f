// 日志器
// 每个名词一个实例，首次使用时惰性绑定适配器、级别阈值与格式模板

use crate::adapters::LogAdapter;
use crate::errors::LogError;
use crate::logging::state::Binding;
use crate::logging::{CallContext, LogContext, LoggingContext, MessageContext};
use nounlog_common::Level;
use parking_lot::RwLock;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::{self, Write};
use std::sync::Arc;
use tracing::debug;

/// 日志器绑定状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    Unconfigured,
    Configured,
}

/// 名词日志器
///
/// 通常作为子系统的长生命周期值持有。创建时不读取任何配置，
/// 因此可以在适配器注册、配置加载之前构造。
/// 未指定上下文时，首次绑定才会用到进程级上下文。
pub struct Logger {
    noun: String,
    adapter_name: Option<String>,
    context: Option<Arc<LoggingContext>>,
    binding: RwLock<Option<Arc<Binding>>>,
}

impl Logger {
    /// 使用进程级上下文和默认适配器创建日志器
    pub fn new(noun: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            adapter_name: None,
            context: None,
            binding: RwLock::new(None),
        }
    }

    /// 在指定的日志上下文中创建日志器
    pub fn in_context(context: Arc<LoggingContext>, noun: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            adapter_name: None,
            context: Some(context),
            binding: RwLock::new(None),
        }
    }

    /// 绑定到指定名称的适配器
    pub fn with_adapter_name(mut self, adapter_name: impl Into<String>) -> Self {
        self.adapter_name = Some(adapter_name.into());
        *self.binding.get_mut() = None;
        self
    }

    /// 使用独立的日志上下文
    pub fn with_context(mut self, context: Arc<LoggingContext>) -> Self {
        self.context = Some(context);
        *self.binding.get_mut() = None;
        self
    }

    pub fn noun(&self) -> &str {
        &self.noun
    }

    /// 显式指定的适配器名称；None 表示使用默认适配器
    pub fn adapter_name(&self) -> Option<&str> {
        self.adapter_name.as_deref()
    }

    /// 实际使用的日志上下文
    pub fn context(&self) -> &LoggingContext {
        match self.context.as_deref() {
            Some(context) => context,
            None => LoggingContext::global_ref(),
        }
    }

    /// 是否显式指定了日志上下文
    pub fn has_own_context(&self) -> bool {
        self.context.is_some()
    }

    pub fn state(&self) -> LoggerState {
        if self.binding.read().is_some() {
            LoggerState::Configured
        } else {
            LoggerState::Unconfigured
        }
    }

    /// 当前绑定的适配器
    pub fn adapter(&self) -> Option<Arc<dyn LogAdapter>> {
        self.binding
            .read()
            .as_ref()
            .and_then(|binding| binding.adapter.clone())
    }

    /// 当前绑定的级别阈值
    pub fn threshold(&self) -> Option<Level> {
        self.binding.read().as_ref().map(|binding| binding.threshold)
    }

    /// 未绑定时执行绑定，已绑定则不做任何事
    pub fn ensure_configured(&self) -> Result<(), LogError> {
        self.do_configure(false)
    }

    /// 从当前全局状态重新推导绑定
    pub fn reconfigure(&self) -> Result<(), LogError> {
        self.do_configure(true)
    }

    /// 绑定适配器、级别阈值和格式模板
    ///
    /// 失败时保留原有绑定。
    pub fn do_configure(&self, force: bool) -> Result<(), LogError> {
        self.configure(force).map(|_| ())
    }

    fn configure(&self, force: bool) -> Result<Arc<Binding>, LogError> {
        let mut slot = self.binding.write();
        if !force {
            if let Some(binding) = slot.as_ref() {
                return Ok(Arc::clone(binding));
            }
        }

        let binding = Arc::new(self.context().resolve_binding(self.adapter_name.as_deref())?);
        debug!(
            noun = %self.noun,
            adapter = %binding.adapter_name,
            level = %binding.threshold,
            "日志器已绑定"
        );

        *slot = Some(Arc::clone(&binding));
        Ok(binding)
    }

    fn bound(&self) -> Result<Arc<Binding>, LogError> {
        if let Some(binding) = self.binding.read().as_ref() {
            return Ok(Arc::clone(binding));
        }

        self.configure(false)
    }

    /// 过滤并分发一条消息
    ///
    /// 返回 `Some(渲染结果)` 表示消息通过了级别与名词过滤；没有绑定适配器时同样返回渲染结果，
    /// 但不产生任何输出。
    pub fn log(
        &self,
        level: Level,
        ctx: Option<&CallContext>,
        args: fmt::Arguments<'_>,
    ) -> Result<Option<String>, LogError> {
        self.log_with(level, ctx, || args.to_string())
    }

    fn log_with<F>(
        &self,
        level: Level,
        ctx: Option<&CallContext>,
        message: F,
    ) -> Result<Option<String>, LogError>
    where
        F: FnOnce() -> String,
    {
        let binding = self.bound()?;

        // 阈值比消息级别更严格，直接丢弃
        if binding.threshold > level {
            return Ok(None);
        }

        let context = self.context();
        let can_bypass = context
            .bypass_level()
            .is_some_and(|bypass| level >= bypass);

        let exclude_bypass = if context.allow(&self.noun) {
            false
        } else if can_bypass {
            true
        } else {
            return Ok(None);
        };

        let message = message();
        let rendered = binding.template.render(&MessageContext {
            noun: &self.noun,
            level,
            message: &message,
            exclude_bypass,
        });

        if let Some(adapter) = binding.adapter.as_ref() {
            let lc = LogContext {
                noun: &self.noun,
                level,
                exclude_bypass,
                call: ctx,
            };
            adapter
                .dispatch(level, &lc, &rendered)
                .map_err(|e| LogError::adapter(level, e))?;
        }

        Ok(Some(rendered))
    }

    pub fn debugf(&self, ctx: Option<&CallContext>, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Level::Debug, ctx, args).map(|_| ())
    }

    pub fn infof(&self, ctx: Option<&CallContext>, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Level::Info, ctx, args).map(|_| ())
    }

    pub fn warningf(&self, ctx: Option<&CallContext>, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Level::Warning, ctx, args).map(|_| ())
    }

    /// 记录错误，消息末尾附加错误原因链
    pub fn errorf(
        &self,
        ctx: Option<&CallContext>,
        err: &(dyn Error + 'static),
        args: fmt::Arguments<'_>,
    ) -> Result<(), LogError> {
        self.log_with(Level::Error, ctx, || merge_cause(err, args))
            .map(|_| ())
    }

    /// 仅在存在错误时记录
    pub fn error_iff(
        &self,
        ctx: Option<&CallContext>,
        err: Option<&(dyn Error + 'static)>,
        args: fmt::Arguments<'_>,
    ) -> Result<(), LogError> {
        match err {
            Some(err) => self.errorf(ctx, err, args),
            None => Ok(()),
        }
    }

    /// 记录错误后 panic
    pub fn panicf(
        &self,
        ctx: Option<&CallContext>,
        err: &(dyn Error + 'static),
        args: fmt::Arguments<'_>,
    ) -> ! {
        let message = merge_cause(err, args);
        match self.log_with(Level::Error, ctx, || message.clone()) {
            Ok(Some(rendered)) => panic!("{}", rendered),
            Ok(None) => panic!("{}", message),
            Err(log_err) => panic!("{}\n(日志输出失败: {})", message, log_err),
        }
    }

    /// 仅在存在错误时记录并 panic
    pub fn panic_iff(
        &self,
        ctx: Option<&CallContext>,
        err: Option<&(dyn Error + 'static)>,
        args: fmt::Arguments<'_>,
    ) {
        if let Some(err) = err {
            self.panicf(ctx, err, args);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("noun", &self.noun)
            .field("adapter_name", &self.adapter_name)
            .field("state", &self.state())
            .finish()
    }
}

/// 渲染错误及其原因链；启用 RUST_BACKTRACE 时附带调用栈
pub fn render_cause_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\n  caused by: {}", cause);
        source = cause.source();
    }

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(out, "\n{}", backtrace);
    }

    out
}

fn merge_cause(err: &(dyn Error + 'static), args: fmt::Arguments<'_>) -> String {
    let message = args.to_string();
    let chain = render_cause_chain(err);
    if message.is_empty() {
        chain
    } else {
        format!("{}\n{}", message, chain)
    }
}

/// 调试日志宏
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $ctx:expr, $($arg:tt)*) => {
        $logger.debugf($ctx, format_args!($($arg)*))
    };
}

/// 信息日志宏
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $ctx:expr, $($arg:tt)*) => {
        $logger.infof($ctx, format_args!($($arg)*))
    };
}

/// 警告日志宏
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $ctx:expr, $($arg:tt)*) => {
        $logger.warningf($ctx, format_args!($($arg)*))
    };
}

/// 错误日志宏，第三个参数为错误原因
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $ctx:expr, $err:expr, $($arg:tt)*) => {
        $logger.errorf($ctx, $err, format_args!($($arg)*))
    };
}
