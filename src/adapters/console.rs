// 控制台适配器

use crate::adapters::LogAdapter;
use crate::logging::LogContext;
use std::io::{self, Write};

/// 控制台输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

/// 将每条消息加上时间戳后逐行写到控制台
#[derive(Debug, Clone, Default)]
pub struct ConsoleAdapter {
    target: ConsoleTarget,
}

impl ConsoleAdapter {
    /// 创建写入标准错误的控制台适配器
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建写入标准输出的控制台适配器
    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
        }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn write_line(&self, message: &str) -> anyhow::Result<()> {
        let timestamp = chrono::Local::now().format("%Y/%m/%d %H:%M:%S");
        match self.target {
            ConsoleTarget::Stderr => writeln!(io::stderr().lock(), "{} {}", timestamp, message)?,
            ConsoleTarget::Stdout => writeln!(io::stdout().lock(), "{} {}", timestamp, message)?,
        }
        Ok(())
    }
}

impl LogAdapter for ConsoleAdapter {
    fn debug(&self, _lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        self.write_line(message)
    }

    fn info(&self, _lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        self.write_line(message)
    }

    fn warning(&self, _lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        self.write_line(message)
    }

    fn error(&self, _lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        self.write_line(message)
    }
}
