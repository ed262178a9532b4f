// 捕获适配器
// 将分发到的消息保存在内存中，供测试与诊断使用

use crate::adapters::LogAdapter;
use crate::logging::LogContext;
use nounlog_common::Level;
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

/// 一条被捕获的日志
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedEntry {
    pub level: Level,
    pub noun: String,
    pub message: String,
    pub exclude_bypass: bool,
    pub trace_id: Option<String>,
    /// 调用方上下文字段
    pub call_fields: Vec<(String, String)>,
}

/// 内存捕获适配器
#[derive(Debug)]
pub struct CaptureAdapter {
    id: Uuid,
    entries: Mutex<Vec<CapturedEntry>>,
    fail_with: Mutex<Option<String>>,
}

impl CaptureAdapter {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            entries: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
        }
    }

    /// 实例标识，用于区分不同的适配器实例
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 已捕获的全部日志
    pub fn entries(&self) -> Vec<CapturedEntry> {
        self.entries.lock().clone()
    }

    /// 指定级别是否收到过消息
    pub fn triggered(&self, level: Level) -> bool {
        self.entries.lock().iter().any(|entry| entry.level == level)
    }

    /// 最近一条日志
    pub fn last(&self) -> Option<CapturedEntry> {
        self.entries.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// 之后的每次写出都返回指定错误；传入 None 恢复正常
    pub fn fail_with(&self, message: Option<&str>) {
        *self.fail_with.lock() = message.map(str::to_string);
    }

    fn record(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        if let Some(ref reason) = *self.fail_with.lock() {
            anyhow::bail!("{}", reason);
        }

        self.entries.lock().push(CapturedEntry {
            level: lc.level,
            noun: lc.noun.to_string(),
            message: message.to_string(),
            exclude_bypass: lc.exclude_bypass,
            trace_id: lc.trace_id().map(str::to_string),
            call_fields: lc.call_fields(),
        });

        Ok(())
    }
}

impl Default for CaptureAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAdapter for CaptureAdapter {
    fn debug(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        self.record(lc, message)
    }

    fn info(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        self.record(lc, message)
    }

    fn warning(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        self.record(lc, message)
    }

    fn error(&self, lc: &LogContext<'_>, message: &str) -> anyhow::Result<()> {
        self.record(lc, message)
    }
}
