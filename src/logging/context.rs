// 日志上下文管理

use nounlog_common::Level;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 调用方上下文
///
/// 核心逻辑从不读取其内容，只原样传递给适配器（例如用于追踪关联）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallContext {
    pub trace_id: String,
    pub request_id: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

impl CallContext {
    /// 创建新的调用上下文
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            request_id: None,
            attributes: BTreeMap::new(),
            start_time: chrono::Utc::now(),
        }
    }

    /// 沿用已有的追踪 ID
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// 设置请求 ID
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// 附加自定义属性
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// 获取持续时间
    pub fn duration(&self) -> chrono::Duration {
        chrono::Utc::now() - self.start_time
    }

    /// 转换为日志字段
    pub fn to_log_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("trace_id".to_string(), self.trace_id.clone()),
            ("start_time".to_string(), self.start_time.to_rfc3339()),
            (
                "elapsed_ms".to_string(),
                self.duration().num_milliseconds().to_string(),
            ),
        ];

        if let Some(ref request_id) = self.request_id {
            fields.push(("request_id".to_string(), request_id.clone()));
        }

        fields.extend(
            self.attributes
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        fields
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 模板渲染所用的消息上下文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageContext<'a> {
    pub noun: &'a str,
    pub level: Level,
    pub message: &'a str,
    /// 本应被排除的消息因级别足够高而放行
    pub exclude_bypass: bool,
}

/// 传递给适配器的日志上下文
#[derive(Debug, Clone, Copy)]
pub struct LogContext<'a> {
    pub noun: &'a str,
    pub level: Level,
    pub exclude_bypass: bool,
    pub call: Option<&'a CallContext>,
}

impl<'a> LogContext<'a> {
    /// 调用方传入的追踪 ID
    pub fn trace_id(&self) -> Option<&'a str> {
        self.call.map(|call| call.trace_id.as_str())
    }

    /// 调用方上下文展开后的字段，没有上下文时为空
    pub fn call_fields(&self) -> Vec<(String, String)> {
        self.call.map(CallContext::to_log_fields).unwrap_or_default()
    }
}
