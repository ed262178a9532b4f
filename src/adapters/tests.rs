// 日志适配器测试

#[cfg(test)]
mod tests {
    use crate::adapters::*;
    use crate::errors::LogError;
    use crate::logging::{CallContext, LogContext};
    use nounlog_common::Level;
    use std::sync::Arc;

    fn lc(level: Level) -> LogContext<'static> {
        LogContext {
            noun: "adapterTest",
            level,
            exclude_bypass: false,
            call: None,
        }
    }

    #[test]
    fn test_first_registered_becomes_default() {
        let mut registry = AdapterRegistry::new();
        assert_eq!(registry.default_name(), "");

        registry.register("first", Arc::new(CaptureAdapter::new())).unwrap();
        registry.register("second", Arc::new(CaptureAdapter::new())).unwrap();

        assert_eq!(registry.default_name(), "first");
        assert_eq!(registry.names(), vec!["first", "second"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_explicit_default_independent_of_order() {
        let mut registry = AdapterRegistry::new();
        registry.set_default_name("later");

        registry.register("early", Arc::new(CaptureAdapter::new())).unwrap();
        assert_eq!(registry.default_name(), "later");
        assert!(registry.get("later").is_none());

        registry.register("later", Arc::new(CaptureAdapter::new())).unwrap();
        assert!(registry.get("later").is_some());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = AdapterRegistry::new();
        let original = Arc::new(CaptureAdapter::new());
        registry.register("capture", original.clone()).unwrap();

        let err = registry
            .register("capture", Arc::new(CaptureAdapter::new()))
            .unwrap_err();
        assert!(matches!(err, LogError::AdapterAlreadyRegistered { ref name } if name == "capture"));

        // 原有实例保持不变
        registry
            .get("capture")
            .unwrap()
            .info(&lc(Level::Info), "still original")
            .unwrap();
        assert_eq!(original.len(), 1);
    }

    #[test]
    fn test_clear_resets_default() {
        let mut registry = AdapterRegistry::new();
        registry.register("a", Arc::new(CaptureAdapter::new())).unwrap();

        registry.clear();

        assert!(registry.is_empty());
        assert!(!registry.contains("a"));
        assert_eq!(registry.default_name(), "");

        registry.register("b", Arc::new(CaptureAdapter::new())).unwrap();
        assert_eq!(registry.default_name(), "b");
    }

    #[test]
    fn test_dispatch_routes_by_level() {
        let capture = CaptureAdapter::new();

        for level in Level::ALL {
            capture.dispatch(level, &lc(level), level.as_str()).unwrap();
        }

        let entries = capture.entries();
        assert_eq!(entries.len(), 4);
        for (entry, level) in entries.iter().zip(Level::ALL) {
            assert_eq!(entry.level, level);
            assert_eq!(entry.message, level.as_str());
            assert_eq!(entry.noun, "adapterTest");
        }
    }

    #[test]
    fn test_capture_adapter_failure_mode() {
        let capture = CaptureAdapter::new();
        capture.fail_with(Some("sink closed"));

        let err = capture.error(&lc(Level::Error), "lost").unwrap_err();
        assert_eq!(err.to_string(), "sink closed");
        assert!(capture.is_empty());

        capture.fail_with(None);
        capture.error(&lc(Level::Error), "kept").unwrap();
        assert_eq!(capture.last().unwrap().message, "kept");

        capture.clear();
        assert!(capture.is_empty());
    }

    #[test]
    fn test_capture_adapter_records_trace_id() {
        let capture = CaptureAdapter::new();
        let call = CallContext::new().with_trace_id("trace-1");
        let context = LogContext {
            noun: "adapterTest",
            level: Level::Warning,
            exclude_bypass: true,
            call: Some(&call),
        };

        capture.warning(&context, "w").unwrap();

        let entry = capture.last().unwrap();
        assert_eq!(entry.trace_id.as_deref(), Some("trace-1"));
        assert!(entry
            .call_fields
            .iter()
            .any(|(k, v)| k == "trace_id" && v == "trace-1"));
        assert!(entry.exclude_bypass);

        TracingAdapter::new().warning(&context, "w").unwrap();
        assert!(capture.triggered(Level::Warning));
        assert!(!capture.triggered(Level::Debug));
    }

    #[test]
    fn test_capture_adapter_ids_are_unique() {
        assert_ne!(CaptureAdapter::new().id(), CaptureAdapter::new().id());
    }

    #[test]
    fn test_console_adapter_targets() {
        assert_eq!(ConsoleAdapter::new().target(), ConsoleTarget::Stderr);
        assert_eq!(ConsoleAdapter::stdout().target(), ConsoleTarget::Stdout);

        ConsoleAdapter::new()
            .info(&lc(Level::Info), "console adapter test")
            .unwrap();
    }

    #[test]
    fn test_tracing_adapter_dispatch() {
        let adapter = TracingAdapter::new();

        for level in Level::ALL {
            adapter.dispatch(level, &lc(level), "tracing adapter test").unwrap();
        }
    }
}
