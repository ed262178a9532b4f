// 配置系统测试

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::errors::LogError;
    use crate::logging::LoggingContext;
    use nounlog_common::Level;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    const ENV_KEYS: [&str; 8] = [
        ENV_FORMAT,
        ENV_DEFAULT_ADAPTER_NAME,
        ENV_LEGACY_ADAPTER_NAME,
        ENV_LEVEL_NAME,
        ENV_INCLUDE_NOUNS,
        ENV_EXCLUDE_NOUNS,
        ENV_EXCLUDE_BYPASS_LEVEL_NAME,
        "NOUNLOG_LEVEL_NAME",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    fn loaded_context() -> LoggingContext {
        let mut provider = StaticConfigurationProvider::new();
        provider
            .set_format("{{.Message}}")
            .set_default_adapter_name("console")
            .set_level(Level::Warning)
            .set_include_nouns("db,cache")
            .set_exclude_nouns("http")
            .set_exclude_bypass_level_name("error");
        LoggingContext::from_provider(&provider).unwrap()
    }

    #[test]
    fn test_default_state() {
        let context = LoggingContext::new();

        assert!(!context.is_configuration_loaded());
        assert_eq!(context.format(), DEFAULT_FORMAT);
        assert_eq!(context.level(), Level::Info);
        assert_eq!(context.bypass_level(), None);
        assert_eq!(context.default_adapter_name(), "");
    }

    #[test]
    fn test_load_applies_all_values() {
        let context = loaded_context();

        assert!(context.is_configuration_loaded());
        assert_eq!(context.format(), "{{.Message}}");
        assert_eq!(context.default_adapter_name(), "console");
        assert_eq!(context.level(), Level::Warning);
        assert_eq!(context.bypass_level(), Some(Level::Error));

        let filters = context.filters();
        assert_eq!(filters.include_csv(), "cache,db");
        assert_eq!(filters.exclude_csv(), "http");
    }

    #[test]
    fn test_empty_values_keep_previous_settings() {
        let context = loaded_context();

        context
            .load_configuration(&StaticConfigurationProvider::new())
            .unwrap();

        // 格式、默认适配器、级别保持原值
        assert_eq!(context.format(), "{{.Message}}");
        assert_eq!(context.default_adapter_name(), "console");
        assert_eq!(context.level(), Level::Warning);

        // 名词列表与绕过级别整体覆盖
        let filters = context.filters();
        assert!(!filters.use_include());
        assert!(!filters.use_exclude());
        assert_eq!(context.bypass_level(), None);
    }

    #[test]
    fn test_nouns_are_trimmed_and_replaced() {
        let context = loaded_context();

        let mut provider = StaticConfigurationProvider::new();
        provider.set_exclude_nouns(" worker , ,queue ");
        context.load_configuration(&provider).unwrap();

        let filters = context.filters();
        assert_eq!(filters.include_csv(), "");
        assert_eq!(filters.exclude_csv(), "queue,worker");
        assert!(!context.allow("worker"));
        assert!(context.allow("db"));
    }

    #[test]
    fn test_level_name_is_case_insensitive() {
        let mut provider = StaticConfigurationProvider::new();
        provider.set_level_name("DEBUG");
        assert_eq!(provider.level_name(), "debug");

        let context = LoggingContext::from_provider(&provider).unwrap();
        assert_eq!(context.level(), Level::Debug);
    }

    #[test]
    fn test_invalid_level_rejects_whole_load() {
        let context = loaded_context();
        let before = context.snapshot();

        let mut provider = StaticConfigurationProvider::new();
        provider
            .set_format("{{.Noun}}")
            .set_level_name("verbose")
            .set_exclude_nouns("other");

        let err = context.load_configuration(&provider).unwrap_err();
        assert!(matches!(err, LogError::InvalidLevelName { ref name } if name == "verbose"));
        assert_eq!(context.snapshot(), before);
    }

    #[test]
    fn test_invalid_bypass_level_is_rejected() {
        let context = LoggingContext::new();

        let mut provider = StaticConfigurationProvider::new();
        provider.set_exclude_bypass_level_name("fatal");

        let err = context.load_configuration(&provider).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_BYPASS_LEVEL_NAME");
        assert!(!context.is_configuration_loaded());
    }

    #[test]
    fn test_snapshot_and_restore() {
        let context = loaded_context();
        let saved = context.snapshot();

        context.set_level(Level::Debug);
        context.set_format("{{.Noun}}");
        context.clear_filters();
        context.set_bypass_level(None);
        context.set_default_adapter_name("other");

        context.restore(&saved);

        assert_eq!(context.snapshot(), saved);
        assert!(!context.allow("http"));
    }

    #[test]
    fn test_snapshot_json() {
        let json = loaded_context().snapshot().to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["level"], "warning");
        assert_eq!(value["bypass_level"], "error");
        assert_eq!(value["include_nouns"], "cache,db");
    }

    #[test]
    fn test_config_dump() {
        let dump = loaded_context().config_dump();

        assert_eq!(
            dump,
            "Current configuration:\n  FORMAT=[{{.Message}}]\n  DEFAULT-ADAPTER-NAME=[console]\n  LEVEL-NAME=[warning]\n  INCLUDE-NOUNS=[cache,db]\n  EXCLUDE-NOUNS=[http]\n  EXCLUDE-BYPASS-LEVEL-NAME=[error]"
        );
    }

    #[test]
    fn test_config_dump_without_bypass() {
        let dump = LoggingContext::new().config_dump();
        assert!(dump.ends_with("EXCLUDE-BYPASS-LEVEL-NAME=[]"));
    }

    #[test]
    #[serial]
    fn test_environment_provider() {
        clear_env();
        unsafe {
            env::set_var(ENV_FORMAT, "{{.Noun}} {{.Message}}");
            env::set_var(ENV_DEFAULT_ADAPTER_NAME, "console");
            env::set_var(ENV_LEVEL_NAME, "Error");
            env::set_var(ENV_INCLUDE_NOUNS, "db");
            env::set_var(ENV_EXCLUDE_NOUNS, "http,cache");
            env::set_var(ENV_EXCLUDE_BYPASS_LEVEL_NAME, "warning");
        }

        let context = LoggingContext::from_provider(&EnvironmentConfigurationProvider::new()).unwrap();

        assert_eq!(context.format(), "{{.Noun}} {{.Message}}");
        assert_eq!(context.default_adapter_name(), "console");
        assert_eq!(context.level(), Level::Error);
        assert_eq!(context.filters().include_csv(), "db");
        assert_eq!(context.filters().exclude_csv(), "cache,http");
        assert_eq!(context.bypass_level(), Some(Level::Warning));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_environment_provider_legacy_adapter_name() {
        clear_env();
        unsafe {
            env::set_var(ENV_LEGACY_ADAPTER_NAME, "legacy");
        }

        let provider = EnvironmentConfigurationProvider::new();
        assert_eq!(provider.default_adapter_name(), "legacy");

        unsafe {
            env::set_var(ENV_DEFAULT_ADAPTER_NAME, "current");
        }
        assert_eq!(provider.default_adapter_name(), "current");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_environment_provider_unset_is_empty() {
        clear_env();

        let provider = EnvironmentConfigurationProvider::new();
        assert_eq!(provider.format(), "");
        assert_eq!(provider.level_name(), "");

        let context = LoggingContext::from_provider(&provider).unwrap();
        assert_eq!(context.format(), DEFAULT_FORMAT);
        assert_eq!(context.level(), DEFAULT_LEVEL);
    }

    #[test]
    #[serial]
    fn test_file_provider() {
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
format = "{{{{.Level}}}} {{{{.Message}}}}"
level_name = "debug"
exclude_nouns = "http"
"#
        )
        .unwrap();

        let provider = FileConfigurationProvider::from_path(file.path()).unwrap();
        assert_eq!(provider.format(), "{{.Level}} {{.Message}}");
        assert_eq!(provider.default_adapter_name(), "");

        let context = LoggingContext::from_provider(&provider).unwrap();
        assert_eq!(context.level(), Level::Debug);
        assert!(!context.allow("http"));
    }

    #[test]
    #[serial]
    fn test_file_provider_environment_override() {
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "level_name = \"debug\"").unwrap();

        unsafe {
            env::set_var("NOUNLOG_LEVEL_NAME", "error");
        }

        let provider = FileConfigurationProvider::from_path(file.path()).unwrap();
        assert_eq!(provider.level_name(), "error");

        clear_env();
    }

    #[test]
    fn test_file_provider_missing_file() {
        let err = FileConfigurationProvider::from_path("/nonexistent/nounlog.toml").unwrap_err();
        assert_eq!(err.error_code(), "PROVIDER_ERROR");
    }

    #[test]
    fn test_file_provider_from_settings() {
        let provider = FileConfigurationProvider::from_settings(LogSettings {
            include_nouns: "db".to_string(),
            ..Default::default()
        });

        assert_eq!(provider.settings().include_nouns, "db");
        assert_eq!(provider.include_nouns(), "db");
        assert_eq!(provider.exclude_bypass_level_name(), "");
    }

    #[test]
    fn test_split_nouns() {
        assert_eq!(ConfigValidator::split_nouns(""), Vec::<String>::new());
        assert_eq!(ConfigValidator::split_nouns("a, b ,,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_validate_format() {
        assert!(matches!(
            ConfigValidator::validate_format("").unwrap_err(),
            LogError::FormatEmpty
        ));
        assert!(ConfigValidator::validate_format("{{.Unknown}}").is_err());
        assert!(ConfigValidator::validate_format(DEFAULT_FORMAT).is_ok());
    }

    #[test]
    fn test_validate_level_names() {
        assert_eq!(ConfigValidator::validate_level_name("").unwrap(), None);
        assert_eq!(
            ConfigValidator::validate_level_name("Info").unwrap(),
            Some(Level::Info)
        );
        assert!(ConfigValidator::validate_level_name("trace").is_err());
        assert_eq!(ConfigValidator::validate_bypass_level_name("  ").unwrap(), None);
    }

    #[test]
    fn test_validate_subscriber() {
        assert!(ConfigValidator::validate_subscriber(&SubscriberConfig::default()).is_ok());

        let invalid_level = SubscriberConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ConfigValidator::validate_subscriber(&invalid_level)
                .unwrap_err()
                .error_code(),
            "SUBSCRIBER_ERROR"
        );

        let invalid_format = SubscriberConfig {
            format: "xml".to_string(),
            ..Default::default()
        };
        assert!(ConfigValidator::validate_subscriber(&invalid_format).is_err());
    }
}
