//! Integration tests for logging system

use core_runtime::logging::{redact_if_sensitive, LogFormat, LogLevel, LoggingConfig};

#[test]
fn test_logging_initialization() {
    // Logging can only be initialized once per process, so only the config
    // builder is exercised here.
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Debug)
        .with_spans(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Debug);
    assert!(config.enable_spans);
}

#[test]
fn test_pii_redaction_tokens() {
    assert_eq!(
        redact_if_sensitive("access_token", "AT_EXPIRED"),
        "[REDACTED]"
    );
    assert_eq!(
        redact_if_sensitive("refresh_token", "RT_VALID"),
        "[REDACTED]"
    );
    assert_eq!(redact_if_sensitive("client_secret", "s1"), "[REDACTED]");
}

#[test]
fn test_pii_redaction_emails() {
    let redacted = redact_if_sensitive("email", "user@example.com");

    assert!(redacted.starts_with('u'));
    assert!(redacted.contains("[REDACTED]"));
    assert!(!redacted.contains("example.com"));
}

#[test]
fn test_pii_redaction_normal_values() {
    assert_eq!(redact_if_sensitive("profile_id", "12345"), "12345");
    assert_eq!(redact_if_sensitive("contact_count", "3"), "3");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[cfg(not(debug_assertions))]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
    }
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_filter("provider_podio=trace")
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(config.filter.as_deref(), Some("provider_podio=trace"));
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
}
