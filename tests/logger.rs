use log::{Level, Record};
use shared_datetime::config::LoggingConfig;
use shared_datetime::constants::LOG_FILE_NAME;
use shared_datetime::logger::Logger;
use std::fs;

fn logging(enabled: bool, level: &str) -> LoggingConfig {
    LoggingConfig {
        enabled,
        level: level.to_string(),
    }
}

#[test]
fn test_in_memory_logs_newest_first() {
    let logger = Logger::new();
    assert!(!logger.is_enabled());
    assert!(logger.log_file().is_none());

    logger.log("first".to_string());
    logger.log("second".to_string());

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].contains("second"));
    assert!(logs[1].contains("first"));

    logger.clear();
    assert!(logger.get_logs().is_empty());
}

#[test]
fn test_config_based_logging_disabled() {
    let logger = Logger::from_config(&logging(false, "debug")).unwrap();
    assert!(!logger.is_enabled());
    assert!(logger.log_file().is_none());
    assert_eq!(logger.level(), log::LevelFilter::Debug);
}

#[test]
fn test_config_based_logging_enabled() {
    if let Ok(logger) = Logger::from_config(&logging(true, "warn")) {
        assert!(logger.is_enabled());
        assert_eq!(logger.level(), log::LevelFilter::Warn);
        let path = logger.log_file().unwrap();
        assert!(path.ends_with(LOG_FILE_NAME));
    }
}

#[test]
fn test_invalid_level_is_rejected() {
    assert!(Logger::from_config(&logging(true, "chatty")).is_err());
}

#[test]
fn test_dispatch_writes_buffer_and_file() {
    let path = std::env::temp_dir()
        .join(format!("shared-datetime-log-{}", std::process::id()))
        .join(LOG_FILE_NAME);
    let _ = fs::remove_file(&path);

    // Skipped where the platform has no data directory.
    let Ok(logger) = Logger::from_config(&logging(true, "info")) else {
        return;
    };
    let enabled = logger.with_log_file(&path);

    let (_, log) = enabled.dispatch().unwrap().into_log();
    log.log(
        &Record::builder()
            .args(format_args!("Activated locale: de"))
            .level(Level::Info)
            .target("shared_datetime::locale")
            .build(),
    );
    log.log(
        &Record::builder()
            .args(format_args!("Registered locale: de-ch"))
            .level(Level::Debug)
            .target("shared_datetime::locale")
            .build(),
    );
    log.flush();

    let logs = enabled.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].contains("INFO"));
    assert!(logs[0].contains("Activated locale: de"));

    let file_content = fs::read_to_string(&path).unwrap_or_default();
    assert!(file_content.contains("Activated locale: de"));
    assert!(!file_content.contains("de-ch"));

    let _ = fs::remove_file(&path);
}

#[test]
fn test_disabled_dispatch_drops_records() {
    let logger = Logger::new();
    let (level, log) = logger.dispatch().unwrap().into_log();
    assert_eq!(level, log::LevelFilter::Off);

    log.log(
        &Record::builder()
            .args(format_args!("ignored"))
            .level(Level::Error)
            .target("shared_datetime")
            .build(),
    );
    assert!(logger.get_logs().is_empty());
}
