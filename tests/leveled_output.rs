//! End-to-end behaviour of leveled loggers writing into memory

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use levelog::{
    infof, ConfigError, Dispatcher, FormatFlags, LeveledLogger, LineRecord, LineWriter,
    LoggerConfig, Severity, SharedBuffer,
};
use parking_lot::Mutex;

/// Sink that keeps the raw records it was handed
#[derive(Default)]
struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl LineWriter for RecordingSink {
    fn write_line(&self, record: &LineRecord<'_>) {
        self.messages.lock().push(record.message.to_string());
    }
}

#[test]
fn test_warn_logger_filters_info_and_decorates_warn() {
    let out = SharedBuffer::new();
    let log = LeveledLogger::new(out.clone(), "svc", "Warn", FormatFlags::empty()).unwrap();

    log.info(&[&"ignored"]);
    infof!(log, "ignored {}", 2);
    assert!(log.flush_timeout(Duration::from_secs(5)));
    assert!(out.is_empty());

    log.warn(&[&"disk", &"low"]);
    assert!(log.flush_timeout(Duration::from_secs(5)));
    let lines = out.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("WARN svc disk low"));
}

#[test]
fn test_off_logger_is_silent() {
    let sink = Arc::new(RecordingSink::default());
    let log = LeveledLogger::with_sink(sink.clone(), "svc", "Off").unwrap();
    log.error(&[&"e"]);
    log.errorln(&[&"e"]);
    log.warnf(format_args!("w"));
    log.info(&[&"i"]);
    log.debugln(&[&"d"]);
    log.panic(&[&"p"]);
    log.fatalln(&[&"f"]);
    log.flush();
    assert!(sink.messages.lock().is_empty());
}

#[test]
fn test_each_dispatched_call_writes_exactly_once() {
    let sink = Arc::new(RecordingSink::default());
    let log = LeveledLogger::with_sink(sink.clone(), "", "Debug").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let log = log.clone();
            thread::spawn(move || {
                for i in 0..250 {
                    log.debugf(format_args!("t{} #{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    log.flush();

    let messages = sink.messages.lock();
    assert_eq!(messages.len(), 1000);
    assert!(messages.iter().all(|m| m.starts_with("DEBUG t")));
    for t in 0..4 {
        let prefix = format!("DEBUG t{} #", t);
        assert_eq!(messages.iter().filter(|m| m.starts_with(&prefix)).count(), 250);
    }
}

#[test]
fn test_loggers_can_share_one_dispatcher() {
    let dispatcher = Arc::new(Dispatcher::new(1, 8).unwrap());
    let sink = Arc::new(RecordingSink::default());
    let api = LeveledLogger::with_dispatcher(sink.clone(), "api", "Info", dispatcher.clone()).unwrap();
    let db = LeveledLogger::with_dispatcher(sink.clone(), "db", "Error", dispatcher.clone()).unwrap();

    api.info(&[&"request"]);
    db.info(&[&"filtered"]);
    db.error(&[&"timeout"]);
    dispatcher.flush();

    let mut messages = sink.messages.lock().clone();
    messages.sort();
    assert_eq!(messages, vec!["ERROR db timeout", "INFO api request"]);
}

#[test]
fn test_logger_from_config() {
    let config = LoggerConfig::from_toml_str(
        r#"
        prefix = "cfg"
        level = "Error"
        flags = []
        workers = 1
        queue_capacity = 4
        "#,
    )
    .unwrap();
    let out = SharedBuffer::new();
    let log = LeveledLogger::from_config(out.clone(), &config).unwrap();
    assert_eq!(log.threshold(), Severity::Error);
    assert_eq!(log.prefix(), "cfg");
    assert_eq!(log.dispatcher().worker_count(), 1);
    assert_eq!(log.dispatcher().capacity(), 4);

    // More lines than the queue holds: overflow is written inline, nothing is lost
    for i in 0..20 {
        log.error(&[&i]);
    }
    log.warn(&[&"filtered"]);
    log.shutdown();
    assert_eq!(out.lines().len(), 20);
    assert!(out.lines().iter().all(|l| l.starts_with("ERROR cfg ")));
}

#[test]
fn test_config_errors_prevent_construction() {
    let bad_level = LoggerConfig {
        level: "Trace".to_string(),
        ..LoggerConfig::default()
    };
    assert!(matches!(
        LeveledLogger::from_config(SharedBuffer::new(), &bad_level),
        Err(ConfigError::UnknownLevel(_))
    ));

    let bad_flag = LoggerConfig {
        flags: vec!["Ldate".to_string()],
        ..LoggerConfig::default()
    };
    assert!(matches!(
        LeveledLogger::from_config(SharedBuffer::new(), &bad_flag),
        Err(ConfigError::UnknownFlag(_))
    ));

    let no_workers = LoggerConfig {
        workers: 0,
        ..LoggerConfig::default()
    };
    assert!(matches!(
        LeveledLogger::from_config(SharedBuffer::new(), &no_workers),
        Err(ConfigError::ZeroSized(_))
    ));
}

#[test]
fn test_standard_flags_put_a_timestamp_first() {
    let out = SharedBuffer::new();
    let log = LeveledLogger::new(out.clone(), "svc", "Info", FormatFlags::STANDARD | FormatFlags::UTC)
        .unwrap();
    log.info(&[&"stamped"]);
    log.flush();

    let line = out.contents();
    // "YYYY/MM/DD HH:MM:SS INFO svc stamped\n"
    assert_eq!(line.len(), "2024/01/01 00:00:00 ".len() + "INFO svc stamped\n".len());
    assert!(line.ends_with(" INFO svc stamped\n"));
    assert_eq!(&line[4..5], "/");
    assert_eq!(&line[13..14], ":");
}
