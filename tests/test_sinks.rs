
use sinklog::{
    default_format, message_format, values, writers::ConsoleWriter, Colour, Destination,
    LogLevel, Registry, SinkKind, StringFormat, TimeZone,
};
use test_utils::{Collector, SharedBuffer};

#[test]
fn test_threshold_change_applies_to_later_calls() {
    let buffer = SharedBuffer::default();
    let registry = Registry::new();
    let sink = registry.create(
        "app",
        Destination::Console(ConsoleWriter::with_output(Box::new(buffer.clone()))),
    );
    sink.set_format(default_format);

    assert_eq!(sink.threshold(), LogLevel::Trace);
    sink.debug("first debug");
    sink.set_threshold(LogLevel::Info);
    sink.debug("second debug");
    sink.info("info");

    assert_eq!(
        buffer.lines(),
        vec!["DEBUG [app] first debug", "INFO [app] info"]
    );
}

#[test]
fn test_unknown_sink_colour_is_noop() {
    let registry = Registry::new();
    assert!(!registry.set_colour("missing", Colour::Red, LogLevel::Error));
    assert!(registry.is_empty());
    assert!(registry.get("missing").is_none());
}

#[test]
fn test_custom_writer_sees_levels() {
    let collector = Collector::default();
    let registry = Registry::new();
    let sink = registry.create_custom("custom", Box::new(collector.clone()));
    assert_eq!(sink.kind(), SinkKind::Custom);
    sink.set_format(message_format);
    sink.set_threshold(LogLevel::Warning);

    sink.info("dropped");
    sink.warning_with("{} retries left", &values![2]);
    sink.fatal("giving up");

    assert_eq!(
        collector.entries(),
        vec![
            (LogLevel::Warning, "2 retries left\n".to_string()),
            (LogLevel::Fatal, "giving up\n".to_string()),
        ]
    );
}

#[test]
fn test_lookup_returns_same_sink() {
    let collector = Collector::default();
    let registry = Registry::new();
    registry.create_custom("shared", Box::new(collector.clone()));

    // a second creation with the same name keeps the first destination
    let other = Collector::default();
    registry.create_custom("shared", Box::new(other.clone()));

    let sink = registry.get("shared").unwrap();
    sink.set_format(message_format);
    sink.error("once");

    assert_eq!(collector.entries().len(), 1);
    assert!(other.entries().is_empty());
    assert_eq!(registry.names(), vec!["shared".to_string()]);
}

#[test]
fn test_string_format_properties() {
    let buffer = SharedBuffer::default();
    let registry = Registry::new();
    let sink = registry.create(
        "calc",
        Destination::Console(ConsoleWriter::with_output(Box::new(buffer.clone()))),
    );

    sink.set_formatting_properties("{level} {sink}: {message}", 2, true, TimeZone::Utc);
    sink.info_with("pi is about {}, {{exactly}} {0}", &values![std::f64::consts::PI]);
    sink.set_formatter(Box::new(StringFormat::with_layout("{message}!")));
    sink.warning("plain {} stays");

    assert_eq!(
        buffer.lines(),
        vec![
            "INFO calc: pi is about 3.14, {exactly} 3.14",
            "plain {} stays!"
        ]
    );
}

#[test]
fn test_default_layout_has_timestamp() {
    let buffer = SharedBuffer::default();
    let registry = Registry::new();
    let sink = registry.create(
        "stamped",
        Destination::Console(ConsoleWriter::with_output(Box::new(buffer.clone()))),
    );
    sink.error("oops");

    let line = &buffer.lines()[0];
    let re = regex::Regex::new(
        r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3} \[stamped\] ERROR: oops$",
    )
    .unwrap();
    assert!(re.is_match(line), "unexpected line: {line}");
}
