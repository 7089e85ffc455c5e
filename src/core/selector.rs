//! Appender selection from the configuration document
//!
//! Rules are scanned in document order. Every rule whose class name pattern
//! matches the logger identity contributes all of its sinks, in order; rules
//! accumulate rather than replace each other. A matching rule with
//! `StopScanning` set ends the scan after its own sinks are added.

use super::{
    appender::Appender,
    config::{LoggerConfig, RuleConfig, SinkSpec},
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::LogLevel,
};
use crate::appenders::{ConsoleAppender, EventLogAppender, FileAppender, SharedWriter};
use regex::{Regex, RegexBuilder};
use std::str::FromStr;

/// Closed set of sink kinds named by the `Type` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    File,
    Console,
    EventLog,
}

impl FromStr for SinkKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "FILE" | "FILELOGGER" | "SCRYBEFILELOGGER" => Ok(SinkKind::File),
            "CONSOLE" | "CONSOLELOGGER" | "SCRYBECONSOLELOGGER" => Ok(SinkKind::Console),
            "EVENTVIEWER" | "EVENTVIEWERLOGGER" | "SCRYBEEVENTVIEWERLOGGER" => {
                Ok(SinkKind::EventLog)
            }
            _ => Err(LoggerError::invalid_sink_type(s)),
        }
    }
}

/// Compiled `ClassNamePattern`
///
/// `*` matches any substring and every other character is literal. Matching is
/// case-insensitive and unanchored: the pattern only has to occur somewhere in
/// the identity.
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::core::ClassPattern;
///
/// let pattern = ClassPattern::compile("Foo.*").unwrap();
/// assert!(pattern.matches("foo.bar.baz"));
/// assert!(!pattern.matches("Fooz.Bar"));
/// ```
#[derive(Debug, Clone)]
pub struct ClassPattern {
    regex: Regex,
}

impl ClassPattern {
    /// # Errors
    ///
    /// Returns `InvalidPattern` if the translated expression is rejected
    pub fn compile(pattern: &str) -> Result<Self> {
        let expression = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(true)
            .build()
            .map_err(|e| LoggerError::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self { regex })
    }

    pub fn matches(&self, identity: &str) -> bool {
        self.regex.is_match(identity)
    }
}

/// Builds the appenders that apply to a logger identity
pub struct AppenderSelector<'a> {
    config: &'a LoggerConfig,
    console_stream: Option<SharedWriter>,
}

impl<'a> AppenderSelector<'a> {
    pub fn new(config: &'a LoggerConfig) -> Self {
        Self {
            config,
            console_stream: None,
        }
    }

    /// Route every console appender this selector builds to `stream`
    #[must_use]
    pub fn with_console_stream(mut self, stream: SharedWriter) -> Self {
        self.console_stream = Some(stream);
        self
    }

    /// Appenders for `identity`, in the order they receive log calls
    ///
    /// # Errors
    ///
    /// Fails on the first configuration problem in a matching rule: unknown
    /// level names, unknown sink types, a file sink without a path, or a
    /// retention sweep that could not delete an expired file.
    pub fn resolve(&self, identity: &str) -> Result<Vec<Box<dyn Appender>>> {
        let mut appenders = Vec::new();

        for rule in self.config.rules() {
            if !Self::rule_matches(rule, identity)? {
                continue;
            }

            let default_level = rule.default_level()?;
            for spec in rule.sinks() {
                let mut appender = self.build(spec, default_level, identity)?;
                announce(appender.as_mut());
                appenders.push(appender);
            }

            if rule.stops_scanning() {
                break;
            }
        }

        Ok(appenders)
    }

    fn rule_matches(rule: &RuleConfig, identity: &str) -> Result<bool> {
        match rule.pattern() {
            Some(pattern) => Ok(ClassPattern::compile(pattern)?.matches(identity)),
            None => Ok(false),
        }
    }

    fn build(
        &self,
        spec: &SinkSpec,
        default_level: LogLevel,
        identity: &str,
    ) -> Result<Box<dyn Appender>> {
        let threshold = spec.threshold(default_level)?;
        let kind: SinkKind = spec.kind.as_deref().unwrap_or_default().parse()?;
        let prefix = spec.log_line_prefix.as_deref().unwrap_or_default();
        let name = spec.display_name();

        let appender: Box<dyn Appender> = match kind {
            SinkKind::Console => {
                let mut console = ConsoleAppender::new(threshold)
                    .with_name(name)
                    .with_prefix(prefix)
                    .with_colors(spec.use_colors.unwrap_or(false));
                if let Some(stream) = &self.console_stream {
                    console = console.with_stream(stream.clone());
                }
                Box::new(console)
            }
            SinkKind::File => {
                let path = spec
                    .file_path
                    .as_deref()
                    .ok_or_else(|| LoggerError::missing_configuration("File", "FilePath"))?;
                let mut file = FileAppender::new(path, threshold)?
                    .with_name(name)
                    .with_prefix(prefix);
                if let Some(days) = spec.max_file_days {
                    file = file.with_retention(days)?;
                }
                Box::new(file)
            }
            SinkKind::EventLog => {
                let source = spec.source.as_deref().unwrap_or(identity);
                Box::new(EventLogAppender::new(source, threshold).with_name(name))
            }
        };

        Ok(appender)
    }
}

/// Tell a fresh appender's own output that it is live
fn announce(appender: &mut dyn Appender) {
    let entry = LogEntry::new(
        LogLevel::Debug,
        format!("Logger '{}' initialized", appender.name()),
    );
    if let Err(e) = appender.emit(&entry) {
        eprintln!(
            "[LOGGER ERROR] Appender '{}' failed to announce itself: {}",
            appender.name(),
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_pattern_prefix() {
        let pattern = ClassPattern::compile("Foo.*").unwrap();
        assert!(pattern.matches("Foo.Bar.Baz"));
        assert!(!pattern.matches("Fooz.Bar"));
    }

    #[test]
    fn test_pattern_infix() {
        let pattern = ClassPattern::compile("*.Bar.*").unwrap();
        assert!(pattern.matches("Foo.Bar.Baz"));
        assert!(!pattern.matches("Foo.Barn.Baz"));
    }

    #[test]
    fn test_pattern_dot_is_literal() {
        let pattern = ClassPattern::compile("App.Core").unwrap();
        assert!(pattern.matches("APP.CORE"));
        assert!(!pattern.matches("AppXCore"));
    }

    #[test]
    fn test_pattern_metacharacters_are_literal() {
        let pattern = ClassPattern::compile("Vec<T>+(x)").unwrap();
        assert!(pattern.matches("vec<t>+(x)"));
        assert!(!pattern.matches("VecT"));
    }

    #[test]
    fn test_sink_kind_synonyms() {
        assert_eq!("file".parse::<SinkKind>().unwrap(), SinkKind::File);
        assert_eq!("FileLogger".parse::<SinkKind>().unwrap(), SinkKind::File);
        assert_eq!("Console".parse::<SinkKind>().unwrap(), SinkKind::Console);
        assert_eq!("EventViewer".parse::<SinkKind>().unwrap(), SinkKind::EventLog);
        assert_eq!("EventViewerLogger".parse::<SinkKind>().unwrap(), SinkKind::EventLog);
        assert!("EventLog".parse::<SinkKind>().is_err());
    }

    #[test]
    fn test_scrybe_prefixed_sink_kinds() {
        assert_eq!("ScrybeFileLogger".parse::<SinkKind>().unwrap(), SinkKind::File);
        assert_eq!("ScrybeConsoleLogger".parse::<SinkKind>().unwrap(), SinkKind::Console);
        assert_eq!(
            "SCRYBEEVENTVIEWERLOGGER".parse::<SinkKind>().unwrap(),
            SinkKind::EventLog
        );

        let config = LoggerConfig::default().with_rule(
            RuleConfig::new("App.*").with_sink(SinkSpec::new("ScrybeConsoleLogger")),
        );
        let sink = Arc::new(Mutex::new(Vec::<u8>::new()));
        let appenders = AppenderSelector::new(&config)
            .with_console_stream(sink)
            .resolve("App.Worker")
            .unwrap();
        assert_eq!(appenders.len(), 1);
        assert!(matches!(
            "Carrier".parse::<SinkKind>(),
            Err(LoggerError::InvalidSinkType { .. })
        ));
    }

    fn console_rule(pattern: &str, name: &str, stop: bool) -> RuleConfig {
        RuleConfig::new(pattern)
            .with_stop_scanning(stop)
            .with_default_level("Info")
            .with_sink(SinkSpec::console().with_name(name))
    }

    fn names(appenders: &[Box<dyn Appender>]) -> Vec<String> {
        appenders.iter().map(|a| a.name().to_string()).collect()
    }

    #[test]
    fn test_rules_accumulate_until_stop() {
        let config = LoggerConfig::default()
            .with_rule(console_rule("App.*", "r1", false))
            .with_rule(console_rule("*Worker", "r2", true))
            .with_rule(console_rule("*", "r3", false));
        let sink = Arc::new(Mutex::new(Vec::<u8>::new()));

        let appenders = AppenderSelector::new(&config)
            .with_console_stream(sink)
            .resolve("App.Worker")
            .unwrap();

        assert_eq!(names(&appenders), vec!["r1", "r2"]);
    }

    #[test]
    fn test_non_matching_stop_rule_does_not_stop() {
        let config = LoggerConfig::default()
            .with_rule(console_rule("Other.*", "r1", true))
            .with_rule(console_rule("App.*", "r2", false));
        let sink = Arc::new(Mutex::new(Vec::<u8>::new()));

        let appenders = AppenderSelector::new(&config)
            .with_console_stream(sink)
            .resolve("App.Worker")
            .unwrap();

        assert_eq!(names(&appenders), vec!["r2"]);
    }

    #[test]
    fn test_threshold_inheritance() {
        let config = LoggerConfig::default().with_rule(
            RuleConfig::new("*")
                .with_sink(SinkSpec::console().with_name("inherits"))
                .with_sink(SinkSpec::console().with_name("overrides").with_level("T")),
        );
        let sink = Arc::new(Mutex::new(Vec::<u8>::new()));

        let appenders = AppenderSelector::new(&config)
            .with_console_stream(sink)
            .resolve("Any")
            .unwrap();

        assert_eq!(appenders[0].threshold(), LogLevel::Error);
        assert_eq!(appenders[1].threshold(), LogLevel::Trace);
    }

    #[test]
    fn test_announcement_respects_threshold() {
        let config = LoggerConfig::default().with_rule(
            RuleConfig::new("*")
                .with_default_level("Debug")
                .with_sink(SinkSpec::console().with_name("Screen")),
        );
        let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
        let stream: SharedWriter = buffer.clone();

        AppenderSelector::new(&config)
            .with_console_stream(stream)
            .resolve("Any")
            .unwrap();

        let output = String::from_utf8(buffer.lock().clone()).unwrap();
        assert_eq!(output, "Logger 'Screen' initialized\n");
    }

    #[test]
    fn test_invalid_type_and_level() {
        let bad_type = LoggerConfig::default()
            .with_rule(RuleConfig::new("*").with_sink(SinkSpec::new("Pigeon")));
        assert!(matches!(
            AppenderSelector::new(&bad_type).resolve("A").err(),
            Some(LoggerError::InvalidSinkType { .. })
        ));

        let bad_level = LoggerConfig::default()
            .with_rule(RuleConfig::new("*").with_sink(SinkSpec::console().with_level("Shout")));
        assert!(matches!(
            AppenderSelector::new(&bad_level).resolve("A").err(),
            Some(LoggerError::InvalidSeverityName { .. })
        ));
    }

    #[test]
    fn test_non_matching_rule_is_not_validated() {
        let config = LoggerConfig::default()
            .with_rule(RuleConfig::new("Elsewhere").with_sink(SinkSpec::new("Pigeon")));
        assert!(AppenderSelector::new(&config).resolve("App").unwrap().is_empty());
    }

    #[test]
    fn test_file_without_path() {
        let config = LoggerConfig::default()
            .with_rule(RuleConfig::new("*").with_sink(SinkSpec::new("File")));
        assert!(matches!(
            AppenderSelector::new(&config).resolve("A").err(),
            Some(LoggerError::MissingConfiguration { .. })
        ));
    }

    #[test]
    fn test_empty_pattern_skipped() {
        let config = LoggerConfig::default()
            .with_rule(RuleConfig::new("").with_sink(SinkSpec::new("Pigeon")));
        assert!(AppenderSelector::new(&config).resolve("A").unwrap().is_empty());
    }
}
