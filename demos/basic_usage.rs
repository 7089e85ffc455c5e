//! Basic logger usage example
//!
//! Demonstrates a console logger configured from an inline JSON document,
//! per-sink thresholds, custom ranks and method tracing.
//!
//! Run with: cargo run --example basic_usage

use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{info, log_method_end, log_method_start, log_variable, warning};

const CONFIG: &str = r#"{
    "LoggerConfig": [
        {
            "ClassNamePattern": "Demo.*",
            "DefaultLoggingLevel": "Trace",
            "Loggers": [
                { "Type": "Console", "LogLinePrefix": "{T} [{L}] ", "UseColors": true }
            ]
        },
        {
            "ClassNamePattern": "Demo.Quiet",
            "StopScanning": true,
            "Loggers": [
                { "Type": "Console", "LoggingLevel": "Warning", "LogLinePrefix": "quiet [{L}] " }
            ]
        }
    ]
}"#;

fn checksum(logger: &Logger, items: &[u32]) -> u32 {
    log_method_start!(logger, items.len());
    let total: u32 = items.iter().sum();
    log_variable!(logger, total);
    log_method_end!(logger, total)
}

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - Basic Usage Example ===\n");

    let config = LoggerConfig::from_json(CONFIG)?;

    println!("1. Logging at different levels:");
    let logger = Logger::new("Demo.Main", &config)?;
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.verbose("This is a verbose message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Custom ranks take the name of the level below them:");
    logger.custom("Rank 100 sits between Warning and Error", 100);
    info!(logger, "Formatted through a macro: {}", 42);

    println!("\n3. A second rule adds a Warning sink for Demo.Quiet:");
    let quiet = Logger::new("Demo.Quiet", &config)?;
    quiet.info("Only the Trace sink shows this");
    warning!(quiet, "Both sinks show this");
    quiet.force("Forced messages pass every threshold");

    println!("\n4. Method tracing:");
    let start = chrono::Local::now();
    let total = checksum(&logger, &[3, 5, 8]);
    logger.time_elapsed(start);
    println!("   checksum returned {}", total);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
