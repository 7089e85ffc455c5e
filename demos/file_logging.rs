//! File logging example
//!
//! Demonstrates logging to both console and a date-templated file, with a
//! retention sweep of old files in the log directory.
//!
//! Run with: cargo run --example file_logging

use rust_leveled_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - File Logging Example ===\n");

    let config = LoggerConfig::default().with_rule(
        RuleConfig::new("*")
            .with_default_level("Debug")
            .with_sink(SinkSpec::console().with_prefix("[{L}] ").with_level("Info"))
            .with_sink(
                SinkSpec::file("logs/application-{y}{M}{d}.log")
                    .with_name("ApplicationFile")
                    .with_prefix("{D} {t} [{L}] ")
                    .with_max_file_days(7),
            ),
    );

    let logger = Logger::new("Demo.FileLogging", &config)?;

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.info("Configuration loaded successfully");
    logger.warning("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
        if i == 3 {
            logger.warning("Item 3 took longer than expected");
        }
    }

    let failure = std::io::Error::new(std::io::ErrorKind::NotFound, "plugin.so missing");
    logger.error_with("Plugin loader gave up", &failure);

    logger.info("All operations completed");
    logger.flush()?;

    let file = FileAppender::new("logs/application-{y}{M}{d}.log", LogLevel::Trace)?;
    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the full log output", file.current_path().display());

    Ok(())
}
