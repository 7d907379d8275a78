//! Generic logger utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info};
use std::fmt;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logger configuration for an execution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggerParams {
    /// Level of records shown on the console
    pub console_level: LevelFilter,

    /// Level of records written to the session log file, at least `Info`
    pub file_level: LevelFilter,

    /// Stream the console records go to
    pub console: ConsoleStream,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The console stream used for log output.
///
/// Executables which print machine readable output on stdout log to stderr instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log file level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LoggerParams {
    /// Parameters for the given verbosity, as counted from `-v` flags.
    ///
    /// The console shows `Info` and above by default, `Debug` for one flag and `Trace` for more.
    /// The log file always keeps at least `Debug`, so a session records which path each request
    /// selected even when the console doesn't show it.
    pub fn from_verbosity(verbosity: u8, console: ConsoleStream) -> Self {
        let console_level = match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Self {
            console_level,
            file_level: console_level.max(LevelFilter::Debug),
            console,
        }
    }

    /// Check that the file level keeps at least `Info` records.
    pub fn validate(&self) -> Result<(), LoggerInitError> {
        if self.file_level < log::Level::Info {
            Err(LoggerInitError::InvalidMinLogLevel(self.file_level))
        }
        else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// Console records are coloured, records in the session's log file are plain text.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    params: &LoggerParams,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    params.validate()?;

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{}", format_record(message, record, true)))
        })
        .level(params.console_level);

    let console = match params.console {
        ConsoleStream::Stdout => console.chain(std::io::stdout()),
        ConsoleStream::Stderr => console.chain(std::io::stderr()),
    };

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{}", format_record(message, record, false)))
        })
        .level(params.file_level)
        .chain(log_file);

    fern::Dispatch::new()
        .chain(console)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {:?}", session::get_epoch());
    info!("    Console level: {:?} ({:?})", params.console_level, params.console);
    info!("    File level: {:?}", params.file_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Format a record with the session time and level, and with the target for debug and trace.
fn format_record(message: &fmt::Arguments, record: &log::Record, colour: bool) -> String {
    let level = if colour {
        level_to_str(record.level()).to_string()
    }
    else {
        level_to_plain_str(record.level()).to_string()
    };

    if record.level() > log::Level::Info {
        format!(
            "[{:10.6} {}] {}: {}",
            session::get_elapsed_seconds(),
            level,
            record.target(),
            message
        )
    }
    else {
        format!(
            "[{:10.6} {}] {}",
            session::get_elapsed_seconds(),
            level,
            message
        )
    }
}

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    let plain = level_to_plain_str(level);

    match level {
        log::Level::Trace => plain.dimmed().italic(),
        log::Level::Debug => plain.dimmed(),
        log::Level::Info  => plain.normal(),
        log::Level::Warn  => plain.yellow(),
        log::Level::Error => plain.red().bold()
    }
}

fn level_to_plain_str(level: log::Level) -> &'static str {
    match level {
        log::Level::Trace => "TRC",
        log::Level::Debug => "DBG",
        log::Level::Info  => "INF",
        log::Level::Warn  => "WRN",
        log::Level::Error => "ERR"
    }
}
