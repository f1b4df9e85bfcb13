//! Logger setup for binaries and integration harnesses. Library code only ever talks to the `log`
//! facade; this module is the single place where a `log4rs` backend gets installed.

use std::path::Path;

use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};

use crate::error::{PortalError, PortalResult};

/// Pattern used for console output when no logger config file is supplied
const CONSOLE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// Build the fallback console configuration. Every record at or above `level` is written to
/// stdout with [CONSOLE_PATTERN].
/// # Errors
/// This function will return an error if the `log4rs` config builder rejects the appender setup
pub fn console_config(level: LevelFilter) -> PortalResult<Config> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("stdout", Box::new(stdout)),
        )
        .build(Root::builder().appender("stdout").build(level))
        .map_err(|error| PortalError::Logging(error.to_string()))
}

/// Install the global logger. When `config_file` is provided it is handed to
/// [log4rs::init_file], otherwise the [console_config] is used with `level`.
/// # Errors
/// This function will return an error if the config file cannot be loaded or a global logger has
/// already been installed
pub fn init_logging(config_file: Option<&Path>, level: LevelFilter) -> PortalResult<()> {
    if let Some(path) = config_file {
        return log4rs::init_file(path, Default::default())
            .map_err(|error| PortalError::Logging(format!("{path:?}. {error}")));
    }
    log4rs::init_config(console_config(level)?)
        .map_err(|error| PortalError::Logging(error.to_string()))?;
    Ok(())
}
