use crate::build::LoggerBuilder;
use crate::logger::Logger;
use crate::types::Severity;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Configuration of a logger builder.
pub trait Config {
    /// Makes a logger builder associated with this configuration.
    fn try_to_builder(&self) -> Result<LoggerBuilder>;

    /// Builds a logger with this configuration.
    fn build_logger(&self) -> Result<Logger> {
        let mut builder = track!(self.try_to_builder())?;
        let logger = track!(builder.build())?;
        Ok(logger)
    }
}

/// The configuration of `LoggerBuilder`.
///
/// # Examples
///
/// ```
/// use plainlog::types::Severity;
/// use plainlog::{Config, LoggerConfig};
///
/// let toml = r#"
/// level = "debug"
/// target = "stdout"
/// "#;
/// let config: LoggerConfig = serdeconv::from_toml_str(toml).unwrap();
/// assert_eq!(config.level, Severity::Debug);
///
/// let logger = config.build_logger().unwrap();
/// logger.debug("Hello World!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct LoggerConfig {
    /// Log level.
    ///
    /// Unrecognized names select `info`.
    #[serde(default)]
    pub level: Severity,

    /// Target URI (e.g., `stderr`, `syslog`, `file:/var/log/app.log` or `udp://host:514`).
    #[serde(default = "default_target")]
    pub target: String,
}
impl LoggerConfig {
    /// Creates a new `LoggerConfig` with default settings.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the log level of this logger.
    pub fn set_loglevel(&mut self, level: Severity) {
        self.level = level;
    }
}
impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            level: Severity::default(),
            target: default_target(),
        }
    }
}
impl Config for LoggerConfig {
    fn try_to_builder(&self) -> Result<LoggerBuilder> {
        let mut builder = LoggerBuilder::new();
        builder.level(self.level);
        builder.target_uri(&self.target);
        Ok(builder)
    }
}

fn default_target() -> String {
    "stderr".to_owned()
}
