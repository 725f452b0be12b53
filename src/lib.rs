//! A small leveled logger.
//!
//! A [`Logger`] holds one [`Target`] and a severity threshold. Messages below
//! the threshold are dropped; the others are handed to the target, which may
//! be the console, a file, or a local or remote syslog daemon.
//!
//! [`Logger`]: ./struct.Logger.html
//! [`Target`]: ./target/trait.Target.html
//!
//! # Examples
//!
//! Creates a logger via `LoggerBuilder`:
//!
//! ```
//! use plainlog::LoggerBuilder;
//! use plainlog::types::Severity;
//!
//! let logger = LoggerBuilder::new()
//!     .level(Severity::Debug)
//!     .target_uri("stderr")
//!     .build()
//!     .unwrap();
//! logger.info("Hello World!");
//! ```
//!
//! Creates a logger from configuration text (TOML):
//!
//! ```
//! use plainlog::{Config, LoggerConfig};
//!
//! let config: LoggerConfig = serdeconv::from_toml_str(r#"
//! level = "debug"
//! target = "stderr"
//! "#).unwrap();
//!
//! let logger = config.build_logger().unwrap();
//! logger.infof(format_args!("Hello {}!", "World"));
//! ```
#![warn(missing_docs)]
#[macro_use]
extern crate slog;
#[macro_use]
extern crate trackable;

pub use crate::build::LoggerBuilder;
pub use crate::config::{Config, LoggerConfig};
pub use crate::error::{Error, ErrorKind};
pub use crate::logger::{Logger, LoggerOption};
pub use crate::misc::set_stdlog_logger;
pub use crate::uri::{resolve_target, TargetUri};
pub use crate::writer::LogWriter;

pub mod file;
pub mod syslog;
pub mod target;
pub mod types;

mod build;
mod config;
mod error;
mod logger;
mod misc;
mod uri;
mod writer;

/// A specialized `Result` type for this crate.
pub type Result<T> = ::std::result::Result<T, Error>;
