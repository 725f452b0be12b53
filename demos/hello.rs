use clap::{Arg, Command};
use plainlog::types::Severity;
use plainlog::LoggerBuilder;
use std::io::Write;

fn main() {
    let matches = Command::new("hello")
        .arg(
            Arg::new("TARGET")
                .help("Target URI (stderr, stdout, syslog, file:<path>, tcp://<addr>, udp://<addr>)")
                .default_value("stderr"),
        )
        .arg(
            Arg::new("LEVEL")
                .long("level")
                .help("Threshold (debug, info or error)")
                .default_value("info"),
        )
        .get_matches();
    let target = matches.get_one::<String>("TARGET").expect("defaulted");
    let level = matches.get_one::<String>("LEVEL").expect("defaulted");

    let logger = LoggerBuilder::new()
        .level_name(level)
        .target_uri(target)
        .build_or_exit();

    logger.debug("Hello debug");
    logger.infof(format_args!("Hello {:?}", target));
    logger.error("Hello error");

    let mut writer = logger.writer(Severity::Info);
    let _ = write!(writer, "Hello from an io::Write");

    if let Err(e) = logger.close() {
        logger.fatalf(format_args!("cannot close the logger: {}", e));
    }
}
