//! Logger setup for the command line.

use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialize logging to stderr.
///
/// Level precedence: `--log-level`, then `RUST_LOG`, then `warn`. Unknown
/// level names fall through to the next source.
pub fn init_logging(level: Option<&str>) {
    let log_level = resolve_level(level, std::env::var("RUST_LOG").ok().as_deref());

    Builder::new()
        .filter_level(log_level)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    log::debug!("logging initialized (level: {})", log_level);
}

fn resolve_level(flag: Option<&str>, env: Option<&str>) -> LevelFilter {
    flag.and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| env.and_then(|v| v.parse::<LevelFilter>().ok()))
        .unwrap_or(LevelFilter::Warn)
}
