// Logger setup for the CLI
// The library only uses the `log` facade; the binary installs env_logger.
// RUST_LOG overrides the level chosen here.

use std::io::Write;
use log::LevelFilter;

/// Initialize logging: info by default, debug when verbose
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .try_init();
}
