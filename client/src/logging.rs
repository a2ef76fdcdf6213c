//! Logger initialisation shared by both binaries.
//!
//! Logs go to stderr through `env_logger`. Each binary picks a default
//! level from its flags; `RUST_LOG`, when set, takes precedence.

use log::LevelFilter;

/// Default level for `nexus-sync` given `-v` count and `-q`.
#[must_use]
pub const fn sync_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Default level for `nexus-deliver` given `--debug`.
#[must_use]
pub const fn delivery_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the global logger at `level`, unless `RUST_LOG` overrides it.
///
/// A second call is ignored.
pub fn init(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialised");
    }
}
