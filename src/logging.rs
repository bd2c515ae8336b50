// Conditional logging macros - only active in debug builds

use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::io;
use std::path::Path;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    // Arguments still count as used, so release builds stay warning-free
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

/// Install the global logger. `RUST_LOG` overrides `default_filter`.
///
/// With a `log_file`, output goes there instead of stderr so it cannot
/// draw over the terminal UI.
pub fn init(default_filter: &str, log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    // A logger may already be installed (tests, embedding); keep it
    if builder.try_init().is_err() {
        debug_log!("Logger already initialized");
    }
    Ok(())
}
