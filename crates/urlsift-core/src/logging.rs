//! Tracing setup for the `urlsift` binary.
//!
//! Events are appended to `$XDG_STATE_HOME/urlsift/urlsift.log`. When that file
//! cannot be opened the CLI logs to stderr instead. `URLSIFT_LOG` overrides the
//! filter using `EnvFilter` directive syntax.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives, e.g. `urlsift_core=trace`.
pub const LOG_FILTER_ENV: &str = "URLSIFT_LOG";

const DEFAULT_FILTER: &str = "info,urlsift=debug,urlsift_core=debug";

pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlsift")?;
    Ok(xdg_dirs
        .get_state_home()
        .join("urlsift")
        .join("urlsift.log"))
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("create log dir {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Blank or unparsable directives fall back to the default filter.
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter() -> EnvFilter {
    filter_from(std::env::var(LOG_FILTER_ENV).ok().as_deref())
}

/// Install the file subscriber and return the log path.
///
/// Errors if the state dir is unusable or a subscriber is already set; the
/// caller then uses [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = open_append(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "urlsift logging initialized");
    Ok(path)
}

pub fn init_logging_stderr() {
    // A subscriber may already be installed (e.g. in tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn default_filter_enables_debug_for_urlsift() {
        assert_eq!(filter_from(None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_from(Some("  ")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn override_directives_are_used() {
        assert_eq!(filter_from(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            filter_from(Some("urlsift_core=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn bad_directives_fall_back_to_default() {
        assert_eq!(
            filter_from(Some("urlsift=loud")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn log_file_is_created_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("urlsift").join("urlsift.log");
        {
            use std::io::Write;
            writeln!(open_append(&path).unwrap(), "first").unwrap();
            writeln!(open_append(&path).unwrap(), "second").unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
