//! Structured logging for the Lumen tools.
//!
//! Console output with uptime timestamps and module paths, plus JSON file
//! logging in debug builds. The level comes from `RUST_LOG` when set, otherwise
//! from the config's `debug.log_level`.

use lumen_config::Config;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info,bevy_ecs=warn";

/// Builds the filter string for `config`, falling back to [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Picks the active filter: a non-empty, parseable `RUST_LOG` value wins, then the
/// config's level, then [`DEFAULT_FILTER`].
pub fn resolve_filter(rust_log: Option<&str>, config: Option<&Config>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(filter_directives(config)))
}

/// Creates `lumen.log` under `log_dir` for the JSON file layer.
///
/// Returns `None` outside debug builds, without a directory, or when the
/// file cannot be created.
pub fn open_log_file(log_dir: Option<&Path>, debug_build: bool) -> Option<File> {
    if !debug_build {
        return None;
    }
    let log_dir = log_dir?;
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join("lumen.log")).ok()
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for `lumen.log` (debug builds only)
/// * `debug_build` - enables the JSON file layer
/// * `config` - optional configuration supplying the log level
///
/// ```no_run
/// use lumen_config::Config;
/// use lumen_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = resolve_filter(rust_log.as_deref(), config);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_file) = open_log_file(log_dir, debug_build) {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_level(level: &str) -> Config {
        let mut config = Config::default();
        config.debug.log_level = level.to_string();
        config
    }

    #[test]
    fn test_default_log_level() {
        let filter_str = resolve_filter(None, None).to_string();
        assert!(filter_str.contains("bevy_ecs=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_config_level_overrides_default() {
        let config = config_with_level("debug,lumen_materials=trace");
        assert_eq!(filter_directives(Some(&config)), "debug,lumen_materials=trace");
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let config = config_with_level("");
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_config_level_used_without_rust_log() {
        let config = config_with_level("debug");
        assert_eq!(resolve_filter(None, Some(&config)).to_string(), "debug");
    }

    #[test]
    fn test_rust_log_beats_config() {
        let config = config_with_level("debug");
        assert_eq!(resolve_filter(Some("warn"), Some(&config)).to_string(), "warn");
    }

    #[test]
    fn test_unparseable_rust_log_falls_back_to_config() {
        let config = config_with_level("error");
        let filter = resolve_filter(Some("lumen=notalevel"), Some(&config));
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn test_empty_rust_log_is_ignored() {
        let config = config_with_level("warn");
        assert_eq!(resolve_filter(Some("  "), Some(&config)).to_string(), "warn");
    }

    #[test]
    fn test_log_file_created_in_debug_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");

        assert!(open_log_file(Some(&log_dir), true).is_some());
        assert!(log_dir.join("lumen.log").exists());
    }

    #[test]
    fn test_no_log_file_in_release_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");

        assert!(open_log_file(Some(&log_dir), false).is_none());
        assert!(!log_dir.exists());
    }

    #[test]
    fn test_no_log_file_without_directory() {
        assert!(open_log_file(None, true).is_none());
    }
}
