//! Settings resolution for shipspeak-analysis
//!
//! Layers command-line overrides on top of the shared resolver:
//! CLI flag → environment → settings file → compiled defaults.

use shipspeak_common::config::{Settings, SettingsResolver};
use shipspeak_common::Result;
use std::path::PathBuf;
use tracing::info;

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Resolve the settings for one invocation
pub fn load_settings(overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = SettingsResolver::new(overrides.config_path.clone()).load()?;

    if let Some(secs) = overrides.timeout_secs {
        info!(timeout_secs = secs, "Timeout overridden from command line");
        settings.pipeline.timeout_secs = secs;
    }

    settings.validate()?;
    Ok(settings)
}

/// Log filter directive: `RUST_LOG` when set, else the configured level
pub fn log_filter(settings: &Settings) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| settings.logging.level.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    #[serial]
    fn test_cli_timeout_beats_file_and_env() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\ntimeout_secs = 30").unwrap();
        std::env::set_var(shipspeak_common::config::TIMEOUT_ENV, "45");

        let settings = load_settings(&CliOverrides {
            config_path: Some(file.path().to_path_buf()),
            timeout_secs: Some(5),
        })
        .unwrap();
        std::env::remove_var(shipspeak_common::config::TIMEOUT_ENV);

        assert_eq!(settings.pipeline.timeout_secs, 5);
    }

    #[test]
    #[serial]
    fn test_log_filter_prefers_rust_log() {
        let settings = Settings::default();

        std::env::set_var("RUST_LOG", "shipspeak_analysis=trace");
        assert_eq!(log_filter(&settings), "shipspeak_analysis=trace");

        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter(&settings), "info");
    }
}
