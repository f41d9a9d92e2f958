//! Effective configuration for one CLI run.
//!
//! Report settings come from a TOML file found in a fixed order of
//! locations. Command-line flags are applied on top of whatever the file
//! says.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use relcheck::{RelcheckError, config::AppConfig};

use crate::Args;

/// Project-local configuration file, relative to the working directory.
const LOCAL_CONFIG: &str = "relcheck/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for RelcheckError {
    fn from(err: ConfigError) -> Self {
        RelcheckError::Config(err.to_string())
    }
}

/// Where the configuration of a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Given with `--config`; must exist.
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
    Defaults,
}

impl ConfigSource {
    fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Local(path) | ConfigSource::System(path) => {
                Some(path.as_path())
            }
            ConfigSource::Defaults => None,
        }
    }
}

/// Build the effective configuration for `args`.
///
/// Search order:
/// 1. `--config` if provided
/// 2. Local project directory (relcheck/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// `--format` and `--deny-warnings` then override the loaded settings.
///
/// # Errors
///
/// Returns error if:
/// - `--config` names a file that doesn't exist
/// - The selected file cannot be read or parsed
pub fn load_config(args: &Args) -> Result<AppConfig, RelcheckError> {
    // 1. Pick the configuration file
    let source = locate(
        args.config.as_deref().map(Path::new),
        Path::new(LOCAL_CONFIG),
        system_config_path(),
    );

    // 2. Read it, or start from defaults
    let config = match source.path() {
        Some(path) => read(path)?,
        None => AppConfig::default(),
    };

    // 3. Apply command-line overrides
    let config = apply_overrides(config, args);
    debug!(
        source:? = source,
        format:% = config.report().format(),
        deny_warnings = config.report().deny_warnings();
        "Effective configuration"
    );
    Ok(config)
}

fn system_config_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "relcheck", "relcheck") {
        Some(dirs) => Some(dirs.config_dir().join("config.toml")),
        None => {
            debug!("Could not determine platform-specific config directory");
            None
        }
    }
}

fn locate(explicit: Option<&Path>, local: &Path, system: Option<PathBuf>) -> ConfigSource {
    if let Some(path) = explicit {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if local.exists() {
        info!(path = local.display().to_string(); "Loading configuration from local path");
        return ConfigSource::Local(local.to_path_buf());
    }

    if let Some(system) = system {
        if system.exists() {
            info!(path = system.display().to_string(); "Loading configuration from system path");
            return ConfigSource::System(system);
        }
        debug!(path = system.display().to_string(); "System configuration file not found");
    }

    debug!("No configuration file found, using default configuration");
    ConfigSource::Defaults
}

/// Load configuration from a TOML file
fn read(path: &Path) -> Result<AppConfig, RelcheckError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(config)
}

/// Command-line flags take precedence over the configuration file.
fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let mut report = config.report().clone();
    if let Some(format) = args.format {
        report = report.with_format(format);
    }
    if args.deny_warnings {
        report = report.with_deny_warnings(true);
    }
    config.with_report(report)
}

#[cfg(test)]
mod tests {
    use relcheck::config::ReportFormat;
    use tempfile::tempdir;

    use super::*;

    fn args(config: Option<&Path>) -> Args {
        Args {
            input: "widgets.json".to_string(),
            output: None,
            config: config.map(|path| path.to_string_lossy().to_string()),
            format: None,
            deny_warnings: false,
            log_level: "off".to_string(),
        }
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relcheck.toml");
        fs::write(&path, "[report]\nformat = \"json\"\ndeny_warnings = true\n").unwrap();

        let config = load_config(&args(Some(&path))).unwrap();

        assert_eq!(config.report().format(), ReportFormat::Json);
        assert!(config.report().deny_warnings());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relcheck.toml");
        fs::write(&path, "[report]\nformat = \"json\"\n").unwrap();

        let mut args = args(Some(&path));
        args.format = Some(ReportFormat::Human);
        args.deny_warnings = true;
        let config = load_config(&args).unwrap();

        assert_eq!(config.report().format(), ReportFormat::Human);
        assert!(config.report().deny_warnings());
    }

    #[test]
    fn test_unset_flags_keep_config_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relcheck.toml");
        fs::write(&path, "[report]\nformat = \"json\"\ndeny_warnings = true\n").unwrap();

        let config = apply_overrides(read(&path).unwrap(), &args(None));

        assert_eq!(config.report().format(), ReportFormat::Json);
        assert!(config.report().deny_warnings());
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(&args(Some(&path))).unwrap_err();

        assert!(matches!(err, RelcheckError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_malformed_config_file_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relcheck.toml");
        fs::write(&path, "[report\nformat = ").unwrap();

        let err = load_config(&args(Some(&path))).unwrap_err();

        assert!(err.to_string().contains("Failed to parse TOML configuration"));
        assert!(err.to_string().contains("relcheck.toml"));
    }

    #[test]
    fn test_locate_search_order() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("local.toml");
        let system = dir.path().join("system.toml");
        let explicit = dir.path().join("explicit.toml");

        assert_eq!(
            locate(None, &local, Some(system.clone())),
            ConfigSource::Defaults
        );

        fs::write(&system, "").unwrap();
        assert_eq!(
            locate(None, &local, Some(system.clone())),
            ConfigSource::System(system.clone())
        );

        fs::write(&local, "").unwrap();
        assert_eq!(
            locate(None, &local, Some(system.clone())),
            ConfigSource::Local(local.clone())
        );

        // An explicit path wins even before it exists.
        assert_eq!(
            locate(Some(&explicit), &local, Some(system)),
            ConfigSource::Explicit(explicit)
        );
    }
}
