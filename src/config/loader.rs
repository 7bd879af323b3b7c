use crate::config::schema::{SolqConfig, ValidationError};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SOLQ_CONFIG";

/// Config file picked up from the current directory.
pub const CONFIG_FILE_NAME: &str = "solq.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Io { .. } => self,
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config from {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(f, "failed to parse config TOML ({}): {}", path.display(), source),
                None => write!(f, "failed to parse config TOML: {}", source),
            },
            ConfigError::Validation { path, source } => match path {
                Some(path) => write!(f, "invalid config ({}): {}", path.display(), source),
                None => write!(f, "invalid config: {}", source),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

pub fn load_from_str(input: &str) -> Result<SolqConfig, ConfigError> {
    let config: SolqConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<SolqConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.with_path(path))
}

/// Resolve the active configuration.
///
/// Priority order:
/// 1. Explicit path (the `--config` flag)
/// 2. `SOLQ_CONFIG` environment variable
/// 3. `solq.toml` in the current directory
/// 4. Built-in defaults
pub fn discover(explicit: Option<&Path>) -> Result<SolqConfig, ConfigError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config from flag");
        return load_from_path(path);
    }

    if let Some(path) = env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        debug!(path = %path.display(), "loading config from {CONFIG_ENV}");
        return load_from_path(&path);
    }

    if let Ok(cwd) = env::current_dir() {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config from working directory");
            return load_from_path(&candidate);
        }
    }

    Ok(SolqConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::InputFormat;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let config = load_from_str(
            r#"
[parse]
format = "json"

[prune]
kinds = ["LineComment"]
"#,
        )
        .unwrap();
        assert_eq!(config.parse.format, InputFormat::Json);
        assert_eq!(config.prune.kinds, ["LineComment"]);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_from_str("").unwrap();
        assert_eq!(config.parse.format, InputFormat::Auto);
        assert_eq!(config.prune.kinds.len(), 3);
    }

    #[test]
    fn rejects_unknown_keys_and_formats() {
        assert!(matches!(
            load_from_str("[parse]\nformat = \"yaml\"\n"),
            Err(ConfigError::Toml { .. })
        ));
        assert!(matches!(
            load_from_str("[output]\npretty = true\n"),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn validation_errors_carry_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[prune]\nkinds = [\"\"]").unwrap();
        let err = load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { path: Some(_), .. }));
        assert!(err.to_string().contains("prune.kinds[0] is empty"));
    }

    #[test]
    fn explicit_path_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[parse]\nformat = \"solidity\"").unwrap();
        let config = discover(Some(file.path())).unwrap();
        assert_eq!(config.parse.format, InputFormat::Solidity);
    }

    #[test]
    fn missing_explicit_path_is_io_error() {
        let err = discover(Some(Path::new("/no/such/solq.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
