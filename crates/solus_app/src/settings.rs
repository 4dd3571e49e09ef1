use std::path::{Path, PathBuf};

use serde::Deserialize;
use solus_utils::Singleton;

pub const SETTINGS_ENV: &str = "SOLUS_SETTINGS";
pub const DEFAULT_SETTINGS_PATH: &str = "solus.toml";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Singleton)]
#[serde(default)]
#[singleton(constructor = AppSettings::from_env, error = SettingsError)]
pub struct AppSettings {
    pub greeting: String,
    pub repeat: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            greeting: "hello".to_string(),
            repeat: 1,
        }
    }
}

impl AppSettings {
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load(Self::path_from_env())
    }

    /// A missing file yields the defaults, any other failure is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let buf = match std::fs::read_to_string(path) {
            Ok(buf) => buf,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults.", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings = toml::from_str::<Self>(&buf)?;
        log::info!("Loaded settings from {}.", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{AppSettings, SettingsError};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "greeting = \"hey\"").unwrap();

        let settings = AppSettings::load(file.path()).unwrap();
        assert_eq!(settings.greeting, "hey");
        assert_eq!(settings.repeat, 1);
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "greeting = \"yo\"\nrepeat = 3").unwrap();

        let settings = AppSettings::load(file.path()).unwrap();
        assert_eq!(
            settings,
            AppSettings {
                greeting: "yo".to_string(),
                repeat: 3,
            }
        );
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "repeat = \"many\"").unwrap();

        let err = AppSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Toml(_)));
    }

    #[test]
    fn test_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppSettings::load(dir.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
