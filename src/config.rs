use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::StartupError;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DOTFILE_NAME: &str = ".env";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfileConfig {
    pub model: Option<String>,
    pub transcription_model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    profiles: Option<HashMap<String, ProfileConfig>>,
}

/// Environment lookup backed by the process environment, falling back to the
/// entries of a dotfile. The dotfile is read as data; the process environment
/// is never modified.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    use_process: bool,
    dotfile: HashMap<String, String>,
}

impl EnvSource {
    /// Process environment plus `.env` in the working directory, if present.
    pub fn from_process() -> Result<Self, StartupError> {
        let mut source = Self {
            use_process: true,
            dotfile: HashMap::new(),
        };
        let dotfile = Path::new(DOTFILE_NAME);
        if dotfile.is_file() {
            source.dotfile = read_dotfile(dotfile)?;
        }
        Ok(source)
    }

    /// Fixed set of variables, ignoring the process environment.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            use_process: false,
            dotfile: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Returns the trimmed, non-empty value of `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        let from_process = if self.use_process {
            env::var(key).ok()
        } else {
            None
        };
        from_process
            .or_else(|| self.dotfile.get(key).cloned())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

fn read_dotfile(path: &Path) -> Result<HashMap<String, String>, StartupError> {
    let entries = dotenvy::from_path_iter(path).map_err(|err| {
        StartupError::Config(format!("Failed to read '{}': {err}", path.display()))
    })?;
    entries
        .map(|entry| {
            entry.map_err(|err| {
                StartupError::Config(format!("Failed to parse '{}': {err}", path.display()))
            })
        })
        .collect()
}

pub fn load_profile(name: &str, env: &EnvSource) -> Result<ProfileConfig, StartupError> {
    let path = config_path(env)?;
    let config = read_config_file(&path)?;

    let profiles = config.profiles.ok_or_else(|| {
        StartupError::Config(format!(
            "Config file '{}' does not contain a [profiles] section.",
            path.display()
        ))
    })?;

    profiles.get(name).cloned().ok_or_else(|| {
        StartupError::Config(format!(
            "Profile '{}' not found in config file '{}'.",
            name,
            path.display()
        ))
    })
}

/// Parses the config file and, when given, checks that `profile` exists.
pub fn validate_config(profile: Option<&str>, env: &EnvSource) -> Result<PathBuf, StartupError> {
    let path = config_path(env)?;
    match profile {
        Some(name) => {
            load_profile(name, env)?;
        }
        None => {
            read_config_file(&path)?;
        }
    }
    Ok(path)
}

fn read_config_file(path: &Path) -> Result<ConfigFile, StartupError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        StartupError::Config(format!(
            "Failed to read config file '{}': {err}",
            path.display()
        ))
    })?;

    toml::from_str(&raw).map_err(|err| {
        StartupError::Config(format!(
            "Failed to parse config file '{}': {err}",
            path.display()
        ))
    })
}

fn config_path(env: &EnvSource) -> Result<PathBuf, StartupError> {
    if let Some(path) = env.get("LT_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    if let Some(xdg) = env.get("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("lltools").join("config.toml"));
    }

    let home = env.get("HOME").ok_or_else(|| {
        StartupError::Config(
            "Cannot resolve config path: set LT_CONFIG or HOME/XDG_CONFIG_HOME.".to_string(),
        )
    })?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("lltools")
        .join("config.toml"))
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolved configuration handed to the inference client.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub transcription_model: String,
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key_present", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("transcription_model", &self.transcription_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Settings {
    /// Resolves settings with precedence CLI > environment > dotfile > profile > default.
    pub fn resolve(overrides: &Overrides, env: &EnvSource) -> Result<Self, StartupError> {
        let profile = match overrides.profile.as_deref() {
            Some(name) => load_profile(name, env)?,
            None => ProfileConfig::default(),
        };

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(secs),
            None => match env.get("LT_TIMEOUT") {
                Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                    StartupError::Config(format!(
                        "Invalid LT_TIMEOUT '{raw}'. Expected a whole number of seconds."
                    ))
                })?),
                None => profile.timeout,
            },
        };

        let base_url = env
            .get("LT_BASE_URL")
            .or(profile.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key: overrides
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .or_else(|| env.get(API_KEY_ENV)),
            base_url,
            chat_model: overrides
                .model
                .clone()
                .or_else(|| env.get("LT_MODEL"))
                .or(profile.model)
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            transcription_model: env
                .get("LT_TRANSCRIPTION_MODEL")
                .or(profile.transcription_model)
                .unwrap_or_else(|| DEFAULT_TRANSCRIPTION_MODEL.to_string()),
            timeout_secs,
        })
    }

    pub fn require_api_key(&self) -> Result<&str, StartupError> {
        self.api_key.as_deref().ok_or(StartupError::MissingApiKey {
            key_env: API_KEY_ENV,
        })
    }
}
