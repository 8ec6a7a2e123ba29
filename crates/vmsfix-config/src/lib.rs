//! Shared configuration for vmsfix tools.
//!
//! TOML profiles, root password resolution (env + keyring + plaintext),
//! and translation to `vmsfix_core::FixtureConfig`. The CLI layers its
//! global flags on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vmsfix_api::RootCredentials;
use vmsfix_api::transport::TlsMode;
use vmsfix_core::config::DEFAULT_ORIGIN;
use vmsfix_core::{DeleteTolerance, FailurePolicy, FixtureConfig, PollConfig};

/// Environment variable that overrides every stored password.
pub const PASSWORD_ENV: &str = "VMSFIX_PASSWORD";

const KEYRING_SERVICE: &str = "vmsfix";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found in config")]
    UnknownProfile { profile: String },

    #[error("no root password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    /// `table` or `json`.
    #[serde(default = "default_output")]
    pub output: String,

    /// Accept any certificate; test servers are usually self-signed.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: default_insecure(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// A named server profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Server origin including any web prefix (e.g. "http://10.0.0.5:8000/asip-api").
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default = "default_login")]
    pub login: String,

    /// Root password (plaintext; prefer keyring or `VMSFIX_PASSWORD`).
    #[serde(default = "default_password")]
    pub password: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override the default insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override the default request timeout, in seconds.
    pub timeout: Option<u64>,

    /// Return RPC failures as errors instead of tagged outcomes.
    #[serde(default)]
    pub strict: bool,

    pub delete_tolerance: Option<DeleteTolerance>,

    /// Readiness probes before giving up.
    pub ready_attempts: Option<u32>,

    /// Seconds between readiness probes.
    pub ready_interval_secs: Option<u64>,

    /// Directory holding fixture inputs such as raster map images.
    pub test_data_dir: Option<PathBuf>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            login: default_login(),
            password: default_password(),
            ca_cert: None,
            insecure: None,
            timeout: None,
            strict: false,
            delete_tolerance: None,
            ready_attempts: None,
            ready_interval_secs: None,
            test_data_dir: None,
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.into()
}
fn default_login() -> String {
    "root".into()
}
#[allow(clippy::unnecessary_wraps)]
fn default_password() -> Option<String> {
    Some("root".into())
}

impl Config {
    /// Pick a profile: the named one, else `default_profile`, else
    /// "default". A missing "default" profile falls back to built-in
    /// defaults; any other missing name is an error.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
            .to_owned();
        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile.clone())),
            None if name == "default" => Ok((name, Profile::default())),
            None => Err(ConfigError::UnknownProfile { profile: name }),
        }
    }

    /// TOML rendering with every password masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut redacted = self.clone();
        for profile in redacted.profiles.values_mut() {
            if profile.password.is_some() {
                profile.password = Some("****".into());
            }
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "vmsfix", "vmsfix").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vmsfix");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` plus `VMSFIX_` environment overrides.
/// A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VMSFIX_").ignore(&["PASSWORD"]).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the root password: `VMSFIX_PASSWORD`, then the system keyring
/// entry `<profile>/password`, then the profile's plaintext value.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a `FixtureConfig` from a profile and the global defaults.
pub fn profile_to_fixture_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<FixtureConfig, ConfigError> {
    let origin: url::Url = profile
        .origin
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "origin".into(),
            reason: format!("invalid URL: {}", profile.origin),
        })?;

    if profile.ready_attempts == Some(0) {
        return Err(ConfigError::Validation {
            field: "ready_attempts".into(),
            reason: "must be at least 1".into(),
        });
    }

    let password = resolve_password(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    let poll_defaults = PollConfig::default();
    let readiness = PollConfig {
        max_attempts: profile
            .ready_attempts
            .unwrap_or(poll_defaults.max_attempts),
        interval: profile
            .ready_interval_secs
            .map_or(poll_defaults.interval, Duration::from_secs),
    };

    let mut config = FixtureConfig::new(origin);
    config.credentials = RootCredentials {
        login: profile.login.clone(),
        password,
    };
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.policy = if profile.strict {
        FailurePolicy::Strict
    } else {
        FailurePolicy::Lenient
    };
    config.delete_tolerance = profile.delete_tolerance.unwrap_or_default();
    config.readiness = readiness;
    if let Some(ref dir) = profile.test_data_dir {
        config.test_data_dir.clone_from(dir);
    }
    Ok(config)
}
