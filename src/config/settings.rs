use crate::core::call::CallIndex;
use crate::core::transfer::DEFAULT_ACCELERATION;
use crate::error::{ExtrinsicError, Result};
use log::LevelFilter;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

static DEFAULT_TRANSFER_CALL: &str = "0803";
static DEFAULT_LOG_LEVEL: &str = "info";

const ACCELERATION_KEY: &str = "acceleration";
const TRANSFER_CALL_KEY: &str = "transfer_call_index";
const LOG_LEVEL_KEY: &str = "log_level";

const ACCELERATION_ENV: &str = "CHAINX_ACCELERATION";
const TRANSFER_CALL_ENV: &str = "CHAINX_TRANSFER_CALL";
const LOG_LEVEL_ENV: &str = "CHAINX_LOG";

/// Shape of an optional TOML settings file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    acceleration: Option<u32>,
    transfer_call_index: Option<String>,
    log_level: Option<String>,
}

/// Settings for the command-line front end.
///
/// Precedence, lowest first: built-in defaults, settings file, environment.
pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        Self::with_env(|key| env::var(key).ok())
    }

    /// Defaults plus overrides from `lookup`, which stands in for the process environment
    pub fn with_env<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut map = Self::defaults();
        Self::apply_env(&mut map, &lookup);
        Config {
            inner: RwLock::new(map),
        }
    }

    /// Load `path` on top of the defaults; the environment still wins
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let config = Self::with_env(|_| None);
        config.load_toml_file(path)?;
        Ok(config)
    }

    /// Merge `path`, then re-apply the process environment over it
    pub fn load_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.merge_toml_file(path)?;
        Self::apply_env(&mut self.write(), &|key| env::var(key).ok());
        Ok(())
    }

    /// Merge a settings file into this config, validating every value it sets
    pub fn merge_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExtrinsicError::Config(format!("Cannot read {}: {e}", path.display()))
        })?;
        let file: FileConfig = toml::from_str(&text)?;

        if let Some(acceleration) = file.acceleration {
            self.set_acceleration(acceleration);
        }
        if let Some(call_index) = file.transfer_call_index {
            self.set_transfer_call_index(parse_call_index(&call_index)?);
        }
        if let Some(level) = file.log_level {
            self.set_log_level(&level)?;
        }
        Ok(())
    }

    fn defaults() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(
            String::from(ACCELERATION_KEY),
            DEFAULT_ACCELERATION.to_string(),
        );
        map.insert(
            String::from(TRANSFER_CALL_KEY),
            String::from(DEFAULT_TRANSFER_CALL),
        );
        map.insert(String::from(LOG_LEVEL_KEY), String::from(DEFAULT_LOG_LEVEL));
        map
    }

    fn apply_env(map: &mut HashMap<String, String>, lookup: &dyn Fn(&str) -> Option<String>) {
        for (env_key, key) in [
            (ACCELERATION_ENV, ACCELERATION_KEY),
            (TRANSFER_CALL_ENV, TRANSFER_CALL_KEY),
            (LOG_LEVEL_ENV, LOG_LEVEL_KEY),
        ] {
            if let Some(value) = lookup(env_key) {
                map.insert(String::from(key), value);
            }
        }
    }

    // A poisoned lock still holds a consistent map of strings
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    pub fn get_acceleration(&self) -> Result<u32> {
        match self.get(ACCELERATION_KEY) {
            Some(value) => value.trim().parse::<u32>().map_err(|e| {
                ExtrinsicError::Config(format!("Invalid acceleration '{value}': {e}"))
            }),
            None => Ok(DEFAULT_ACCELERATION),
        }
    }

    pub fn set_acceleration(&self, acceleration: u32) {
        self.write()
            .insert(String::from(ACCELERATION_KEY), acceleration.to_string());
    }

    pub fn get_transfer_call_index(&self) -> Result<CallIndex> {
        match self.get(TRANSFER_CALL_KEY) {
            Some(value) => parse_call_index(&value),
            None => Ok(CallIndex::TRANSFER),
        }
    }

    pub fn set_transfer_call_index(&self, call_index: CallIndex) {
        self.write()
            .insert(String::from(TRANSFER_CALL_KEY), call_index.to_string());
    }

    pub fn get_log_level(&self) -> Result<LevelFilter> {
        let value = self
            .get(LOG_LEVEL_KEY)
            .unwrap_or_else(|| String::from(DEFAULT_LOG_LEVEL));
        parse_log_level(&value)
    }

    pub fn set_log_level(&self, level: &str) -> Result<()> {
        parse_log_level(level)?;
        self.write()
            .insert(String::from(LOG_LEVEL_KEY), level.trim().to_lowercase());
        Ok(())
    }
}

fn parse_call_index(value: &str) -> Result<CallIndex> {
    CallIndex::from_str(value)
        .map_err(|e| ExtrinsicError::Config(format!("Invalid transfer call index '{value}': {e}")))
}

fn parse_log_level(value: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(value.trim())
        .map_err(|_| ExtrinsicError::Config(format!("Invalid log level '{value}'")))
}
