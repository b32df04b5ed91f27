//! # Runtime Configuration Module
//!
//! Settings for a served router, loaded from an optional YAML file and then
//! overridden by environment variables.
//!
//! ## File
//!
//! ```yaml
//! name: Bookshelf
//! types_enabled: true
//! addr: 127.0.0.1:8080
//! stack_size: 0x8000
//! ```
//!
//! Every key is optional.
//!
//! ## Environment Variables
//!
//! | Variable | Field | Example |
//! |---|---|---|
//! | `MINIROUTER_NAME` | `name` | `Bookshelf` |
//! | `MINIROUTER_TYPES` | `types_enabled` | `true`, `0`, `off` |
//! | `MINIROUTER_ADDR` | `addr` | `0.0.0.0:9000` |
//! | `MINIROUTER_STACK_SIZE` | `stack_size` | `16384` or `0x4000` |
//!
//! ### `MINIROUTER_STACK_SIZE`
//!
//! Sets the stack size of the coroutines serving requests. Handlers run on these
//! stacks, so deep call chains need more. Default: `0x4000` (16 KB).

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::env;
use std::path::Path;

pub const DEFAULT_NAME: &str = "Router";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration for a served router.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Router display name, shown in 404 bodies
    pub name: String,
    /// Coercion default; `None` leaves the application's own default in place
    pub types_enabled: Option<bool>,
    /// Listen address
    pub addr: String,
    /// Coroutine stack size in bytes
    #[serde(deserialize_with = "deserialize_stack_size")]
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            types_enabled: None,
            addr: DEFAULT_ADDR.to_string(),
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| env::var(key).ok())
    }

    /// Load a YAML file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config.with_env_overrides(|key| env::var(key).ok()))
    }

    /// Parse a YAML document. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML, unknown keys or an invalid stack size.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("failed to parse YAML")
    }

    /// Apply overrides from a variable lookup. Unparseable values are ignored.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("MINIROUTER_NAME").filter(|v| !v.trim().is_empty()) {
            self.name = name;
        }
        if let Some(types) = lookup("MINIROUTER_TYPES").and_then(|v| parse_bool(&v)) {
            self.types_enabled = Some(types);
        }
        if let Some(addr) = lookup("MINIROUTER_ADDR").filter(|v| !v.trim().is_empty()) {
            self.addr = addr;
        }
        if let Some(size) = lookup("MINIROUTER_STACK_SIZE").and_then(|v| parse_stack_size(&v)) {
            self.stack_size = size;
        }
        self
    }
}

/// Parse a size given in decimal or `0x` hexadecimal.
#[must_use]
pub fn parse_stack_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_stack_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(usize),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(size) => Ok(size),
        Raw::Text(text) => parse_stack_size(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid stack size '{text}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.name, "Router");
        assert_eq!(config.types_enabled, None);
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.stack_size, 0x4000);
    }

    #[test]
    fn test_stack_size_formats() {
        assert_eq!(parse_stack_size("16384"), Some(16384));
        assert_eq!(parse_stack_size("0x8000"), Some(0x8000));
        assert_eq!(parse_stack_size("lots"), None);
    }

    #[test]
    fn test_yaml_with_hex_stack_size() {
        let config = RuntimeConfig::from_yaml("name: Shelf\nstack_size: \"0x8000\"\n").unwrap();
        assert_eq!(config.name, "Shelf");
        assert_eq!(config.stack_size, 0x8000);
        assert_eq!(config.addr, DEFAULT_ADDR);
    }

    #[test]
    fn test_yaml_rejects_unknown_keys() {
        assert!(RuntimeConfig::from_yaml("nmae: typo\n").is_err());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RuntimeConfig::from_yaml("  \n").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = RuntimeConfig::from_yaml("name: Shelf\ntypes_enabled: false\n")
            .unwrap()
            .with_env_overrides(lookup(&[
                ("MINIROUTER_NAME", "Library"),
                ("MINIROUTER_TYPES", "on"),
                ("MINIROUTER_STACK_SIZE", "0x10000"),
            ]));
        assert_eq!(config.name, "Library");
        assert_eq!(config.types_enabled, Some(true));
        assert_eq!(config.stack_size, 0x10000);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = RuntimeConfig::default().with_env_overrides(lookup(&[
            ("MINIROUTER_TYPES", "maybe"),
            ("MINIROUTER_STACK_SIZE", "big"),
            ("MINIROUTER_NAME", "  "),
        ]));
        assert_eq!(config, RuntimeConfig::default());
    }
}
