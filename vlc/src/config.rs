// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! Library location and instance configuration.
//!
//! [`get_libvlc_path`] decides which shared library [`crate::load_api`]
//! opens. [`InstanceConfig`] describes how an instance is created and
//! set up, and can be read from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, instance::DEFAULT_ARGS};

/// Environment variable overriding the libvlc shared library path.
pub const LIBVLC_PATH_ENV: &str = "LIBVLC_PATH";

/// The platform's libvlc file name, resolved through the loader search path.
pub fn default_library_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "libvlc.dll"
    } else if cfg!(target_os = "macos") {
        "libvlc.dylib"
    } else {
        "libvlc.so.5"
    }
}

/// Returns the path to the libvlc shared library.
///
/// Uses `LIBVLC_PATH` when set and non-empty, otherwise
/// [`default_library_name`].
///
/// # Examples
///
/// ```no_run
/// use vlc::config::get_libvlc_path;
/// use vlc::load_api;
///
/// # fn main() -> Result<(), vlc::Error> {
/// let api = load_api(get_libvlc_path())?;
/// # Ok(())
/// # }
/// ```
pub fn get_libvlc_path() -> PathBuf {
    match std::env::var_os(LIBVLC_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(default_library_name()),
    }
}

/// Application name and HTTP user agent reported by libvlc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgent {
    /// Human-readable application name, e.g. `"FooBar player 1.2.3"`.
    pub name: String,
    /// HTTP user agent, e.g. `"FooBar/1.2.3 Python/3.2"`.
    pub http: String,
}

/// Application identity reported by libvlc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppId {
    /// Reverse-DNS application id, e.g. `"com.example.player"`.
    pub id: String,
    pub version: String,
    pub icon: String,
}

/// How to create and set up a [`crate::VlcInstance`].
///
/// ```
/// let config = vlc::config::InstanceConfig::from_json_str(
///     r#"{ "args": ["-I", "dummy"], "interfaces": ["dummy"] }"#,
/// )
/// .unwrap();
/// assert_eq!(config.args(), ["-I", "dummy"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstanceConfig {
    /// Arguments for `libvlc_new`; [`DEFAULT_ARGS`] when absent.
    pub args: Option<Vec<String>>,
    /// Interfaces to start after creation, in order.
    pub interfaces: Vec<String>,
    pub user_agent: Option<UserAgent>,
    pub app_id: Option<AppId>,
}

impl InstanceConfig {
    /// Parses a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|error| {
            Error::Config(format!(
                "Error while reading instance config from \"{}\": {}",
                path.display(),
                error
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// The effective argument vector.
    pub fn args(&self) -> Vec<&str> {
        match &self.args {
            Some(args) => args.iter().map(String::as_str).collect(),
            None => DEFAULT_ARGS.to_vec(),
        }
    }
}
