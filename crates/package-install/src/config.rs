//! Install configuration.
//!
//! Read from the environment, with the package name optionally given as the
//! first command-line argument:
//!
//! - `PACKAGE_NAME` - package to install (required unless passed as argument)
//! - `INSTALL_TIMEOUT_SECS` - give up waiting after this many seconds
//!   (default 300, `0` waits indefinitely)
//! - `PRINT_MANIFEST` - print the resolved manifest after a successful install

use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    pub package_name: String,
    /// `None` waits until the watch ends on its own
    pub timeout: Option<Duration>,
    pub print_manifest: bool,
}

impl InstallConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(std::env::args().nth(1), |key| std::env::var(key).ok())
    }

    fn from_sources(
        arg: Option<String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let package_name = arg
            .or_else(|| var("PACKAGE_NAME"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ConfigError::Missing("package name (argument or PACKAGE_NAME)".to_string())
            })?;

        let timeout_secs = match var("INSTALL_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("INSTALL_TIMEOUT_SECS must be a number of seconds, got {:?}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let print_manifest = match var("PRINT_MANIFEST").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid(format!(
                    "PRINT_MANIFEST must be true/false, got {:?}",
                    other
                )))
            }
        };

        Ok(Self {
            package_name,
            timeout,
            print_manifest,
        })
    }
}
