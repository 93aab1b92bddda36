//! Install and resolution error types.
//!
//! Every failure path in this crate returns one of these to the immediate
//! caller. Nothing is logged-and-continued.

use package_client::PackageClientError;
use thiserror::Error;

/// Errors that end a completion watch.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The caller cancelled (timeout or abort) before a terminal condition
    #[error("Watch cancelled before the package reached a terminal state")]
    Cancelled,

    /// The watched package was deleted before reaching a terminal state
    #[error("Created package has been deleted unexpectedly")]
    UnexpectedDeletion,

    /// The watch stream ended without a terminal condition
    #[error("Failed to confirm package installation status")]
    IncompleteConfirmation,

    /// The watch could not be opened
    #[error("Failed to open package watch: {0}")]
    Open(#[source] PackageClientError),

    /// The watch stream reported an error
    #[error("Package watch failed: {0}")]
    Stream(#[source] PackageClientError),
}

/// Errors returned by `Installer::install`.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The create call was rejected (validation, permission, conflict)
    #[error("Failed to create package {name}: {source}")]
    Create {
        name: String,
        #[source]
        source: PackageClientError,
    },

    /// The API server returned the created package without a uid
    #[error("Created package {0} has no uid")]
    MissingIdentity(String),

    #[error(transparent)]
    Watch(#[from] WatchError),
}

/// Errors returned while following a package to its resolved manifest.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The package does not own any PackageInfo yet
    #[error("Package has no owned PackageInfo")]
    NoOwnedReference,

    /// Looking up the package or its PackageInfo failed
    #[error("Failed to fetch {name}: {source}")]
    FetchFailed {
        name: String,
        #[source]
        source: PackageClientError,
    },

    /// The PackageInfo exists but has not published a manifest yet
    #[error("PackageInfo {0} has no manifest yet")]
    ArtifactNotReady(String),
}

impl ResolutionError {
    /// True for "try again later"; false for hard failures.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolutionError::ArtifactNotReady(_))
    }
}

/// Configuration errors for the install binary.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
