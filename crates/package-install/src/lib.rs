//! Package Install
//!
//! Installs packages by creating a `Package` resource and waiting, without
//! polling, for the package operator to report a terminal outcome. Also
//! resolves the manifest of an installed package through the `PackageInfo`
//! it owns.
//!
//! # Example
//!
//! ```no_run
//! use package_client::PackageClient;
//! use package_install::Installer;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let installer = Installer::new(Arc::new(PackageClient::try_default().await?));
//!
//! let cancel = CancellationToken::new();
//! let timeout = cancel.clone();
//! tokio::spawn(async move {
//!     tokio::time::sleep(Duration::from_secs(300)).await;
//!     timeout.cancel();
//! });
//!
//! let outcome = installer.install("cert-manager", &cancel).await?;
//! if outcome.is_ready() {
//!     let manifest = installer.installed_manifest("cert-manager").await?;
//!     println!("{:?}", manifest.short_description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backoff;
pub mod condition;
pub mod config;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod watcher;

pub use backoff::FibonacciBackoff;
pub use condition::{resolve, resolve_with, InstallOutcome, OutcomeKind, ResolutionRule, PRECEDENCE};
pub use config::InstallConfig;
pub use error::{ConfigError, InstallError, ResolutionError, WatchError};
pub use installer::Installer;
pub use manifest::{installed_manifest, resolve_artifact};
pub use watcher::await_completion;
