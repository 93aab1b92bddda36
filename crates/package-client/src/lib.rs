//! Package API Client
//!
//! A thin client over the Kubernetes API for the `Package` and `PackageInfo`
//! custom resources: create, point lookups, and watch subscriptions.
//!
//! # Example
//!
//! ```no_run
//! use crds::Package;
//! use package_client::{PackageClient, PackageClientTrait, WatchEvent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PackageClient::try_default().await?;
//!
//! let created = client.create_package(&Package::new_for_install("cert-manager")).await?;
//!
//! let mut watch = client.watch_packages().await?;
//! while let Some(event) = watch.next().await {
//!     if let WatchEvent::Modified(pkg) = event? {
//!         if pkg.metadata.uid == created.metadata.uid {
//!             break;
//!         }
//!     }
//! }
//! watch.close();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
#[path = "trait.rs"]
pub mod package_trait;
pub mod watch;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::PackageClient;
pub use error::PackageClientError;
pub use package_trait::PackageClientTrait;
pub use watch::{EventStream, WatchEvent, WatchSubscription};
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockPackageClient;
