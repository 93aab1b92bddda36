//! PackageClient trait for mocking
//!
//! This trait abstracts the Kubernetes calls the installer makes so that unit
//! tests can run against `MockPackageClient` instead of a cluster.

use crate::error::PackageClientError;
use crate::watch::WatchSubscription;
use crds::{Package, PackageInfo};

/// Trait for package API operations
///
/// Implementations must allow concurrent independent calls: one caller
/// waiting on a watch never blocks another caller's create or get.
#[async_trait::async_trait]
pub trait PackageClientTrait: Send + Sync {
    /// Create a `Package`. The returned object carries the server-assigned uid.
    async fn create_package(&self, package: &Package) -> Result<Package, PackageClientError>;

    /// Fetch a `Package` by name.
    async fn get_package(&self, name: &str) -> Result<Package, PackageClientError>;

    /// Fetch a `PackageInfo` by name.
    async fn get_package_info(&self, name: &str) -> Result<PackageInfo, PackageClientError>;

    /// Open a watch over all `Package` resources.
    async fn watch_packages(&self) -> Result<WatchSubscription<Package>, PackageClientError>;
}
