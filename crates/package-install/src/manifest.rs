//! Installed manifest resolution.
//!
//! A `Package` owns one `PackageInfo` per installed version; the most recent
//! one is authoritative. The manifest lives on that `PackageInfo`'s status.
//! These are point lookups and never wait for the operator to converge.

use crate::error::ResolutionError;
use crds::{Package, PackageManifest};
use package_client::PackageClientTrait;
use tracing::debug;

/// Resolve the manifest of an already fetched package.
pub async fn resolve_artifact(
    client: &dyn PackageClientTrait,
    root: &Package,
) -> Result<PackageManifest, ResolutionError> {
    let current = root
        .status
        .as_ref()
        .and_then(|s| s.owned_package_infos.current())
        .ok_or(ResolutionError::NoOwnedReference)?;

    debug!(
        "Resolving manifest for Package {} via PackageInfo {}",
        root.metadata.name.as_deref().unwrap_or("<unknown>"),
        current.name
    );

    let info = client
        .get_package_info(&current.name)
        .await
        .map_err(|source| ResolutionError::FetchFailed {
            name: format!("PackageInfo {}", current.name),
            source,
        })?;

    info.manifest()
        .cloned()
        .ok_or_else(|| ResolutionError::ArtifactNotReady(current.name.clone()))
}

/// Fetch a package by name and resolve its manifest.
pub async fn installed_manifest(
    client: &dyn PackageClientTrait,
    name: &str,
) -> Result<PackageManifest, ResolutionError> {
    let package = client
        .get_package(name)
        .await
        .map_err(|source| ResolutionError::FetchFailed {
            name: format!("Package {}", name),
            source,
        })?;
    resolve_artifact(client, &package).await
}
