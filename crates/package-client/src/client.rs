//! Kubernetes-backed package client
//!
//! `Package` and `PackageInfo` are cluster-scoped, so both APIs are
//! `Api::all`. Watches use `kube_runtime::watcher`, which lists first and then
//! follows changes.

use crate::error::PackageClientError;
use crate::package_trait::PackageClientTrait;
use crate::watch::{WatchEvent, WatchSubscription};
use crds::{Package, PackageInfo};
use futures::StreamExt;
use kube::api::PostParams;
use kube::{Api, Client};
use kube_runtime::watcher;
use tracing::debug;

/// Package API client
#[derive(Clone)]
pub struct PackageClient {
    packages: Api<Package>,
    package_infos: Api<PackageInfo>,
}

impl PackageClient {
    /// Create a client from an existing Kubernetes client
    pub fn new(client: Client) -> Self {
        Self {
            packages: Api::all(client.clone()),
            package_infos: Api::all(client),
        }
    }

    /// Create a client from the default kubeconfig / in-cluster config
    pub async fn try_default() -> Result<Self, PackageClientError> {
        let client = Client::try_default().await?;
        Ok(Self::new(client))
    }
}

/// Translate a runtime watcher event into a subscription event.
///
/// Objects from the initial list arrive as `Added`; later applies arrive as
/// `Modified` because the runtime watcher does not separate the two.
fn translate(event: watcher::Event<Package>) -> Option<WatchEvent<Package>> {
    match event {
        watcher::Event::InitApply(pkg) => Some(WatchEvent::Added(pkg)),
        watcher::Event::Apply(pkg) => Some(WatchEvent::Modified(pkg)),
        watcher::Event::Delete(pkg) => Some(WatchEvent::Deleted(pkg)),
        watcher::Event::Init | watcher::Event::InitDone => None,
    }
}

#[async_trait::async_trait]
impl PackageClientTrait for PackageClient {
    async fn create_package(&self, package: &Package) -> Result<Package, PackageClientError> {
        let name = package.metadata.name.as_deref().unwrap_or("<unnamed>");
        debug!("Creating Package {}", name);
        let created = self.packages.create(&PostParams::default(), package).await?;
        debug!("Created Package {} with uid {:?}", name, created.metadata.uid);
        Ok(created)
    }

    async fn get_package(&self, name: &str) -> Result<Package, PackageClientError> {
        debug!("Fetching Package {}", name);
        self.packages
            .get_opt(name)
            .await?
            .ok_or_else(|| PackageClientError::NotFound(format!("Package {}", name)))
    }

    async fn get_package_info(&self, name: &str) -> Result<PackageInfo, PackageClientError> {
        debug!("Fetching PackageInfo {}", name);
        self.package_infos
            .get_opt(name)
            .await?
            .ok_or_else(|| PackageClientError::NotFound(format!("PackageInfo {}", name)))
    }

    async fn watch_packages(&self) -> Result<WatchSubscription<Package>, PackageClientError> {
        debug!("Opening Package watch");
        let events = watcher(self.packages.clone(), watcher::Config::default())
            .filter_map(|res| async move {
                match res {
                    Ok(event) => translate(event).map(Ok),
                    Err(e) => Some(Err(PackageClientError::from(e))),
                }
            })
            .boxed();
        Ok(WatchSubscription::with_close_hook(events, || {
            debug!("Package watch closed");
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_init_markers_are_dropped() {
        assert!(translate(watcher::Event::Init).is_none());
        assert!(translate(watcher::Event::InitDone).is_none());
    }

    #[test]
    fn test_translate_maps_object_events() {
        let pkg = Package::new_for_install("velero");
        assert!(matches!(translate(watcher::Event::InitApply(pkg.clone())), Some(WatchEvent::Added(_))));
        assert!(matches!(translate(watcher::Event::Apply(pkg.clone())), Some(WatchEvent::Modified(_))));
        assert!(matches!(translate(watcher::Event::Delete(pkg)), Some(WatchEvent::Deleted(_))));
    }
}
