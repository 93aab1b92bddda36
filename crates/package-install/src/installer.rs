//! Package installer.
//!
//! Creates a `Package` and waits for the operator to report it Ready or
//! Failed. Create failures are returned as-is and never retried. A failed
//! wait leaves the created package in place; removing it is a separate
//! operation.

use crate::condition::InstallOutcome;
use crate::error::{InstallError, ResolutionError, WatchError};
use crate::manifest;
use crate::watcher::await_completion;
use crds::{Package, PackageManifest};
use package_client::PackageClientTrait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Installs packages and resolves their manifests.
///
/// Cheap to clone; clones share the underlying client. Calls are independent
/// and may run concurrently.
#[derive(Clone)]
pub struct Installer {
    client: Arc<dyn PackageClientTrait>,
}

impl Installer {
    /// Creates a new installer instance.
    pub fn new(client: Arc<dyn PackageClientTrait>) -> Self {
        Self { client }
    }

    /// Install `name` and wait for its terminal outcome.
    ///
    /// A token that is already cancelled creates nothing. Cancelling while
    /// the create request is in flight abandons it and returns `Cancelled`;
    /// the request may still have reached the API server.
    pub async fn install(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<InstallOutcome, InstallError> {
        let package = Package::new_for_install(name);
        let created = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Install of {} cancelled before the package was created", name);
                return Err(WatchError::Cancelled.into());
            }
            created = self.client.create_package(&package) => {
                created.map_err(|source| InstallError::Create {
                    name: name.to_string(),
                    source,
                })?
            }
        };
        let uid = created
            .metadata
            .uid
            .ok_or_else(|| InstallError::MissingIdentity(name.to_string()))?;

        info!("Installing {}", name);
        let outcome = await_completion(self.client.as_ref(), &uid, cancel).await?;
        Ok(outcome)
    }

    /// Manifest of an already fetched package.
    pub async fn resolve_artifact(&self, root: &Package) -> Result<PackageManifest, ResolutionError> {
        manifest::resolve_artifact(self.client.as_ref(), root).await
    }

    /// Manifest of the installed package `name`.
    pub async fn installed_manifest(&self, name: &str) -> Result<PackageManifest, ResolutionError> {
        manifest::installed_manifest(self.client.as_ref(), name).await
    }
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::OutcomeKind;
    use crds::{Condition, PackageStatus};
    use package_client::{MockPackageClient, WatchEvent};
    use std::time::Duration;

    fn event_for(uid: &str, conditions: Vec<Condition>) -> WatchEvent<Package> {
        let mut pkg = Package::new_for_install("kube-prometheus-stack");
        pkg.metadata.uid = Some(uid.to_string());
        pkg.status = Some(PackageStatus {
            conditions,
            ..Default::default()
        });
        WatchEvent::Modified(pkg)
    }

    #[tokio::test]
    async fn test_install_ready() {
        let mock = MockPackageClient::new();
        mock.set_next_uid("uid-ready");
        mock.push_event(event_for("uid-ready", vec![Condition::ready("Installed", "all good")]));

        let installer = Installer::new(Arc::new(mock.clone()));
        let outcome = installer
            .install("kube-prometheus-stack", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Ready);
        assert_eq!(outcome.reason(), "Installed");
        assert_eq!(mock.packages_created(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_is_not_retried_and_opens_no_watch() {
        let mock = MockPackageClient::new();
        mock.fail_create("packages.packages.glasskube.dev is forbidden");

        let installer = Installer::new(Arc::new(mock.clone()));
        let err = installer
            .install("kube-prometheus-stack", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, InstallError::Create { .. }));
        assert_eq!(mock.watches_opened(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_token_creates_nothing() {
        let mock = MockPackageClient::new();
        let token = CancellationToken::new();
        token.cancel();

        let installer = Installer::new(Arc::new(mock.clone()));
        let err = installer.install("kube-prometheus-stack", &token).await.unwrap_err();

        assert!(matches!(err, InstallError::Watch(WatchError::Cancelled)));
        assert_eq!(mock.packages_created(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_create_returns_promptly() {
        let mock = MockPackageClient::new();
        mock.delay_create(Duration::from_secs(30));

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let installer = Installer::new(Arc::new(mock.clone()));
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            installer.install("kube-prometheus-stack", &token),
        )
        .await
        .expect("install should return once cancelled");

        assert!(matches!(result, Err(InstallError::Watch(WatchError::Cancelled))));
        assert_eq!(mock.packages_created(), 0);
        assert_eq!(mock.watches_opened(), 0);
    }

    #[tokio::test]
    async fn test_failed_wait_keeps_created_package() {
        let mock = MockPackageClient::new();
        let installer = Installer::new(Arc::new(mock.clone()));

        let err = installer
            .install("kube-prometheus-stack", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, InstallError::Watch(WatchError::IncompleteConfirmation)));
        assert!(mock.get_package("kube-prometheus-stack").await.is_ok());
    }
}
