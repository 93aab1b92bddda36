//! Package completion watcher.
//!
//! Follows a `Package` watch until the package identified by uid reaches a
//! terminal condition. The watch covers every package in the cluster; events
//! for other packages are skipped here.
//!
//! The subscription is released on every exit: explicitly once the loop
//! returns, and by its `Drop` impl if the caller drops this future early.

use crate::condition::{resolve, InstallOutcome};
use crate::error::WatchError;
use crds::Package;
use package_client::{PackageClientTrait, WatchEvent, WatchSubscription};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Block until the package with `uid` is Ready or Failed.
///
/// Fails with `UnexpectedDeletion` if the package is deleted first,
/// `IncompleteConfirmation` if the stream ends first and `Cancelled` if
/// `cancel` fires first.
pub async fn await_completion(
    client: &dyn PackageClientTrait,
    uid: &str,
    cancel: &CancellationToken,
) -> Result<InstallOutcome, WatchError> {
    let mut subscription = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(WatchError::Cancelled),
        opened = client.watch_packages() => opened.map_err(WatchError::Open)?,
    };
    debug!("Watching packages for uid {}", uid);

    let result = follow(&mut subscription, uid, cancel).await;
    subscription.close();
    result
}

async fn follow(
    subscription: &mut WatchSubscription<Package>,
    uid: &str,
    cancel: &CancellationToken,
) -> Result<InstallOutcome, WatchError> {
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Watch for package uid {} cancelled", uid);
                return Err(WatchError::Cancelled);
            }
            next = subscription.next() => next,
        };

        let event = match next {
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!("Package watch failed for uid {}: {}", uid, e);
                return Err(WatchError::Stream(e));
            }
            None => return Err(WatchError::IncompleteConfirmation),
        };

        if event.object().metadata.uid.as_deref() != Some(uid) {
            continue;
        }

        let name = event.object().metadata.name.as_deref().unwrap_or("<unknown>");
        match &event {
            WatchEvent::Added(pkg) | WatchEvent::Modified(pkg) => {
                if let Some(outcome) = resolve(pkg.conditions()) {
                    info!("Package {} is {}", name, outcome);
                    return Ok(outcome);
                }
                debug!("Package {} {} without terminal condition", name, event.kind());
            }
            WatchEvent::Deleted(_) => {
                warn!("Package {} was deleted while waiting for it", name);
                return Err(WatchError::UnexpectedDeletion);
            }
        }
    }
}
