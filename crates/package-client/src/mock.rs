//! Mock PackageClient for unit testing
//!
//! Stores packages and package infos in memory and replays a scripted list of
//! watch events to every subscription, like a cluster-wide watch would. Counters record how many watches
//! were opened and closed and how many events were handed to consumers, so
//! tests can assert on subscription lifecycle.

use crate::error::PackageClientError;
use crate::package_trait::PackageClientTrait;
use crate::watch::{WatchEvent, WatchSubscription};
use crds::{Package, PackageInfo};
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Scripted = Result<WatchEvent<Package>, String>;

/// Mock PackageClient for testing
#[derive(Clone, Default)]
pub struct MockPackageClient {
    packages: Arc<Mutex<HashMap<String, Package>>>,
    package_infos: Arc<Mutex<HashMap<String, PackageInfo>>>,
    // Events replayed to every watch
    script: Arc<Mutex<Vec<Scripted>>>,
    hold_open: Arc<Mutex<bool>>,
    create_error: Arc<Mutex<Option<String>>>,
    create_delay: Arc<Mutex<Option<Duration>>>,
    watch_error: Arc<Mutex<Option<String>>>,
    next_uid: Arc<Mutex<Option<String>>>,
    created: Arc<AtomicUsize>,
    watches_opened: Arc<AtomicUsize>,
    watches_closed: Arc<AtomicUsize>,
    events_delivered: Arc<AtomicUsize>,
}

impl std::fmt::Debug for MockPackageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPackageClient")
            .field("watches_opened", &self.watches_opened())
            .field("watches_closed", &self.watches_closed())
            .finish_non_exhaustive()
    }
}

impl MockPackageClient {
    /// Create a new mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package to the mock store (for test setup)
    pub fn add_package(&self, package: Package) {
        let name = package.metadata.name.clone().unwrap_or_default();
        self.packages.lock().expect("mock lock poisoned").insert(name, package);
    }

    /// Add a package info to the mock store (for test setup)
    pub fn add_package_info(&self, info: PackageInfo) {
        let name = info.metadata.name.clone().unwrap_or_default();
        self.package_infos.lock().expect("mock lock poisoned").insert(name, info);
    }

    /// Append an event to the script replayed by every watch
    pub fn push_event(&self, event: WatchEvent<Package>) {
        self.script.lock().expect("mock lock poisoned").push(Ok(event));
    }

    /// Append a stream error to the script replayed by every watch
    pub fn push_stream_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .expect("mock lock poisoned")
            .push(Err(message.into()));
    }

    /// Keep the stream pending after the script is exhausted instead of ending it
    pub fn hold_stream_open(&self) {
        *self.hold_open.lock().expect("mock lock poisoned") = true;
    }

    /// Make every `create_package` call fail with an API error
    pub fn fail_create(&self, message: impl Into<String>) {
        *self.create_error.lock().expect("mock lock poisoned") = Some(message.into());
    }

    /// Make every `create_package` call take `delay` before it is applied
    pub fn delay_create(&self, delay: Duration) {
        *self.create_delay.lock().expect("mock lock poisoned") = Some(delay);
    }

    /// Make every `watch_packages` call fail with an API error
    pub fn fail_watch(&self, message: impl Into<String>) {
        *self.watch_error.lock().expect("mock lock poisoned") = Some(message.into());
    }

    /// Uid assigned by the next successful create.
    ///
    /// Without an override a package named `n` gets uid `uid-n`.
    pub fn set_next_uid(&self, uid: impl Into<String>) {
        *self.next_uid.lock().expect("mock lock poisoned") = Some(uid.into());
    }

    pub fn packages_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn watches_opened(&self) -> usize {
        self.watches_opened.load(Ordering::SeqCst)
    }

    pub fn watches_closed(&self) -> usize {
        self.watches_closed.load(Ordering::SeqCst)
    }

    /// Number of scripted items pulled from the stream by consumers
    pub fn events_delivered(&self) -> usize {
        self.events_delivered.load(Ordering::SeqCst)
    }

    fn assign_uid(&self, name: &str) -> String {
        self.next_uid
            .lock()
            .expect("mock lock poisoned")
            .take()
            .unwrap_or_else(|| format!("uid-{}", name))
    }
}

#[async_trait::async_trait]
impl PackageClientTrait for MockPackageClient {
    async fn create_package(&self, package: &Package) -> Result<Package, PackageClientError> {
        let delay = *self.create_delay.lock().expect("mock lock poisoned");
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.create_error.lock().expect("mock lock poisoned").clone() {
            return Err(PackageClientError::Api(message));
        }
        let name = package
            .metadata
            .name
            .clone()
            .ok_or_else(|| PackageClientError::Api("metadata.name is required".to_string()))?;

        let mut packages = self.packages.lock().expect("mock lock poisoned");
        if packages.contains_key(&name) {
            return Err(PackageClientError::Api(format!(
                "packages.packages.glasskube.dev \"{}\" already exists",
                name
            )));
        }
        let mut created = package.clone();
        created.metadata.uid = Some(self.assign_uid(&name));
        created.metadata.resource_version = Some("1".to_string());
        packages.insert(name, created.clone());
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(created)
    }

    async fn get_package(&self, name: &str) -> Result<Package, PackageClientError> {
        self.packages
            .lock()
            .expect("mock lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| PackageClientError::NotFound(format!("Package {}", name)))
    }

    async fn get_package_info(&self, name: &str) -> Result<PackageInfo, PackageClientError> {
        self.package_infos
            .lock()
            .expect("mock lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| PackageClientError::NotFound(format!("PackageInfo {}", name)))
    }

    async fn watch_packages(&self) -> Result<WatchSubscription<Package>, PackageClientError> {
        if let Some(message) = self.watch_error.lock().expect("mock lock poisoned").clone() {
            return Err(PackageClientError::Api(message));
        }
        self.watches_opened.fetch_add(1, Ordering::SeqCst);

        let script: Vec<Scripted> = self.script.lock().expect("mock lock poisoned").clone();
        let hold_open = *self.hold_open.lock().expect("mock lock poisoned");
        let delivered = self.events_delivered.clone();

        let scripted = futures::stream::iter(script)
            .inspect(move |_| {
                delivered.fetch_add(1, Ordering::SeqCst);
            })
            .map(|item| item.map_err(PackageClientError::Watch));
        let events = if hold_open {
            scripted.chain(futures::stream::pending()).boxed()
        } else {
            scripted.boxed()
        };

        let closed = self.watches_closed.clone();
        Ok(WatchSubscription::with_close_hook(events, move || {
            closed.fetch_add(1, Ordering::SeqCst);
        }))
    }
}
