//! Package Install CLI
//!
//! Installs one package and waits for the package operator to report whether
//! it became Ready or Failed. Optionally prints the resolved manifest of the
//! installed version.

use anyhow::{bail, Context, Result};
use crds::PackageManifest;
use package_client::PackageClient;
use package_install::{FibonacciBackoff, InstallConfig, Installer};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Manifest lookups before giving up on a Ready package
const MANIFEST_ATTEMPTS: u32 = 8;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // kube is built with rustls; use the ring provider
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        debug!("rustls crypto provider already installed");
    }

    let config = InstallConfig::from_env()?;
    info!("Configuration:");
    info!("  Package: {}", config.package_name);
    info!(
        "  Timeout: {}",
        config.timeout.map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()))
    );

    let client = PackageClient::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    let installer = Installer::new(Arc::new(client));

    let cancel = CancellationToken::new();
    cancel_on_timeout_or_interrupt(cancel.clone(), config.timeout);

    let outcome = installer.install(&config.package_name, &cancel).await?;
    println!("{}: {}", config.package_name, outcome);
    if !outcome.is_ready() {
        bail!("Package {} failed to install", config.package_name);
    }

    if config.print_manifest {
        let manifest = wait_for_manifest(&installer, &config.package_name, &cancel).await?;
        print!("{}", serde_yaml::to_string(&manifest)?);
    }

    Ok(())
}

/// Cancel `cancel` when the timeout elapses or on Ctrl-C.
fn cancel_on_timeout_or_interrupt(cancel: CancellationToken, timeout: Option<Duration>) {
    tokio::spawn(async move {
        let deadline = async {
            match timeout {
                Some(t) => tokio::time::sleep(t).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            _ = deadline => warn!("Timed out waiting for package"),
            Ok(()) = tokio::signal::ctrl_c() => info!("Interrupted"),
        }
        cancel.cancel();
    });
}

/// The manifest is published shortly after Ready; retry while it is not there yet.
async fn wait_for_manifest(
    installer: &Installer,
    name: &str,
    cancel: &CancellationToken,
) -> Result<PackageManifest> {
    let mut backoff = FibonacciBackoff::default();
    let mut attempt = 1;
    loop {
        match installer.installed_manifest(name).await {
            Ok(manifest) => return Ok(manifest),
            Err(e) if e.is_retryable() && attempt < MANIFEST_ATTEMPTS => {
                debug!("Manifest for {} not ready (attempt {}): {}", name, attempt, e);
            }
            Err(e) => return Err(e.into()),
        }
        attempt += 1;
        tokio::select! {
            _ = cancel.cancelled() => bail!("Cancelled while waiting for the manifest of {}", name),
            _ = tokio::time::sleep(backoff.next_backoff()) => {}
        }
    }
}
