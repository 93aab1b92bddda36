//! Integration tests for the package client
//!
//! These tests require a cluster with the package CRDs installed and a
//! reachable kubeconfig.

use package_client::{PackageClient, PackageClientTrait};

#[tokio::test]
#[ignore] // Requires a running cluster
async fn test_client_creation() {
    let client = PackageClient::try_default().await;
    assert!(client.is_ok(), "Failed to build client from kubeconfig");
}

#[tokio::test]
#[ignore]
async fn test_get_missing_package_is_not_found() {
    let client = PackageClient::try_default().await.expect("Failed to create client");

    let err = client
        .get_package("definitely-not-installed-package")
        .await
        .expect_err("Package should not exist");
    assert!(err.is_not_found(), "Expected NotFound, got {}", err);
}

#[tokio::test]
#[ignore]
async fn test_watch_opens_and_closes() {
    let client = PackageClient::try_default().await.expect("Failed to create client");

    let mut watch = client.watch_packages().await.expect("Failed to open watch");
    assert!(!watch.is_closed());
    watch.close();
    assert!(watch.is_closed());
    assert!(watch.next().await.is_none());
}
