//! PackageInfo CRD
//!
//! Created by the operator for each installed package version. Its status
//! carries the resolved manifest once the repository has been read.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::condition::Condition;
use crate::manifest::PackageManifest;

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "packages.glasskube.dev",
    version = "v1alpha1",
    kind = "PackageInfo",
    status = "PackageInfoStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfoSpec {
    /// Package name in the repository
    pub name: String,

    /// Version to resolve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfoStatus {
    /// Resolved manifest; unset until the repository has been read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PackageManifest>,

    /// Resolved version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl PackageInfo {
    /// The resolved manifest, if the operator has published one.
    pub fn manifest(&self) -> Option<&PackageManifest> {
        self.status.as_ref().and_then(|s| s.manifest.as_ref())
    }
}
