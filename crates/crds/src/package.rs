//! Package CRD
//!
//! Declares that a package should be installed in the cluster. The package
//! operator reconciles it and reports progress through status conditions.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::condition::Condition;
use crate::references::{OwnedPackageInfos, OwnedResourceRef};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "packages.glasskube.dev",
    version = "v1alpha1",
    kind = "Package",
    status = "PackageStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    /// Which package to install
    pub package_info: PackageInfoTemplate,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfoTemplate {
    /// Package name in the repository
    pub name: String,

    /// Requested version (latest when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Repository to resolve the package from (default repository when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatus {
    /// Status conditions (Ready, Failed, ...)
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// PackageInfos created for this package, oldest first
    #[serde(default)]
    pub owned_package_infos: OwnedPackageInfos,

    /// Other resources created for this package
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owned_resources: Vec<OwnedResourceRef>,
}

impl Package {
    /// Descriptor for a fresh install of `name`.
    ///
    /// The resource name and the requested package name are the same; the
    /// version is left for the operator to resolve.
    pub fn new_for_install(name: &str) -> Self {
        Package::new(
            name,
            PackageSpec {
                package_info: PackageInfoTemplate {
                    name: name.to_string(),
                    ..Default::default()
                },
            },
        )
    }

    /// Conditions from status, empty when status has not been written yet.
    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_for_install() {
        let pkg = Package::new_for_install("cert-manager");
        assert_eq!(pkg.metadata.name.as_deref(), Some("cert-manager"));
        assert_eq!(pkg.spec.package_info.name, "cert-manager");
        assert!(pkg.spec.package_info.version.is_none());
        assert!(pkg.metadata.uid.is_none());
        assert!(pkg.conditions().is_empty());
    }

    #[test]
    fn test_status_deserializes_owned_package_infos() {
        let json = serde_json::json!({
            "apiVersion": "packages.glasskube.dev/v1alpha1",
            "kind": "Package",
            "metadata": { "name": "cert-manager", "uid": "8d2f1c2e-0000-4000-8000-000000000001" },
            "spec": { "packageInfo": { "name": "cert-manager" } },
            "status": {
                "conditions": [
                    { "type": "Ready", "status": "True", "reason": "Installed", "message": "" }
                ],
                "ownedPackageInfos": [
                    { "group": "packages.glasskube.dev", "version": "v1alpha1", "kind": "PackageInfo", "name": "cert-manager-old" },
                    { "group": "packages.glasskube.dev", "version": "v1alpha1", "kind": "PackageInfo", "name": "cert-manager-new" }
                ]
            }
        });
        let pkg: Package = serde_json::from_value(json).unwrap();
        let status = pkg.status.as_ref().unwrap();
        assert_eq!(status.owned_package_infos.current().unwrap().name, "cert-manager-new");
        assert_eq!(pkg.conditions().len(), 1);
    }
}
