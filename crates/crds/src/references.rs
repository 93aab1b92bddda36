//! Owned resource references
//!
//! A `Package` records the resources it caused to be created. References follow
//! the Kubernetes `TypedObjectReference` shape (group, version, kind, name and
//! optional namespace).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference from an owning resource to a resource it created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OwnedResourceRef {
    /// API group of the owned resource (e.g., "packages.glasskube.dev")
    #[serde(default)]
    pub group: String,

    /// API version of the owned resource (e.g., "v1alpha1")
    #[serde(default)]
    pub version: String,

    /// Kind of the owned resource (e.g., "PackageInfo")
    pub kind: String,

    /// Name of the owned resource
    pub name: String,

    /// Namespace, unset for cluster-scoped resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl OwnedResourceRef {
    /// Reference to a `PackageInfo` in this API group
    pub fn package_info(name: impl Into<String>) -> Self {
        Self {
            group: crate::GROUP.to_string(),
            version: crate::VERSION.to_string(),
            kind: "PackageInfo".to_string(),
            name: name.into(),
            namespace: None,
        }
    }
}

/// Ordered, append-only list of `PackageInfo` references owned by a `Package`.
///
/// Every reinstall or upgrade appends a new entry. The last entry is the
/// current one and supersedes everything before it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct OwnedPackageInfos(Vec<OwnedResourceRef>);

impl OwnedPackageInfos {
    /// The authoritative reference, if any.
    pub fn current(&self) -> Option<&OwnedResourceRef> {
        self.0.last()
    }
}

impl From<Vec<OwnedResourceRef>> for OwnedPackageInfos {
    fn from(refs: Vec<OwnedResourceRef>) -> Self {
        Self(refs)
    }
}

impl FromIterator<OwnedResourceRef> for OwnedPackageInfos {
    fn from_iter<I: IntoIterator<Item = OwnedResourceRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
