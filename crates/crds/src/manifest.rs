//! PackageManifest
//!
//! The resolved manifest a `PackageInfo` publishes in its status once the
//! package repository has been read.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Package name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    /// Namespace the package's workloads are installed into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_namespace: Option<String>,

    /// Helm chart source, for helm-based packages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm: Option<HelmManifest>,

    /// Plain manifest sources, for manifest-based packages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manifests: Vec<PlainManifest>,

    /// Links shown to users (docs, source, website)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<PackageReference>,

    /// Packages that must be installed first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HelmManifest {
    pub repository_url: String,
    pub chart_name: String,
    pub chart_version: String,

    /// Values passed to the chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "free_form_object")]
    pub values: Option<serde_json::Value>,
}

/// Arbitrary JSON object kept as-is by the API server.
fn free_form_object(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "object",
        "x-kubernetes-preserve-unknown-fields": true
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PlainManifest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PackageReference {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,

    /// Version range (semver constraint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
