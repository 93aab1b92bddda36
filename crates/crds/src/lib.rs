//! Package CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the package operator:
//! `Package`, `PackageInfo` and the shared status types.

pub mod condition;
pub mod manifest;
pub mod package;
pub mod package_info;
pub mod references;

pub use condition::*;
pub use manifest::*;
pub use package::*;
pub use package_info::*;
pub use references::*;

/// API group of all package CRDs
pub const GROUP: &str = "packages.glasskube.dev";

/// API version of all package CRDs
pub const VERSION: &str = "v1alpha1";
