//! Package client errors

use thiserror::Error;

/// Errors that can occur when talking to the Kubernetes API about packages
#[derive(Debug, Error)]
pub enum PackageClientError {
    /// Kubernetes API request/response error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// The API server rejected the request
    #[error("API error: {0}")]
    Api(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The watch stream reported an error
    #[error("Watch error: {0}")]
    Watch(String),
}

impl PackageClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PackageClientError::NotFound(_))
    }
}

impl From<kube_runtime::watcher::Error> for PackageClientError {
    fn from(e: kube_runtime::watcher::Error) -> Self {
        PackageClientError::Watch(e.to_string())
    }
}
