use crate::release::Release;
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// The two things the updater needs from a forge site. [`GitHubClient`](crate::GitHubClient) is
/// the real implementation. Pass your own to [`UpdaterBuilder::client`](crate::UpdaterBuilder::client)
/// to run the updater without talking to the network.
#[async_trait]
pub trait ReleaseClient: Debug + Send + Sync {
    /// Returns every release for the project, in the order the forge returns them.
    ///
    /// # Errors
    ///
    /// Implementations should return an error if the request fails or the forge responds with a
    /// non-success status.
    async fn list_releases(&self) -> Result<Vec<Release>>;

    /// Replaces the description of the release with the given id.
    ///
    /// # Errors
    ///
    /// Implementations should return an error if the request fails or the forge responds with a
    /// non-success status.
    async fn patch_release_body(&self, id: u64, body: &str) -> Result<()>;
}
