//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, ListPrsRequest, PullRequest},
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge {
    fn remote_config(&self) -> RemoteConfig;
    /// Returns one page of closed pull requests. An empty page means the
    /// listing is exhausted.
    async fn list_closed_prs(
        &self,
        req: ListPrsRequest,
    ) -> Result<Vec<PullRequest>>;
    /// Names of the labels attached to a pull request.
    async fn list_pr_labels(&self, pr_number: u64) -> Result<Vec<String>>;
    /// Publishes a release and returns its html url.
    async fn create_release(&self, req: CreateReleaseRequest) -> Result<String>;
}
