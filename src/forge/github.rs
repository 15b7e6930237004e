//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, params};

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, ListPrsRequest, PullRequest},
        traits::Forge,
    },
};

/// GitHub forge implementation using Octocrab for pull request listing,
/// label lookups and release creation.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())?
            .build()?;

        Ok(Self { config, instance })
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn list_closed_prs(
        &self,
        req: ListPrsRequest,
    ) -> Result<Vec<PullRequest>> {
        let page = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Closed)
            .base(req.base_branch)
            .sort(params::pulls::Sort::Updated)
            .direction(params::Direction::Descending)
            .per_page(req.per_page)
            .page(req.page)
            .send()
            .await?;

        debug!(
            "received {} pull requests for page {}",
            page.items.len(),
            req.page
        );

        Ok(page.items.into_iter().map(PullRequest::from).collect())
    }

    async fn list_pr_labels(&self, pr_number: u64) -> Result<Vec<String>> {
        let page = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .list_labels_for_issue(pr_number)
            .per_page(100)
            .send()
            .await?;

        Ok(page.items.into_iter().map(|l| l.name).collect())
    }

    async fn create_release(&self, req: CreateReleaseRequest) -> Result<String> {
        let release = self
            .instance
            .repos(&req.owner, &req.repo)
            .releases()
            .create(&req.tag_name)
            .name(&req.name)
            .body(&req.body)
            .draft(false)
            .prerelease(req.prerelease)
            .send()
            .await?;

        Ok(release.html_url.to_string())
    }
}
