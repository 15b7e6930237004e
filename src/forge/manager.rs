//! Manager that wraps forge implementations
use log::*;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, ListPrsRequest, PullRequest},
        traits::Forge,
    },
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ForgeOptions {
    pub dry_run: bool,
}

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
    options: ForgeOptions,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>, options: ForgeOptions) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
            options,
        }
    }

    pub fn dry_run(&self) -> bool {
        self.options.dry_run
    }

    pub async fn list_closed_prs(
        &self,
        req: ListPrsRequest,
    ) -> Result<Vec<PullRequest>> {
        debug!(
            "listing closed prs for {} against {}: page {}",
            self.remote_config.path(),
            req.base_branch,
            req.page
        );
        self.forge.list_closed_prs(req).await
    }

    pub async fn list_pr_labels(&self, pr_number: u64) -> Result<Vec<String>> {
        debug!("listing labels for pr #{pr_number}");
        self.forge.list_pr_labels(pr_number).await
    }

    /// Creates the release unless running in dry-run mode, returning the url
    /// of the created release.
    pub async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Option<String>> {
        if self.options.dry_run {
            warn!("dry_run: would create release: req: {:#?}", req);
            return Ok(None);
        }

        info!(
            "creating release {} ({}) in {}/{}",
            req.name, req.tag_name, req.owner, req.repo
        );

        let url = self.forge.create_release(req).await?;
        Ok(Some(url))
    }
}
