//! Release note generation over a forge's pull request history.
use log::*;
use std::rc::Rc;

use crate::{
    Result,
    config::RelnoteConfig,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RELEASE_NOTE_LABEL},
        manager::ForgeManager,
        request::{CreateReleaseRequest, ListPrsRequest, PullRequest},
    },
    notes::{
        format::{self, NoteFormatter},
        scanner::{ReleaseWindow, ScanOutcome, Scanner},
    },
    throttle::Throttle,
};

/// One rendered note line.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEntry {
    pub number: u64,
    pub line: String,
}

/// Notes generated for one release window.
#[derive(Debug, Clone)]
pub struct ReleaseNotes {
    pub window: ReleaseWindow,
    pub base_branch: String,
    /// Ordered by merge time, oldest first.
    pub entries: Vec<NoteEntry>,
}

impl ReleaseNotes {
    pub fn header(&self) -> String {
        format::header(&self.window, &self.base_branch)
    }

    /// Concatenated note lines, used as the release body.
    pub fn body(&self) -> String {
        self.entries.iter().map(|e| e.line.as_str()).collect()
    }

    /// Release request for the configured target, or None when tag name or
    /// release name is missing.
    pub fn release_request(
        &self,
        config: &RelnoteConfig,
    ) -> Option<CreateReleaseRequest> {
        let release = &config.release;
        let tag_name = release.tag_name.clone()?;
        let name = release.release_name.clone()?;

        Some(CreateReleaseRequest {
            owner: release.owner.clone(),
            repo: release.repository.clone(),
            tag_name,
            name,
            prerelease: release.prerelease,
            body: self.body(),
        })
    }
}

pub struct ReleaseNoteBuilder {
    config: Rc<RelnoteConfig>,
    forge: Rc<ForgeManager>,
    formatter: NoteFormatter,
    throttle: Throttle,
}

impl ReleaseNoteBuilder {
    pub fn new(
        config: Rc<RelnoteConfig>,
        forge: Rc<ForgeManager>,
    ) -> Result<Self> {
        let formatter = NoteFormatter::new(&config.note_template)?;
        let throttle = Throttle::fixed_interval(config.label_interval);

        Ok(Self {
            config,
            forge,
            formatter,
            throttle,
        })
    }

    /// Replaces the label lookup throttle.
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Fetches, filters, sorts and renders the notes for the configured
    /// window.
    pub async fn build(&mut self) -> Result<ReleaseNotes> {
        let ScanOutcome {
            window,
            mut candidates,
        } = self.scan().await?;

        format::sort_by_merge_time(&mut candidates);
        let in_window = format::within_window(candidates, &window);

        info!(
            "{} merged PRs between #{} and #{}",
            in_window.len(),
            window.last,
            window.current
        );

        let mut entries = vec![];

        for pr in in_window.iter() {
            if self.config.relnote_filter && !self.has_release_note_label(pr).await?
            {
                debug!("skipping PR #{}: no {RELEASE_NOTE_LABEL} label", pr.number);
                continue;
            }

            entries.push(NoteEntry {
                number: pr.number,
                line: self.formatter.render(pr)?,
            });
        }

        Ok(ReleaseNotes {
            window,
            base_branch: self.config.base_branch.clone(),
            entries,
        })
    }

    async fn scan(&self) -> Result<ScanOutcome> {
        let mut scanner = Scanner::new(self.config.last, self.config.current);
        let mut page = 0;

        while !scanner.is_done() {
            page += 1;
            info!("Fetching PR list page {page:2}");

            let prs = self
                .forge
                .list_closed_prs(ListPrsRequest {
                    base_branch: self.config.base_branch.clone(),
                    page,
                    per_page: DEFAULT_PAGE_SIZE,
                })
                .await?;

            scanner.feed(prs);
        }

        scanner.finish()
    }

    async fn has_release_note_label(&mut self, pr: &PullRequest) -> Result<bool> {
        self.throttle.acquire().await;
        let labels = self.forge.list_pr_labels(pr.number).await?;
        Ok(labels.iter().any(|l| l == RELEASE_NOTE_LABEL))
    }
}

#[cfg(test)]
mod tests;
