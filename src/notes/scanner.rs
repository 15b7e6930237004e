//! Incremental scan over pages of closed pull requests, newest-updated first.
//!
//! The scanner owns no I/O: the caller fetches pages and feeds them in until
//! [`Scanner::is_done`] reports that no further page can contribute.
use chrono::{DateTime, Utc};
use log::*;

use crate::{RelnoteError, Result, forge::request::PullRequest};

/// Progress of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Still looking for the "last" boundary PR.
    Scanning,
    /// The "last" PR has been seen, so its merge time bounds the scan.
    BoundaryFound,
    /// Either the listing is exhausted or every remaining PR was updated
    /// before the "last" PR merged.
    Done,
}

/// Merged/unmerged counts for one fed page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub merged: usize,
    pub unmerged: usize,
}

/// Merge-time interval between the two boundary PRs. Both ends are
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseWindow {
    pub last: u64,
    pub current: u64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReleaseWindow {
    pub fn contains(&self, merged_at: DateTime<Utc>) -> bool {
        self.start < merged_at && merged_at < self.end
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub window: ReleaseWindow,
    /// Merged PRs collected along the way, in listing order. Boundary PRs
    /// are excluded.
    pub candidates: Vec<PullRequest>,
}

#[derive(Debug)]
pub struct Scanner {
    last: u64,
    current: Option<u64>,
    state: ScanState,
    last_merged_at: Option<DateTime<Utc>>,
    current_merged_at: Option<DateTime<Utc>>,
    candidates: Vec<PullRequest>,
}

impl Scanner {
    /// `current` falls back to the first PR of the first non-empty page.
    pub fn new(last: u64, current: Option<u64>) -> Self {
        Self {
            last,
            current,
            state: ScanState::Scanning,
            last_merged_at: None,
            current_merged_at: None,
            candidates: vec![],
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ScanState::Done
    }

    pub fn current(&self) -> Option<u64> {
        self.current
    }

    /// Processes one page of the listing.
    pub fn feed(&mut self, page: Vec<PullRequest>) -> PageSummary {
        let mut summary = PageSummary::default();

        if self.is_done() {
            return summary;
        }

        if page.is_empty() {
            debug!("received empty page: scan complete");
            self.state = ScanState::Done;
            return summary;
        }

        if self.current.is_none() {
            let first = page[0].number;
            info!("no current PR given: using most recent PR #{first}");
            self.current = Some(first);
        }

        for pr in page {
            let Some(merged_at) = pr.merged_at else {
                summary.unmerged += 1;
                continue;
            };

            if pr.number == self.last {
                info!(" ... found last PR {}.", self.last);
                self.last_merged_at = Some(merged_at);
                self.state = ScanState::BoundaryFound;
                break;
            }

            if let Some(last_merged_at) = self.last_merged_at
                && pr.updated_at.is_some_and(|updated| updated < last_merged_at)
            {
                debug!(
                    "PR #{} updated before last PR merged: scan complete",
                    pr.number
                );
                self.state = ScanState::Done;
                break;
            }

            summary.merged += 1;

            if Some(pr.number) == self.current {
                info!(" ... found current PR {}.", pr.number);
                self.current_merged_at = Some(merged_at);
                continue;
            }

            self.candidates.push(pr);
        }

        info!(
            " ... {} merged PRs, {} unmerged PRs.",
            summary.merged, summary.unmerged
        );

        summary
    }

    /// Resolves the release window, failing when either boundary PR was
    /// never seen as merged.
    pub fn finish(self) -> Result<ScanOutcome> {
        let start = self
            .last_merged_at
            .ok_or_else(|| RelnoteError::boundary_not_found("last", self.last))?;

        // an empty listing never sets a default for current
        let current = self
            .current
            .ok_or_else(|| RelnoteError::boundary_not_found("current", 0))?;

        let end = self.current_merged_at.ok_or_else(|| {
            RelnoteError::boundary_not_found("current", current)
        })?;

        Ok(ScanOutcome {
            window: ReleaseWindow {
                last: self.last,
                current,
                start,
                end,
            },
            candidates: self.candidates,
        })
    }
}
