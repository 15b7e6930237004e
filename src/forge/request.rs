use chrono::{DateTime, Utc};

/// Author handle used when GitHub no longer knows the PR's user.
pub const GHOST_AUTHOR: &str = "ghost";

#[derive(Debug, Clone, Default, PartialEq)]
/// Closed pull request as returned by a forge listing.
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    /// None when the pull request was closed without merging.
    pub merged_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<octocrab::models::pulls::PullRequest> for PullRequest {
    fn from(pr: octocrab::models::pulls::PullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            author: pr
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| GHOST_AUTHOR.to_string()),
            merged_at: pr.merged_at,
            updated_at: pr.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Request for one page of closed pull requests against a base branch,
/// most recently updated first.
pub struct ListPrsRequest {
    pub base_branch: String,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u8,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to publish a new release.
pub struct CreateReleaseRequest {
    pub owner: String,
    pub repo: String,
    pub tag_name: String,
    pub name: String,
    pub prerelease: bool,
    pub body: String,
}
