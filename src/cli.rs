//! CLI argument parsing and resolution into a [`RelnoteConfig`].
use clap::Parser;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    RelnoteError, Result,
    config::{FileConfig, RelnoteConfig},
};

/// Environment variable consulted when no token flag is given.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

const USAGE: &str = "usage: relnote --last=<number> --current=<number> --token=<token> [--base=<branch-name>]";

const RELEASE_USAGE: &str = "usage: relnote --release-name=<releaseName> --tag-name=<tagName> [--pre-release]";

/// Generate release notes from pull requests merged between two PRs and
/// optionally publish them as a GitHub release.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long)]
    /// Repository name.
    pub repository: Option<String>,

    #[arg(long)]
    /// Repository owner.
    pub owner: Option<String>,

    #[arg(long)]
    /// The PR number of the last versioned release.
    pub last: Option<u64>,

    #[arg(long)]
    /// The PR number of the current versioned release. Defaults to the most
    /// recently updated closed PR.
    pub current: Option<u64>,

    #[arg(long)]
    /// GitHub API token. Falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,

    #[arg(long)]
    /// The base branch name for PRs to look for [default: master].
    pub base: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Only include PRs labelled "release-note".
    pub relnote_filter: bool,

    #[arg(long, alias = "releaseName")]
    /// Name of the release to publish.
    pub release_name: Option<String>,

    #[arg(long, alias = "tagName")]
    /// Tag of the release to publish.
    pub tag_name: Option<String>,

    #[arg(long, alias = "preRelease", default_value_t = false)]
    /// Mark the published release as a prerelease.
    pub pre_release: bool,

    #[arg(long)]
    /// Owner of the repository receiving the release. Defaults to --owner.
    pub release_owner: Option<String>,

    #[arg(long)]
    /// Repository receiving the release. Defaults to --repository.
    pub release_repository: Option<String>,

    #[arg(long)]
    /// GitHub API base URL, for GitHub Enterprise.
    pub api_url: Option<String>,

    #[arg(long)]
    /// Seconds between label lookups when filtering by label [default: 5].
    pub label_interval_secs: Option<u64>,

    #[arg(long)]
    /// Also write the generated notes to this file.
    pub out_file: Option<PathBuf>,

    #[arg(long)]
    /// Path to a TOML configuration file.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Generate notes and log the release instead of creating it.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Loads the optional config file and resolves the final configuration,
    /// reading the token from the environment when not given as a flag.
    pub async fn into_config(self) -> Result<RelnoteConfig> {
        let file_config = match self.config.as_deref() {
            Some(path) => FileConfig::load(path).await?,
            None => FileConfig::default(),
        };

        let env_token = env::var(TOKEN_ENV_VAR).ok();

        self.resolve(file_config, env_token)
    }

    /// Merges flags over file values. Fails before any network access when a
    /// required value is missing.
    pub fn resolve(
        self,
        file: FileConfig,
        env_token: Option<String>,
    ) -> Result<RelnoteConfig> {
        let last = self
            .last
            .filter(|l| *l != 0)
            .ok_or_else(|| RelnoteError::invalid_args(USAGE))?;

        let token = self
            .token
            .filter(|t| !t.is_empty())
            .or(env_token.filter(|t| !t.is_empty()))
            .ok_or_else(|| RelnoteError::invalid_args(USAGE))?;

        let owner = self
            .owner
            .or(file.owner)
            .ok_or_else(|| RelnoteError::invalid_args("must set --owner"))?;

        let repository = self.repository.or(file.repository).ok_or_else(
            || RelnoteError::invalid_args("must set --repository"),
        )?;

        RelnoteConfig::builder()
            .owner(owner)
            .repository(repository)
            .token(SecretString::from(token))
            .last(last)
            .current(self.current)
            .base(self.base.or(file.base))
            .api_url(self.api_url.or(file.api_url))
            .relnote_filter(
                self.relnote_filter || file.relnote_filter.unwrap_or(false),
            )
            .label_interval_secs(
                self.label_interval_secs.or(file.label_interval_secs),
            )
            .note_template(file.note_template)
            .release_name(self.release_name)
            .tag_name(self.tag_name)
            .prerelease(self.pre_release || file.prerelease.unwrap_or(false))
            .release_owner(self.release_owner.or(file.release_owner))
            .release_repository(
                self.release_repository.or(file.release_repository),
            )
            .out_file(self.out_file)
            .dry_run(self.dry_run)
            .build()
    }
}

/// Usage error raised when publication was requested without a tag name or
/// release name.
pub fn release_usage_error() -> RelnoteError {
    RelnoteError::invalid_args(RELEASE_USAGE)
}
