//! Run configuration: the optional `relnote.toml` file and the immutable
//! [`RelnoteConfig`] resolved from it and the command line.
use derive_builder::Builder;
use log::*;
use serde::Deserialize;
use std::{path::Path, path::PathBuf, time::Duration};
use url::Url;

use crate::{
    RelnoteError, Result,
    forge::config::{DEFAULT_API_URL, RemoteConfig},
    notes::format::DEFAULT_NOTE_TEMPLATE,
    throttle::{DEFAULT_LABEL_INTERVAL, MAX_LABEL_INTERVAL},
};

/// Base branch used when none is configured.
pub const DEFAULT_BASE_BRANCH: &str = "master";

/// Settings that may be kept in a TOML file next to the repository. Command
/// line flags take precedence over every value here.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub owner: Option<String>,
    pub repository: Option<String>,
    pub base: Option<String>,
    pub api_url: Option<String>,
    pub relnote_filter: Option<bool>,
    pub label_interval_secs: Option<u64>,
    pub note_template: Option<String>,
    pub release_owner: Option<String>,
    pub release_repository: Option<String>,
    pub prerelease: Option<bool>,
}

impl FileConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        info!("loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Parameters for [`RelnoteConfig`], assembled through the generated
/// builder.
#[derive(Debug, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct RelnoteConfigParams {
    pub owner: String,
    pub repository: String,
    pub token: secrecy::SecretString,
    pub last: u64,
    #[builder(default)]
    pub current: Option<u64>,
    #[builder(default)]
    pub base: Option<String>,
    #[builder(default)]
    pub api_url: Option<String>,
    #[builder(default)]
    pub relnote_filter: bool,
    #[builder(default)]
    pub label_interval_secs: Option<u64>,
    #[builder(default)]
    pub note_template: Option<String>,
    #[builder(default)]
    pub release_name: Option<String>,
    #[builder(default)]
    pub tag_name: Option<String>,
    #[builder(default)]
    pub prerelease: bool,
    #[builder(default)]
    pub release_owner: Option<String>,
    #[builder(default)]
    pub release_repository: Option<String>,
    #[builder(default)]
    pub out_file: Option<PathBuf>,
    #[builder(default)]
    pub dry_run: bool,
}

impl RelnoteConfigParamsBuilder {
    pub fn build(&self) -> Result<RelnoteConfig> {
        let params = self._build().map_err(|e| {
            RelnoteError::invalid_config(format!(
                "Failed to build configuration: {}",
                e
            ))
        })?;
        RelnoteConfig::new(params)
    }
}

/// Target of the optional release publication.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseTarget {
    pub owner: String,
    pub repository: String,
    pub tag_name: Option<String>,
    pub release_name: Option<String>,
    pub prerelease: bool,
}

/// Fully resolved, immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct RelnoteConfig {
    pub remote: RemoteConfig,
    pub base_branch: String,
    pub last: u64,
    pub current: Option<u64>,
    pub relnote_filter: bool,
    pub label_interval: Duration,
    pub note_template: String,
    pub release: ReleaseTarget,
    pub out_file: Option<PathBuf>,
    pub dry_run: bool,
}

impl RelnoteConfig {
    pub fn builder() -> RelnoteConfigParamsBuilder {
        RelnoteConfigParamsBuilder::default()
    }

    pub fn new(params: RelnoteConfigParams) -> Result<Self> {
        if params.owner.is_empty() || params.repository.is_empty() {
            return Err(RelnoteError::invalid_config(
                "owner and repository must not be empty",
            ));
        }

        if params.last == 0 {
            return Err(RelnoteError::invalid_config(
                "last PR number must be greater than 0",
            ));
        }

        let api_url = Self::resolve_api_url(params.api_url.as_deref())?;

        let label_interval = params
            .label_interval_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LABEL_INTERVAL);

        if label_interval > MAX_LABEL_INTERVAL {
            return Err(RelnoteError::invalid_config(format!(
                "label interval must be at most {} seconds",
                MAX_LABEL_INTERVAL.as_secs()
            )));
        }

        let release = ReleaseTarget {
            owner: params
                .release_owner
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| params.owner.clone()),
            repository: params
                .release_repository
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| params.repository.clone()),
            tag_name: params.tag_name.filter(|t| !t.is_empty()),
            release_name: params.release_name.filter(|n| !n.is_empty()),
            prerelease: params.prerelease,
        };

        Ok(Self {
            remote: RemoteConfig {
                api_url,
                owner: params.owner,
                repo: params.repository,
                token: params.token,
            },
            base_branch: params
                .base
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string()),
            last: params.last,
            current: params.current.filter(|c| *c != 0),
            relnote_filter: params.relnote_filter,
            label_interval,
            note_template: params
                .note_template
                .unwrap_or_else(|| DEFAULT_NOTE_TEMPLATE.to_string()),
            release,
            out_file: params.out_file,
            dry_run: params.dry_run,
        })
    }

    /// Validates the API url and strips any trailing slash.
    fn resolve_api_url(api_url: Option<&str>) -> Result<String> {
        let raw = api_url.unwrap_or(DEFAULT_API_URL);
        let parsed = Url::parse(raw)?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(RelnoteError::invalid_config(format!(
                    "unsupported api url scheme: {other}"
                )));
            }
        }

        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }
}
