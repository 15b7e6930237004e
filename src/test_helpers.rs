//! Common test helper functions shared across test modules.
//!
//! This module provides reusable utilities for creating test fixtures and mock objects,
//! reducing code duplication across different test suites.
use chrono::{DateTime, TimeZone, Utc};
use secrecy::SecretString;
use std::rc::Rc;

use crate::{
    config::{RelnoteConfig, RelnoteConfigParamsBuilder},
    forge::{
        config::RemoteConfig,
        manager::{ForgeManager, ForgeOptions},
        request::PullRequest,
        traits::MockForge,
    },
};

const EPOCH_OFFSET: i64 = 1_700_000_000;

/// Timestamp `secs` seconds after a fixed reference instant.
///
/// # Example
/// ```ignore
/// assert!(at(1) > at(0));
/// ```
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(EPOCH_OFFSET + secs, 0).unwrap()
}

/// Creates a merged PullRequest, last updated at the moment it merged.
///
/// # Arguments
/// * `number` - PR number
/// * `merged` - merge time as seconds passed to [`at`]
pub fn merged_pr(number: u64, merged: i64) -> PullRequest {
    PullRequest {
        number,
        title: format!("Change {number}"),
        author: format!("dev{number}"),
        merged_at: Some(at(merged)),
        updated_at: Some(at(merged)),
    }
}

/// Creates a PullRequest that was closed without merging.
pub fn closed_pr(number: u64, updated: i64) -> PullRequest {
    PullRequest {
        number,
        title: format!("Abandoned {number}"),
        author: format!("dev{number}"),
        merged_at: None,
        updated_at: Some(at(updated)),
    }
}

/// Creates a test RemoteConfig with sensible defaults.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        api_url: "https://api.github.com".to_string(),
        owner: "test".to_string(),
        repo: "repo".to_string(),
        token: SecretString::from("test-token".to_string()),
    }
}

/// Config builder pre-populated for the "test/repo" repository with
/// `last` set to 10.
pub fn test_config_builder() -> RelnoteConfigParamsBuilder {
    let mut builder = RelnoteConfig::builder();
    builder
        .owner("test")
        .repository("repo")
        .token(SecretString::from("test-token".to_string()))
        .last(10u64);
    builder
}

/// MockForge answering `list_closed_prs` with the given pages (page 1 first)
/// and empty pages afterwards.
pub fn mock_forge_with_pages(pages: Vec<Vec<PullRequest>>) -> MockForge {
    let mut mock_forge = MockForge::new();
    mock_forge
        .expect_remote_config()
        .returning(create_test_remote_config);
    mock_forge.expect_list_closed_prs().returning(move |req| {
        let index = (req.page as usize).saturating_sub(1);
        Ok(pages.get(index).cloned().unwrap_or_default())
    });
    mock_forge
}

/// Wraps a MockForge in a ForgeManager.
pub fn create_test_forge_manager(
    mock_forge: MockForge,
    dry_run: bool,
) -> Rc<ForgeManager> {
    Rc::new(ForgeManager::new(
        Box::new(mock_forge),
        ForgeOptions { dry_run },
    ))
}
