//! Access to the GitHub API for listing pull requests, reading their labels
//! and publishing releases.

/// Connection settings and API constants.
pub mod config;

/// GitHub API client implementation backed by octocrab.
pub mod github;

/// Wrapper adding logging and dry-run handling around a [`traits::Forge`].
pub mod manager;

/// Request and response types exchanged with the forge.
pub mod request;

/// Common trait for forge platform abstraction.
pub mod traits;
