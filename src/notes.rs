//! Release note generation: scanning pull request history, selecting the PRs
//! merged between two boundary PRs and rendering them as bullet lines.

/// Fetch loop, label filtering and assembly of [`builder::ReleaseNotes`].
pub mod builder;

/// Note line rendering, sorting and window filtering.
pub mod format;

/// Pagination state machine locating the boundary PRs.
pub mod scanner;
