//! Command implementations.

/// Generate release notes and optionally publish them as a release.
pub mod generate;
