//! Configuration for the GitHub API connection.
use secrecy::SecretString;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Page size used when listing pull requests.
pub const DEFAULT_PAGE_SIZE: u8 = 100;
/// Label marking a pull request as worth mentioning in release notes.
pub const RELEASE_NOTE_LABEL: &str = "release-note";

/// Remote repository connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API base URL without trailing slash (e.g. "https://api.github.com").
    pub api_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

impl RemoteConfig {
    /// "owner/repo" path of the repository.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
