//! Hosted Git API providers used for the fork organization selection

pub mod github;

pub use github::GithubRemote;

use anyhow::Result;
use async_trait::async_trait;

/// Default remote name when `--git-fork` is given without a value
pub const DEFAULT_REMOTE: &str = "github";

/// Environment variable consulted for the remote API token
pub const REMOTE_TOKEN_ENV: &str = "GITREMOTE_TOKEN";

/// An organization the authenticated user belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOrg {
    pub login: String,
}

/// Credentials for a hosted Git API
#[derive(Debug, Clone)]
pub enum RemoteAuth {
    Token(String),
    Basic { username: String, password: String },
}

/// Minimal surface of a hosted Git API. The generator only needs to list the
/// organizations a fork could land in; everything else stays with the host.
#[async_trait]
pub trait RemoteProvider {
    /// Remote name used in the derived Maven group (e.g. "github")
    fn name(&self) -> &'static str;

    /// Organizations available to the authenticated user
    async fn list_orgs(&self) -> Result<Vec<RemoteOrg>>;
}

/// Maven group for a fork organization, e.g. `com.github.myorg`
pub fn group_id(remote: &str, org: &str) -> String {
    format!("com.{}.{}", remote, org)
}
