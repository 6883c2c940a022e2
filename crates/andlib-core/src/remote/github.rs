//! GitHub API provider

use super::{RemoteAuth, RemoteOrg, RemoteProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("andlib/", env!("CARGO_PKG_VERSION"));

/// GitHub remote backed by the REST API
pub struct GithubRemote {
    client: reqwest::Client,
    base_url: Url,
    auth: RemoteAuth,
}

#[derive(Debug, Deserialize)]
struct OrgSummary {
    login: String,
}

impl GithubRemote {
    /// Create a provider against api.github.com
    pub fn new(auth: RemoteAuth) -> Result<Self> {
        Self::with_base_url(auth, DEFAULT_API_URL)
    }

    /// Create a provider against a custom API base (GitHub Enterprise, tests)
    pub fn with_base_url(auth: RemoteAuth, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", self.base_url))?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            RemoteAuth::Token(token) => {
                request.header("Authorization", format!("token {}", token))
            }
            RemoteAuth::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }
}

#[async_trait]
impl RemoteProvider for GithubRemote {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn list_orgs(&self) -> Result<Vec<RemoteOrg>> {
        let url = self.endpoint("user/orgs")?;
        let response = self
            .authorize(self.client.get(url.clone()))
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to list organizations from {}: HTTP {}",
                url,
                response.status()
            );
        }

        let orgs: Vec<OrgSummary> = response
            .json()
            .await
            .context("Failed to parse organization listing")?;
        Ok(orgs
            .into_iter()
            .map(|org| RemoteOrg { login: org.login })
            .collect())
    }
}
