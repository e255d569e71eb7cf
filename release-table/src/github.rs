use crate::{client::ReleaseClient, release::Release};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION},
    Client, Method, RequestBuilder, Response,
};
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

pub(crate) static DEFAULT_API_BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://api.github.com").unwrap());

pub(crate) static PROJECT_BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://github.com").unwrap());

pub(crate) const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

const GITHUB_V3_JSON: &str = "application/vnd.github.v3+json";

/// A [`ReleaseClient`] for the GitHub REST API.
#[derive(Debug)]
pub struct GitHubClient {
    project_name: String,
    api_base_url: Url,
    token: String,
    reqwest_client: Client,
}

#[derive(Debug, Serialize)]
struct ReleasePatch<'a> {
    body: &'a str,
}

#[async_trait]
impl ReleaseClient for GitHubClient {
    async fn list_releases(&self) -> Result<Vec<Release>> {
        let url = self.api_url(&["releases"])?;
        debug!("Listing releases for `{}` from `{url}`", self.project_name);

        let resp = self.send(self.request(Method::GET, url.clone())?).await?;
        let releases = resp
            .json::<Vec<Release>>()
            .await
            .with_context(|| format!("could not parse the releases returned by {url}"))?;
        debug!("Got {} releases", releases.len());

        Ok(releases)
    }

    async fn patch_release_body(&self, id: u64, body: &str) -> Result<()> {
        let url = self.api_url(&["releases", &id.to_string()])?;
        debug!("Updating the body of release {id} at `{url}`");

        let req_builder = self
            .request(Method::PATCH, url)?
            .json(&ReleasePatch { body });
        self.send(req_builder).await?;

        Ok(())
    }
}

impl GitHubClient {
    /// Creates a client for the project named `project_name`, which must be in `owner/repo` form.
    pub(crate) fn new(
        project_name: String,
        api_base_url: Url,
        token: String,
        reqwest_client: Client,
    ) -> Self {
        Self {
            project_name,
            api_base_url,
            token,
            reqwest_client,
        }
    }

    fn api_url(&self, trailing: &[&str]) -> Result<Url> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("the API base URL `{}` cannot be a base", self.api_base_url))?
            .pop_if_empty()
            .push("repos")
            .extend(self.project_name.split('/'))
            .extend(trailing);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let req_builder = self
            .reqwest_client
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static(GITHUB_V3_JSON));
        self.add_token_header(req_builder)
    }

    fn add_token_header(&self, req_builder: RequestBuilder) -> Result<RequestBuilder> {
        debug!("Adding GitHub token to GitHub request.");
        let bearer = format!("Bearer {}", self.token);
        let mut auth_val = HeaderValue::from_str(&bearer)
            .context("the GitHub token cannot be used in an HTTP header")?;
        auth_val.set_sensitive(true);
        Ok(req_builder.header(AUTHORIZATION, auth_val))
    }

    async fn send(&self, req_builder: RequestBuilder) -> Result<Response> {
        let req = req_builder
            .build()
            .context("failed to build HTTP request")?;
        let method = req.method().clone();
        let url = req.url().clone();

        let resp = self
            .reqwest_client
            .execute(req)
            .await
            .with_context(|| format!("failed to execute HTTP {method} request to {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let mut msg = format!("error requesting {method} {url}: {status}");
            if let Ok(t) = resp.text().await {
                msg.push('\n');
                msg.push_str(&t);
            }
            return Err(anyhow!(msg));
        }

        Ok(resp)
    }
}

/// Parses the `owner/repo` project name out of a URL for any page in a GitHub project, like
/// `https://github.com/cyverse/gocommands/releases`.
pub(crate) fn parse_project_name_from_url(url: &Url, from: &str) -> Result<String> {
    let parts = url.path().split('/').collect::<Vec<_>>();
    // The first part is an empty string for the leading '/' in the path.
    if parts.len() < 3 || parts[1].is_empty() || parts[2].is_empty() {
        return Err(anyhow!("could not parse owner and repo name from {from}"));
    }

    let (owner, repo) = (parts[1], parts[2]);
    debug!("Parsed {from} = {owner} / {repo}");

    Ok(format!("{owner}/{repo}"))
}
