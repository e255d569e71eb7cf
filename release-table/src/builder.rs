//! The `builder` module contains the `UpdaterBuilder` struct which is used to create an `Updater`
//! instance.
use crate::{
    client::ReleaseClient,
    github::{self, GitHubClient},
    updater::Updater,
};
use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Client,
};
use std::env;
use thiserror::Error;
use url::Url;

/// The project whose releases are updated when no project is set.
pub const DEFAULT_PROJECT: &str = "cyverse/gocommands";

/// Configuration errors returned by [`UpdaterBuilder::build`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdaterError {
    #[error("You must set the version of the release to update")]
    MissingVersion,
    #[error("You must set a token or set the {0} environment variable")]
    MissingToken(&'static str),
}

/// `UpdaterBuilder` is used to create an [`Updater`] instance.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct UpdaterBuilder<'a> {
    version: Option<&'a str>,
    project: Option<&'a str>,
    token: Option<&'a str>,
    api_base_url: Option<&'a str>,
    dry_run: bool,
    client: Option<Box<dyn ReleaseClient>>,
}

impl<'a> UpdaterBuilder<'a> {
    /// Returns a new empty `UpdaterBuilder`.
    #[must_use]
    pub fn new() -> Self {
        UpdaterBuilder::default()
    }

    /// Set the tag of the release to update, like `v0.9.1`. This must match the tag exactly. This
    /// is required.
    #[must_use]
    pub fn version(mut self, version: &'a str) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the project whose release should be updated. This can either be just the owner/name,
    /// like `cyverse/gocommands`, or a URL to any page in the project, like
    /// `https://github.com/cyverse/gocommands/releases`. Defaults to [`DEFAULT_PROJECT`].
    #[must_use]
    pub fn project(mut self, project: &'a str) -> Self {
        self.project = Some(project);
        self
    }

    /// Set a token to use for API requests. If this is not set, then the token is taken from the
    /// `GITHUB_TOKEN` env var. Updating a release always requires a token.
    #[must_use]
    pub fn token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the base URL for the GitHub API. This is useful for testing or if you want to operate
    /// against GitHub Enterprise. This should be something like
    /// `https://github.my-corp.example.com/api/v3`.
    #[must_use]
    pub fn api_base_url(mut self, api_base_url: &'a str) -> Self {
        self.api_base_url = Some(api_base_url);
        self
    }

    /// Call this to build and report the table without changing the release.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Use the given client instead of talking to GitHub. When this is set, the `project`, `token`,
    /// and `api_base_url` settings are ignored.
    #[must_use]
    pub fn client(mut self, client: Box<dyn ReleaseClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds a new [`Updater`] instance and returns it.
    ///
    /// # Errors
    ///
    /// This returns an error if no version is set, if no token is set and the `GITHUB_TOKEN` env
    /// var is empty or unset, or if the project or API base URL cannot be parsed.
    pub fn build(self) -> Result<Updater<'a>> {
        let version = self
            .version
            .filter(|v| !v.is_empty())
            .ok_or(UpdaterError::MissingVersion)?;

        let client: Box<dyn ReleaseClient> = match self.client {
            Some(client) => client,
            None => Box::new(new_github_client(
                self.project.unwrap_or(DEFAULT_PROJECT),
                self.token,
                self.api_base_url,
            )?),
        };

        Ok(Updater::new(client, version, self.dry_run))
    }
}

fn new_github_client(
    project: &str,
    token: Option<&str>,
    api_base_url: Option<&str>,
) -> Result<GitHubClient> {
    let project_name = parse_project_name(project)?;
    let token = token_or_env(token)?;
    let api_base_url = if let Some(api_base_url) = api_base_url {
        Url::parse(api_base_url)
            .with_context(|| format!("could not parse the API base URL `{api_base_url}`"))?
    } else {
        github::DEFAULT_API_BASE_URL.clone()
    };
    debug!("API base URL = {api_base_url}");

    Ok(GitHubClient::new(
        project_name,
        api_base_url,
        token,
        reqwest_client()?,
    ))
}

fn parse_project_name(project: &str) -> Result<String> {
    let from = format!("--project {project}");
    let url = if project.starts_with("http") {
        Url::parse(project)?
    } else {
        github::PROJECT_BASE_URL.join(project)?
    };
    github::parse_project_name_from_url(&url, &from)
}

fn token_or_env(token: Option<&str>) -> Result<String> {
    if let Some(token) = token {
        return Ok(token.to_string());
    }

    let token = env::var(github::TOKEN_ENV_VAR)
        .ok()
        .filter(|t| !t.is_empty())
        .ok_or(UpdaterError::MissingToken(github::TOKEN_ENV_VAR))?;
    debug!(
        "Using GitHub token from the {} environment variable.",
        github::TOKEN_ENV_VAR,
    );
    Ok(token)
}

fn reqwest_client() -> Result<Client> {
    let builder = Client::builder().gzip(true);

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&format!("release-table version {}", super::VERSION))?,
    );
    Ok(builder.default_headers(headers).build()?)
}
