use crate::{
    client::ReleaseClient,
    release::find_release,
    table::{append_table, build_table, has_table},
};
use anyhow::{Context, Result};
use log::{debug, info};

/// `Updater` adds a release assets table to a single release. Use the
/// [`UpdaterBuilder`](crate::UpdaterBuilder) struct to create a new `Updater` instance.
#[derive(Debug)]
pub struct Updater<'a> {
    client: Box<dyn ReleaseClient>,
    version: &'a str,
    dry_run: bool,
}

/// What [`Updater::run`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No release has a tag equal to the requested version. Nothing was changed.
    NotFound,
    /// The release description already contains a table, so it was left alone.
    AlreadyPresent { table: String },
    /// The table was appended to the release description.
    Updated { table: String },
    /// The release needs a table, but this was a dry run so nothing was changed.
    DryRun { table: String },
}

impl Outcome {
    /// Returns the generated table, if the release was found.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            Outcome::NotFound => None,
            Outcome::AlreadyPresent { table }
            | Outcome::Updated { table }
            | Outcome::DryRun { table } => Some(table),
        }
    }
}

impl<'a> Updater<'a> {
    pub(crate) fn new(client: Box<dyn ReleaseClient>, version: &'a str, dry_run: bool) -> Self {
        Self {
            client,
            version,
            dry_run,
        }
    }

    /// Fetches all releases, finds the one tagged with this updater's version, and appends a table
    /// of its assets to its description unless the description already has one.
    ///
    /// Not finding the release is not an error. It's reported as [`Outcome::NotFound`].
    ///
    /// # Errors
    ///
    /// This returns an error if either request to the forge site fails, including when the site
    /// responds with a non-success status. Nothing is retried.
    pub async fn run(&self) -> Result<Outcome> {
        let releases = self
            .client
            .list_releases()
            .await
            .context("could not fetch the list of releases")?;

        let Some(release) = find_release(&releases, self.version) else {
            info!(
                "none of the {} releases has the tag `{}`",
                releases.len(),
                self.version,
            );
            return Ok(Outcome::NotFound);
        };
        debug!("found release {} for `{}`", release.id, self.version);

        let table = build_table(release);
        let body = release.body();
        if has_table(body) {
            info!("release `{}` already has an assets table", self.version);
            return Ok(Outcome::AlreadyPresent { table });
        }

        if self.dry_run {
            info!("not updating release `{}` for a dry run", self.version);
            return Ok(Outcome::DryRun { table });
        }

        self.client
            .patch_release_body(release.id, &append_table(body, &table))
            .await
            .with_context(|| format!("could not update release `{}`", self.version))?;
        info!("updated the description of release `{}`", self.version);

        Ok(Outcome::Updated { table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::{Asset, Release};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use test_log::test;
    use url::Url;

    #[derive(Debug, Default)]
    struct FakeClient {
        releases: Vec<Release>,
        fail_patch: bool,
        patches: Arc<Mutex<Vec<(u64, String)>>>,
    }

    #[async_trait]
    impl ReleaseClient for FakeClient {
        async fn list_releases(&self) -> Result<Vec<Release>> {
            Ok(self.releases.clone())
        }

        async fn patch_release_body(&self, id: u64, body: &str) -> Result<()> {
            if self.fail_patch {
                return Err(anyhow!("403 Forbidden"));
            }
            self.patches.lock().unwrap().push((id, body.to_string()));
            Ok(())
        }
    }

    #[derive(Debug)]
    struct FailingClient;

    #[async_trait]
    impl ReleaseClient for FailingClient {
        async fn list_releases(&self) -> Result<Vec<Release>> {
            Err(anyhow!("401 Unauthorized"))
        }

        async fn patch_release_body(&self, _id: u64, _body: &str) -> Result<()> {
            panic!("patch_release_body should not be called");
        }
    }

    fn release(id: u64, tag_name: &str, body: Option<&str>, names: &[&str]) -> Result<Release> {
        let assets = names
            .iter()
            .map(|n| -> Result<Asset> {
                Ok(Asset {
                    name: (*n).to_string(),
                    url: Url::parse(&format!("https://example.com/{tag_name}/{n}"))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Release {
            id,
            tag_name: tag_name.to_string(),
            body: body.map(String::from),
            assets,
        })
    }

    fn fake(releases: Vec<Release>) -> (FakeClient, Arc<Mutex<Vec<(u64, String)>>>) {
        let patches = Arc::new(Mutex::new(vec![]));
        (
            FakeClient {
                releases,
                fail_patch: false,
                patches: patches.clone(),
            },
            patches,
        )
    }

    #[test(tokio::test)]
    async fn appends_table_once() -> Result<()> {
        let (client, patches) = fake(vec![
            release(1, "v0", Some("Old."), &["x-linux-amd64.zip"])?,
            release(
                2,
                "v1",
                Some("Notes."),
                &["x-linux-amd64.zip", "x-linux-amd64.zip.md5"],
            )?,
        ]);

        let outcome = Updater::new(Box::new(client), "v1", false).run().await?;
        let expect_table = concat!(
            "### Release Assets\n",
            "| OS | Architecture | Link |\n",
            "|---------|----------|-------------|\n",
            "| Linux  | Intel/AMD 64-bit  | [Download](https://example.com/v1/x-linux-amd64.zip) |\n",
        );
        assert_eq!(
            outcome,
            Outcome::Updated {
                table: expect_table.to_string()
            },
        );

        let patches = patches.lock().unwrap();
        assert_eq!(
            *patches,
            vec![(2, format!("Notes.\n\n{expect_table}"))],
            "exactly one patch of release 2",
        );

        Ok(())
    }

    #[test(tokio::test)]
    async fn missing_body_is_treated_as_empty() -> Result<()> {
        let (client, patches) = fake(vec![release(5, "v1", None, &["x-darwin-arm64.tar.gz"])?]);

        let outcome = Updater::new(Box::new(client), "v1", false).run().await?;
        let table = outcome.table().expect("release was found").to_string();

        assert_eq!(*patches.lock().unwrap(), vec![(5, format!("\n\n{table}"))]);

        Ok(())
    }

    #[test(tokio::test)]
    async fn existing_table_is_not_patched() -> Result<()> {
        let body = "Notes.\n\n### Release Assets\n| OS | Architecture | Link |\n";
        let (client, patches) = fake(vec![release(
            2,
            "v1",
            Some(body),
            &["x-linux-amd64.zip"],
        )?]);

        let outcome = Updater::new(Box::new(client), "v1", false).run().await?;
        assert!(matches!(outcome, Outcome::AlreadyPresent { .. }), "{outcome:?}");
        assert!(patches.lock().unwrap().is_empty());

        Ok(())
    }

    #[test(tokio::test)]
    async fn second_run_does_not_patch_again() -> Result<()> {
        let (client, patches) = fake(vec![release(
            2,
            "v1",
            Some("Notes."),
            &["x-linux-amd64.zip"],
        )?]);
        Updater::new(Box::new(client), "v1", false).run().await?;

        let patched_body = patches.lock().unwrap()[0].1.clone();
        let (client, patches) = fake(vec![release(
            2,
            "v1",
            Some(patched_body.as_str()),
            &["x-linux-amd64.zip"],
        )?]);
        let outcome = Updater::new(Box::new(client), "v1", false).run().await?;

        assert!(matches!(outcome, Outcome::AlreadyPresent { .. }), "{outcome:?}");
        assert!(patches.lock().unwrap().is_empty());

        Ok(())
    }

    #[test(tokio::test)]
    async fn release_not_found() -> Result<()> {
        let (client, patches) = fake(vec![
            release(1, "V1", Some(""), &[])?,
            release(2, "v1.0", Some(""), &[])?,
        ]);

        let outcome = Updater::new(Box::new(client), "v1", false).run().await?;
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(outcome.table(), None);
        assert!(patches.lock().unwrap().is_empty());

        Ok(())
    }

    #[test(tokio::test)]
    async fn dry_run_does_not_patch() -> Result<()> {
        let (client, patches) = fake(vec![release(
            2,
            "v1",
            Some("Notes."),
            &["x-linux-amd64.zip"],
        )?]);

        let outcome = Updater::new(Box::new(client), "v1", true).run().await?;
        assert!(matches!(outcome, Outcome::DryRun { .. }), "{outcome:?}");
        assert!(outcome.table().is_some_and(|t| t.contains("x-linux-amd64.zip")));
        assert!(patches.lock().unwrap().is_empty());

        Ok(())
    }

    #[test(tokio::test)]
    async fn list_failure_aborts() -> Result<()> {
        let res = Updater::new(Box::new(FailingClient), "v1", false).run().await;
        let err = res.expect_err("listing failure is an error");
        assert!(format!("{err:#}").contains("401 Unauthorized"), "{err:#}");
        Ok(())
    }

    #[test(tokio::test)]
    async fn patch_failure_is_an_error() -> Result<()> {
        let client = FakeClient {
            releases: vec![release(2, "v1", Some("Notes."), &["x-linux-amd64.zip"])?],
            fail_patch: true,
            ..Default::default()
        };

        let res = Updater::new(Box::new(client), "v1", false).run().await;
        let err = res.expect_err("patch failure is an error");
        assert!(format!("{err:#}").contains("403 Forbidden"), "{err:#}");

        Ok(())
    }
}
