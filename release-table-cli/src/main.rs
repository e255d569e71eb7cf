use anyhow::{Error, Result};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use log::error;
use release_table::{Outcome, Updater, UpdaterBuilder, DEFAULT_PROJECT};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0:}")]
    InvalidArgsError(String),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cmd = cmd();
    let matches = cmd.get_matches();
    let res = init_logger_from_matches(&matches);
    if let Err(e) = res {
        eprintln!("Error creating logger: {e}");
        std::process::exit(126);
    }

    let status = match make_updater(&matches) {
        Ok(u) => match u.run().await {
            Ok(outcome) => {
                report(&outcome, version(&matches));
                0
            }
            Err(e) => {
                print_err(&e);
                1
            }
        },
        Err(e) => {
            print_err(&e);
            127
        }
    };
    std::process::exit(status);
}

const MAX_TERM_WIDTH: usize = 100;

fn cmd() -> Command {
    Command::new("update-release-table")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Appends a table of a release's downloadable assets to its description")
        .after_help(concat!(
            "The GitHub token is read from the GITHUB_TOKEN environment variable. It needs",
            " permission to edit releases in the project.",
        ))
        .arg(
            Arg::new("release-version")
                .required(true)
                .value_name("VERSION")
                .help("The tag of the release to update, like v0.9.1. This must match exactly."),
        )
        .arg(
            Arg::new("project")
                .long("project")
                .short('p')
                .default_value(DEFAULT_PROJECT)
                .help(concat!(
                    "The project whose release should be updated, like cyverse/gocommands",
                    " or https://github.com/cyverse/gocommands.",
                )),
        )
        .arg(Arg::new("api-base-url").long("api-base-url").help(concat!(
            "The base URL for the GitHub API. This is useful for testing or if you want to",
            " operate against GitHub Enterprise. This should be something like",
            " `https://github.my-corp.example.com/api/v3`.",
        )))
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .action(ArgAction::SetTrue)
                .help("Print the table without updating the release."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output."),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debugging output."),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppresses most output."),
        )
        .group(ArgGroup::new("log-level").args(["verbose", "debug", "quiet"]))
        .max_term_width(MAX_TERM_WIDTH)
}

pub(crate) fn init_logger_from_matches(matches: &ArgMatches) -> Result<(), log::SetLoggerError> {
    let level = if matches.get_flag("debug") {
        log::LevelFilter::Debug
    } else if matches.get_flag("verbose") {
        log::LevelFilter::Info
    } else if matches.get_flag("quiet") {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };

    release_table::init_logger(level)
}

fn version(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("release-version")
        .map(String::as_str)
        .unwrap_or_default()
}

fn make_updater(matches: &ArgMatches) -> Result<Updater<'_>> {
    validate_args(matches)?;

    let mut builder = UpdaterBuilder::new().version(version(matches));
    if let Some(p) = matches.get_one::<String>("project") {
        builder = builder.project(p);
    }
    if let Some(url) = matches.get_one::<String>("api-base-url") {
        builder = builder.api_base_url(url);
    }
    if matches.get_flag("dry-run") {
        builder = builder.dry_run();
    }

    builder.build()
}

fn validate_args(matches: &ArgMatches) -> Result<()> {
    if version(matches).trim().is_empty() {
        return Err(CliError::InvalidArgsError(
            "The VERSION argument cannot be empty.".to_string(),
        )
        .into());
    }

    Ok(())
}

fn report(outcome: &Outcome, version: &str) {
    match outcome {
        Outcome::NotFound => println!("Release with version {version} not found."),
        Outcome::Updated { table } => {
            println!("{table}");
            println!("Release {version} updated successfully.");
        }
        Outcome::AlreadyPresent { table } => {
            println!("{table}");
            println!("Release {version} already has a release assets table.");
        }
        Outcome::DryRun { table } => {
            println!("{table}");
            println!("Dry run: release {version} was not updated.");
        }
    }
}

fn print_err(e: &Error) {
    error!("{e:#}");
    if let Some(ce) = e.downcast_ref::<CliError>() {
        match ce {
            CliError::InvalidArgsError(_) => {
                println!();
                cmd().print_help().unwrap();
            }
        }
    }
}
