//! Notifies the Podio workspace about one completed build of a job.
//!
//! Usage:
//!
//! ```text
//! notify_build <history-path> [build-number] [--repost]
//! ```
//!
//! `history-path` points at a JSON export of the job's builds:
//!
//! ```json
//! {
//!   "builds": [
//!     { "number": 41, "result": "SUCCESS" },
//!     {
//!       "number": 42,
//!       "result": "FAILURE",
//!       "url": "https://ci.example/job/app/42/",
//!       "duration_text": "3 min 4 sec",
//!       "culprits": [{ "display_name": "Alice", "email": "alice@example.com" }],
//!       "previous": 41
//!     }
//!   ]
//! }
//! ```
//!
//! The latest build is notified unless a number is given. `--repost`
//! refreshes the build's item without touching tasks. Connection settings
//! come from the `PODIO_*` environment variables; log verbosity from
//! `RUST_LOG`.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use mockable::DefaultClock;
use podio_notifier::build::{
    adapters::memory::{BuildHistoryLoadError, InMemoryBuildHistory},
    domain::{BuildDomainError, BuildNumber},
    ports::BuildHistory,
};
use podio_notifier::config::{ConfigError, NotifierSettings};
use podio_notifier::notifier::{
    BuildCompletionHandler, NotificationReport, NotifierError, services::BuildNotifier,
};
use podio_notifier::workspace::{adapters::rest::RestWorkspaceClient, ports::WorkspaceClientError};
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: notify_build <history-path> [build-number] [--repost]";

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("invalid build number: {0}")]
    BuildNumber(#[from] BuildDomainError),
    #[error("failed to read build history {path}: {source}")]
    HistoryRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    HistoryParse(#[from] BuildHistoryLoadError),
    #[error("build {0} is not in the history")]
    UnknownBuild(BuildNumber),
    #[error("the build history is empty")]
    EmptyHistory,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] WorkspaceClientError),
    #[error(transparent)]
    Notify(#[from] NotifierError),
}

#[derive(Debug)]
struct Invocation {
    history_path: Utf8PathBuf,
    build: Option<BuildNumber>,
    repost: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(env::args().skip(1)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err, CliError::InvalidArgs(_)) {
                error!("{USAGE}");
            }
            error!(error = %err, "build notification failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: impl Iterator<Item = String>) -> Result<(), CliError> {
    let invocation = parse_args(args)?;
    let config = NotifierSettings::from_env()?.validate()?;
    let history = load_history(&invocation.history_path)?;
    let build = match invocation.build {
        Some(number) => history.find(number).ok_or(CliError::UnknownBuild(number))?,
        None => history.latest().ok_or(CliError::EmptyHistory)?,
    };

    let client = RestWorkspaceClient::new(&config.endpoint, config.credentials.clone())?;
    let notifier = BuildNotifier::new(config, Arc::new(client), Arc::new(DefaultClock));

    if invocation.repost {
        let item_id = notifier.repost(build).await?;
        info!(build = %build.number(), %item_id, "re-posted build");
        return Ok(());
    }
    match notifier.on_build_completed(&history, build).await? {
        NotificationReport::Delivered(outcome) => info!(
            build = %outcome.build,
            item_id = %outcome.item_id,
            transition = ?outcome.tasks.transition,
            "workspace updated"
        ),
        NotificationReport::Abandoned { reason } => {
            warn!(build = %build.number(), %reason, "workspace left unchanged");
        }
    }
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Invocation, CliError> {
    let mut path_arg = None;
    let mut build = None;
    let mut repost = false;
    for arg in args {
        if arg == "--repost" {
            repost = true;
        } else if path_arg.is_none() {
            path_arg = Some(Utf8PathBuf::from(arg));
        } else if build.is_none() {
            let value = arg
                .parse::<u32>()
                .map_err(|_| CliError::InvalidArgs(format!("'{arg}' is not a build number")))?;
            build = Some(BuildNumber::new(value)?);
        } else {
            return Err(CliError::InvalidArgs(format!("unexpected argument '{arg}'")));
        }
    }
    let history_path =
        path_arg.ok_or_else(|| CliError::InvalidArgs("missing history path".to_owned()))?;
    Ok(Invocation {
        history_path,
        build,
        repost,
    })
}

fn load_history(path: &Utf8Path) -> Result<InMemoryBuildHistory, CliError> {
    let read_error = |source: std::io::Error| CliError::HistoryRead {
        path: path.to_owned(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let json = dir.read_to_string(file_name).map_err(read_error)?;
    Ok(InMemoryBuildHistory::from_json(&json)?)
}
