pub mod auth;
pub mod feed;
pub mod groups;
pub mod profile;
pub mod stories;

use kinship::ClientError;

/// Marker for failures the notifier has already shown; `main` only sets the exit code.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub ClientError);

pub type Result<T> = anyhow::Result<T>;

/// Converts an interaction failure, which the notifier has already printed.
pub fn reported(err: ClientError) -> anyhow::Error {
    Reported(err).into()
}
