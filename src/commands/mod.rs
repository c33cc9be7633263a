//! CLI commands. Each one builds its requests, calls the API and settles
//! the outcome right here: results are printed, failures become the
//! command's error, and a missing or rejected credential asks the user to
//! sign in.

use std::fmt;

use crate::http::{Outcome, RequestError};

pub mod config;
mod chat;
mod dashboard;
mod languages;
mod location;
mod session;
mod speak;
mod translate;

pub use chat::{chat, render_message};
pub use dashboard::{preferences, recent, render_recent, render_stats, stats};
pub use languages::{languages, render_languages};
pub use location::detect_location;
pub use session::{login, logout, status};
pub use speak::speak;
pub use translate::translate;

/// Returned when a request needs the user to sign in (again).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignInRequired;

impl fmt::Display for SignInRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. Run `parlance login` to sign in.",
            RequestError::Unauthenticated
        )
    }
}

impl std::error::Error for SignInRequired {}

/// Turns an outcome into the command's result.
pub(crate) fn resolve<T>(outcome: Outcome<T>) -> anyhow::Result<T> {
    outcome.into_result().map_err(|e| match e {
        RequestError::Unauthenticated => anyhow::Error::new(SignInRequired),
        failure => anyhow::Error::new(failure),
    })
}
