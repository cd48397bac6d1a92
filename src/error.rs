//! Error types for a shutdown sweep.

use thiserror::Error;

/// Errors that abort a sweep. The first one raised ends the invocation.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Listing the DB instance inventory failed; nothing was stopped.
    #[error("Failed to describe DB instances: {0}")]
    ProviderQuery(String),

    /// A stop request was rejected; instances after this one were not attempted.
    #[error("Failed to stop DB instance {identifier}: {message}")]
    ProviderCommand { identifier: String, message: String },
}

impl SweepError {
    pub fn query<E: std::fmt::Display>(err: E) -> Self {
        Self::ProviderQuery(single_line(&err.to_string()))
    }

    pub fn command<E: std::fmt::Display>(identifier: &str, err: E) -> Self {
        Self::ProviderCommand {
            identifier: identifier.to_string(),
            message: single_line(&err.to_string()),
        }
    }

    /// Identifier of the instance whose stop request failed, if any
    pub fn failed_instance(&self) -> Option<&str> {
        match self {
            Self::ProviderQuery(_) => None,
            Self::ProviderCommand { identifier, .. } => Some(identifier),
        }
    }
}

// SDK error contexts span several lines, which breaks one-event-per-line JSON logs
fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
