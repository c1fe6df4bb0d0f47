//! Error types exposed by this crate.
//!
//! Every fatal condition carries the operation attempted and the target
//! name or address, so a failed convergence pass can be diagnosed without
//! retry logic in this crate. Retries are the caller's concern: every step
//! up to the point of failure is idempotent, so re-invoking the whole pass
//! is always safe.

use std::error::Error;

use anyerror::AnyError;

/// An error reported by a [`Supervisor`](crate::Supervisor) operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("SupervisorError: {source}")]
pub struct SupervisorError {
    #[from]
    source: AnyError,
}

impl SupervisorError {
    pub fn new<E: Error + 'static>(e: &E) -> Self {
        Self {
            source: AnyError::new(e),
        }
    }

    pub fn into_any(self) -> AnyError {
        self.source
    }
}

/// Opening a session to the database endpoint failed, e.g. connection
/// refused or the caller-supplied timeout elapsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("DialError: {source}")]
pub struct DialError {
    #[from]
    source: AnyError,
}

impl DialError {
    pub fn new<E: Error + 'static>(e: &E) -> Self {
        Self {
            source: AnyError::new(e),
        }
    }

    pub fn into_any(self) -> AnyError {
        self.source
    }
}

/// The remote rejected or failed a replica-set initiate operation.
///
/// This includes losing the initiate race against another node: the
/// cluster accepts at most one initiate, and the loser receives this.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("InitiateError: {source}")]
pub struct InitiateError {
    #[from]
    source: AnyError,
}

impl InitiateError {
    pub fn new<E: Error + 'static>(e: &E) -> Self {
        Self {
            source: AnyError::new(e),
        }
    }

    pub fn into_any(self) -> AnyError {
        self.source
    }
}

/// Filesystem failure while preparing the database journal.
///
/// Always raised before any service mutation; partial prealloc files are
/// left in place and overwritten on the next pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum JournalError {
    #[error("failed to create journal directory {dir}: {source}")]
    CreateDir { dir: String, source: AnyError },

    #[error("failed to preallocate journal file {path}: {source}")]
    Prealloc { path: String, source: AnyError },
}

/// Failure while converging replica-set membership.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum ReplSetError {
    /// The database endpoint could not be dialed. The supervisor may
    /// report the service as running while it is not actually serving.
    #[error("cannot dial {addrs:?} to inspect the replica set: {source}")]
    Connect { addrs: Vec<String>, source: AnyError },

    /// The config query failed with something other than "no config".
    #[error("failed to read replica-set config: {source}")]
    Query { source: AnyError },

    #[error("replica-set initiate with seed {seed} failed: {source}")]
    Initiate { seed: String, source: AnyError },
}

/// The first fatal error encountered by a convergence pass.
///
/// There is no partial-success value: the pass either fully converges or
/// returns one of these, leaving the system in whatever state the failed
/// step left it, which is always safe to resume from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum EnsureError {
    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error("failed to remove stale service {name}: {source}")]
    Migration { name: String, source: AnyError },

    #[error("failed to install service {name}: {source}")]
    Install { name: String, source: AnyError },

    #[error("failed to start service {name}: {source}")]
    Start { name: String, source: AnyError },

    #[error(transparent)]
    ReplSet(#[from] ReplSetError),
}
