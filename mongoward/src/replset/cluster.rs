//! The database-cluster interface consumed by the bootstrapper.
//!
//! The wire-protocol client is an external collaborator; this crate only
//! needs to open a session, read the replica-set config, and issue a
//! single initiate. Tests substitute an in-memory implementation (see the
//! `pseudomongo` workspace crate).

use std::time::Duration;

use openraft_macros::add_async_trait;

use crate::errors::DialError;
use crate::errors::InitiateError;
use crate::replset::ConfigOutcome;
use crate::OptionalSend;
use crate::OptionalSync;

/// Parameters for dialing the database: target addresses, credentials and
/// the timeout every network operation must honor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct DialParams {
    /// Addresses to dial, `host:port`.
    pub addrs: Vec<String>,

    /// Timeout applied to dial, query and initiate individually. A timed
    /// out operation is a fatal error, never silently retried.
    pub timeout: Duration,

    /// Credentials, if the endpoint requires authentication.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DialParams {
    pub fn new(addrs: Vec<String>, timeout: Duration) -> Self {
        Self {
            addrs,
            timeout,
            username: None,
            password: None,
        }
    }
}

/// A factory for sessions against a database cluster.
#[add_async_trait]
pub trait Cluster: OptionalSend + OptionalSync + 'static {
    /// Actual type of a single open session.
    type Session: Session;

    /// Open a session to the endpoint described by `params`.
    ///
    /// A failure here is fatal to convergence: the supervisor reported
    /// the service as running, so an unreachable endpoint means the
    /// database is not actually serving.
    async fn connect(
        &mut self,
        params: &DialParams,
    ) -> Result<Self::Session, DialError>;
}

/// One open session to the database.
#[add_async_trait]
pub trait Session: OptionalSend + OptionalSync + 'static {
    /// Read the current replica-set configuration.
    ///
    /// The three outcomes are deliberately a tagged result rather than a
    /// sentinel error: only [`ConfigOutcome::NotFound`] triggers an
    /// initiate.
    async fn current_config(&mut self) -> ConfigOutcome;

    /// Initiate a replica set named `set_name` with `seed` (`host:port`)
    /// as its sole member.
    ///
    /// At most one initiate succeeds cluster-wide; a concurrent loser
    /// receives an error.
    async fn initiate(
        &mut self,
        seed: &str,
        set_name: &str,
    ) -> Result<(), InitiateError>;
}
