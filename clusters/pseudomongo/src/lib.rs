use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use mongoward::errors::DialError;
use mongoward::errors::InitiateError;
use mongoward::replset::Member;
use mongoward::AnyError;
use mongoward::Cluster;
use mongoward::ConfigOutcome;
use mongoward::DialParams;
use mongoward::ReplicaSetConfig;
use mongoward::Session;
use tokio::sync::Barrier;
use tracing::debug;

/// Operation counters, for asserting how often the engine touched the
/// cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub dials: u64,
    pub queries: u64,
    pub initiates: u64,
}

#[derive(Debug, Default)]
struct State {
    config: Option<ReplicaSetConfig>,

    refuse_dial: bool,
    dial_delay: Option<Duration>,
    query_error: Option<String>,

    counts: Counts,
}

/// A scripted in-memory database cluster.
///
/// Implements the arbitration a real cluster performs on concurrent
/// bootstrap: the first initiate establishes the configuration, every
/// later one fails. Cloning shares state, so one instance can serve as
/// "the cluster" for any number of racing convergence calls.
#[derive(Default, Clone)]
pub struct PseudoMongo {
    state: Arc<Mutex<State>>,

    // When set, `current_config` snapshots its answer and then waits for
    // all participants before returning, so every racer observes the
    // pre-initiate state.
    query_barrier: Option<Arc<Barrier>>,
}

impl PseudoMongo {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cluster that aligns `n` concurrent config queries on a barrier,
    /// forcing the initiate race the engine must surface.
    pub fn with_query_barrier(n: usize) -> Self {
        Self {
            state: Default::default(),
            query_barrier: Some(Arc::new(Barrier::new(n))),
        }
    }

    /// Refuse all dials, as if the database process is not serving.
    pub fn refuse_dial(&self) {
        self.state.lock().unwrap().refuse_dial = true;
    }

    /// Simulate dial latency; a delay at or above the caller's timeout
    /// fails the dial with a timeout error.
    pub fn set_dial_delay(&self, delay: Duration) {
        self.state.lock().unwrap().dial_delay = Some(delay);
    }

    /// Make config queries fail with `msg` (e.g. "not authorized"),
    /// distinct from the not-found outcome.
    pub fn fail_queries(&self, msg: impl ToString) {
        self.state.lock().unwrap().query_error = Some(msg.to_string());
    }

    /// Seed an already-initiated cluster.
    pub fn set_config(&self, config: ReplicaSetConfig) {
        self.state.lock().unwrap().config = Some(config);
    }

    /// The current replica-set configuration, if initiated.
    pub fn config(&self) -> Option<ReplicaSetConfig> {
        self.state.lock().unwrap().config.clone()
    }

    pub fn counts(&self) -> Counts {
        self.state.lock().unwrap().counts
    }
}

impl Cluster for PseudoMongo {
    type Session = PseudoSession;

    async fn connect(
        &mut self,
        params: &DialParams,
    ) -> Result<Self::Session, DialError> {
        let (refuse, delay) = {
            let mut state = self.state.lock().unwrap();
            state.counts.dials += 1;
            (state.refuse_dial, state.dial_delay)
        };

        if refuse {
            let e = io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("connection refused: {:?}", params.addrs),
            );
            return Err(DialError::new(&e));
        }

        if let Some(delay) = delay {
            if delay >= params.timeout {
                let e = io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!(
                        "dial timed out after {:?}: {:?}",
                        params.timeout, params.addrs
                    ),
                );
                return Err(DialError::new(&e));
            }
            tokio::time::sleep(delay).await;
        }

        debug!("PseudoMongo::connect: {:?}", params.addrs);
        Ok(PseudoSession {
            state: self.state.clone(),
            query_barrier: self.query_barrier.clone(),
        })
    }
}

/// One open session against a [`PseudoMongo`] cluster.
pub struct PseudoSession {
    state: Arc<Mutex<State>>,
    query_barrier: Option<Arc<Barrier>>,
}

impl Session for PseudoSession {
    async fn current_config(&mut self) -> ConfigOutcome {
        let outcome = {
            let mut state = self.state.lock().unwrap();
            state.counts.queries += 1;

            if let Some(msg) = &state.query_error {
                ConfigOutcome::QueryFailed(AnyError::error(msg))
            } else {
                match &state.config {
                    Some(config) => ConfigOutcome::Found(config.clone()),
                    None => ConfigOutcome::NotFound,
                }
            }
        };

        if let Some(barrier) = &self.query_barrier {
            barrier.wait().await;
        }

        debug!("PseudoSession::current_config: {:?}", outcome);
        outcome
    }

    async fn initiate(
        &mut self,
        seed: &str,
        set_name: &str,
    ) -> Result<(), InitiateError> {
        let mut state = self.state.lock().unwrap();
        state.counts.initiates += 1;

        // The cluster is the final arbiter: only the first initiate
        // establishes the set.
        if state.config.is_some() {
            return Err(AnyError::error(format!(
                "replica set {:?} is already initialized",
                set_name
            ))
            .into());
        }

        state.config = Some(ReplicaSetConfig {
            name: set_name.to_string(),
            version: 1,
            members: vec![Member {
                id: 1,
                address: seed.to_string(),
            }],
        });
        Ok(())
    }
}
