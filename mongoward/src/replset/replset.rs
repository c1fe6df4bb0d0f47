use std::fmt::Display;
use std::fmt::Formatter;

use anyerror::AnyError;
use tracing::debug;
use tracing::info;

use crate::errors::ReplSetError;
use crate::replset::Cluster;
use crate::replset::DialParams;
use crate::replset::Session;

/// The replica-set name shared by the whole cluster.
///
/// Part of the generated command line (`--replSet`) and of the initiate
/// operation; every node must use the same value.
pub const REPL_SET_NAME: &str = "mongoward";

/// One member of a replica-set configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Member {
    pub id: u32,
    pub address: String,
}

/// The replica-set configuration document owned by the database cluster.
///
/// This crate never caches or mutates it; it is read to test presence,
/// and written exactly once by the initiate operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ReplicaSetConfig {
    pub name: String,
    pub version: u64,
    pub members: Vec<Member>,
}

impl Display for ReplicaSetConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/v{}: ", self.name, self.version)?;
        for (i, m) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", m.id, m.address)?;
        }
        Ok(())
    }
}

/// Result of reading the current replica-set configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum ConfigOutcome {
    /// A configuration exists; the set has been initiated already.
    Found(ReplicaSetConfig),

    /// The set has never been initiated. The only outcome that triggers
    /// an initiate.
    NotFound,

    /// The query itself failed (transport, permission, timeout).
    QueryFailed(AnyError),
}

/// Converge replica-set membership: if the set has never been initiated,
/// initiate it with this node as seed member; if it exists, do nothing.
///
/// Between observing [`ConfigOutcome::NotFound`] and initiating there is
/// an unavoidable window in which another node may initiate first. The
/// cluster arbitrates: at most one initiate succeeds, and a losing
/// initiate surfaces here as [`ReplSetError::Initiate`]. Callers wanting
/// eventual success either elect a bootstrap leader externally or re-run
/// the whole convergence pass.
pub async fn ensure_replica_set<C>(
    cluster: &mut C,
    address: &str,
    port: u16,
    params: &DialParams,
) -> Result<(), ReplSetError>
where
    C: Cluster,
{
    debug!(
        "ensuring replica set exists; local address {:?}, port {}, dialing {:?}",
        address, port, params.addrs
    );

    let mut session =
        cluster.connect(params).await.map_err(|e| ReplSetError::Connect {
            addrs: params.addrs.clone(),
            source: e.into_any(),
        })?;

    match session.current_config().await {
        ConfigOutcome::Found(config) => {
            debug!("replica set already initiated: {}", config);
            Ok(())
        }
        ConfigOutcome::NotFound => {
            let seed = format!("{}:{}", address, port);
            session.initiate(&seed, REPL_SET_NAME).await.map_err(|e| {
                ReplSetError::Initiate {
                    seed: seed.clone(),
                    source: e.into_any(),
                }
            })?;

            info!("replica set {} initiated with seed {}", REPL_SET_NAME, seed);
            Ok(())
        }
        ConfigOutcome::QueryFailed(e) => {
            Err(ReplSetError::Query { source: e })
        }
    }
}
