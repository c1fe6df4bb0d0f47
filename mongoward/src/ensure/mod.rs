//! The convergence entry point.
//!
//! [`ensure_server`] drives a node from any starting state (empty
//! machine, restarted agent, half-finished earlier pass) to "current
//! service definition installed and running, replica set initiated".
//! Every step is gated by a precondition check, so a node that is
//! already converged performs only a no-op removal scan and a no-op
//! config query.

use std::path::PathBuf;

use tracing::debug;
use tracing::info;

use crate::errors::EnsureError;
use crate::journal;
use crate::replset::ensure_replica_set;
use crate::replset::DialParams;
use crate::service::migrate::remove_stale_services;
use crate::service::service_definition;
use crate::service::service_name;
use crate::service::SCRIPT_VERSION;
use crate::Cluster;
use crate::Config;
use crate::Supervisor;

/// One convergence request. Consumed per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BootstrapRequest {
    /// Address other cluster members reach this node at; becomes the
    /// seed member address when the replica set is initiated here.
    pub address: String,

    /// Data directory; holds `db/` and the provisioned `server.pem`.
    pub data_dir: PathBuf,

    /// Port the database listens on.
    pub port: u16,

    /// How to dial the local database endpoint.
    pub dial: DialParams,
}

/// Ensure the state database service is installed, running and part of an
/// initiated replica set.
///
/// Sequencing is strict and short-circuits on the first fatal error:
///
/// 1. remove service definitions left by earlier releases;
/// 2. build the definition for the current version;
/// 3. if it is not installed: preallocate the journal, then install;
/// 4. if it is not running: start it;
/// 5. initiate the replica set if no configuration exists yet.
///
/// Each completed step is idempotent, so callers handle failure by
/// re-invoking the whole pass.
pub async fn ensure_server<S, C>(
    config: &Config,
    supervisor: &mut S,
    cluster: &mut C,
    req: &BootstrapRequest,
) -> Result<(), EnsureError>
where
    S: Supervisor,
    C: Cluster,
{
    debug!(
        "ensuring state database service is running; address: {:?}, dir: {}, port: {}",
        req.address,
        req.data_dir.display(),
        req.port
    );

    let name = service_name(&config.service_base, SCRIPT_VERSION);

    remove_stale_services(supervisor, &config.service_base, SCRIPT_VERSION)
        .await?;

    let def = service_definition(&name, &req.data_dir, req.port);

    let installed = supervisor.installed(&name).await.map_err(|e| {
        EnsureError::Install {
            name: name.clone(),
            source: e.into_any(),
        }
    })?;

    if !installed {
        journal::make_journal_dirs(&req.data_dir.join("db")).await?;

        debug!("mongod command line: {}", def.cmd);
        supervisor.install(&def).await.map_err(|e| EnsureError::Install {
            name: name.clone(),
            source: e.into_any(),
        })?;
    }

    let running = supervisor.running(&name).await.map_err(|e| {
        EnsureError::Start {
            name: name.clone(),
            source: e.into_any(),
        }
    })?;

    if !running {
        supervisor.start(&name).await.map_err(|e| EnsureError::Start {
            name: name.clone(),
            source: e.into_any(),
        })?;
        info!("state database service {:?} started", name);
    }

    ensure_replica_set(cluster, &req.address, req.port, &req.dial).await?;

    Ok(())
}

/// Stop and remove the current service definition.
///
/// The only sanctioned destruction path for the local entities that
/// [`ensure_server`] creates; nothing is ever removed implicitly.
pub async fn remove_server<S>(
    config: &Config,
    supervisor: &mut S,
) -> Result<(), EnsureError>
where
    S: Supervisor,
{
    let name = service_name(&config.service_base, SCRIPT_VERSION);

    supervisor.stop_and_remove(&name).await.map_err(|e| {
        EnsureError::Migration {
            name: name.clone(),
            source: e.into_any(),
        }
    })?;

    info!("state database service {:?} removed", name);
    Ok(())
}
