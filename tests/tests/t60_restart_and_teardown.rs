#[allow(dead_code)]
mod fixtures;

use anyhow::Result;
use memsupervisor::MemSupervisor;
use memsupervisor::Op;
use mongoward::ensure_server;
use mongoward::remove_server;
use mongoward::Supervisor;
use pseudomongo::PseudoMongo;

use crate::fixtures::config;
use crate::fixtures::request;
use crate::fixtures::ut_harness;

/// A stopped service is started again by the next pass, without
/// reinstalling anything or touching the replica set config.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn pass_restarts_a_stopped_service() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config("x");
    let supervisor = MemSupervisor::new();
    let cluster = PseudoMongo::new();
    let req = request("10.0.0.1", tmp.path(), 37017);

    let mut sup = supervisor.clone();
    let mut cl = cluster.clone();
    ensure_server(&config, &mut sup, &mut cl, &req).await?;

    sup.stop("x-v2").await?;
    assert!(!supervisor.service("x-v2").unwrap().running);

    ensure_server(&config, &mut sup, &mut cl, &req).await?;

    assert!(supervisor.service("x-v2").unwrap().running);
    assert_eq!(
        vec![
            Op::Install("x-v2".to_string()),
            Op::Start("x-v2".to_string()),
            Op::Stop("x-v2".to_string()),
            Op::Start("x-v2".to_string()),
        ],
        supervisor.ops()
    );
    assert_eq!(1, cluster.counts().initiates);

    Ok(())
}

/// Teardown is the only path that destroys the service definition.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn remove_server_tears_the_service_down() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config("x");
    let supervisor = MemSupervisor::new();
    let cluster = PseudoMongo::new();
    let req = request("10.0.0.1", tmp.path(), 37017);

    let mut sup = supervisor.clone();
    let mut cl = cluster.clone();
    ensure_server(&config, &mut sup, &mut cl, &req).await?;

    remove_server(&config, &mut sup).await?;

    assert!(supervisor.names().is_empty());
    assert!(supervisor.ops().contains(&Op::Remove("x-v2".to_string())));

    // Removing an already-removed service stays a no-op.
    remove_server(&config, &mut sup).await?;

    Ok(())
}
