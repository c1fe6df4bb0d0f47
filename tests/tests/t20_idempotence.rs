#[allow(dead_code)]
mod fixtures;

use anyhow::Result;
use memsupervisor::MemSupervisor;
use mongoward::ensure_server;
use mongoward::replset::Member;
use mongoward::ReplicaSetConfig;
use mongoward::REPL_SET_NAME;
use pseudomongo::PseudoMongo;

use crate::fixtures::config;
use crate::fixtures::request;
use crate::fixtures::ut_harness;

/// A second convergence pass on a bootstrapped node performs zero
/// install, start or initiate operations: the service is found
/// installed and running, and the config query finds an existing set.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn second_pass_is_a_no_op() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config("x");
    let supervisor = MemSupervisor::new();
    let cluster = PseudoMongo::new();
    let req = request("10.0.0.1", tmp.path(), 37017);

    let mut sup = supervisor.clone();
    let mut cl = cluster.clone();

    ensure_server(&config, &mut sup, &mut cl, &req).await?;
    let ops_after_first = supervisor.ops();

    ensure_server(&config, &mut sup, &mut cl, &req).await?;

    assert_eq!(ops_after_first, supervisor.ops());

    let counts = cluster.counts();
    assert_eq!(2, counts.dials);
    assert_eq!(2, counts.queries);
    assert_eq!(1, counts.initiates);

    assert!(supervisor.service("x-v2").unwrap().running);

    Ok(())
}

/// Initiate happens exactly once across any number of passes: the query
/// reports not-found exactly once, and an existing config thereafter.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn single_initiate_across_many_passes() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config("x");
    let supervisor = MemSupervisor::new();
    let cluster = PseudoMongo::new();
    let req = request("10.0.0.1", tmp.path(), 37017);

    let mut sup = supervisor.clone();
    let mut cl = cluster.clone();

    for _ in 0..5 {
        ensure_server(&config, &mut sup, &mut cl, &req).await?;
    }

    let counts = cluster.counts();
    assert_eq!(5, counts.queries);
    assert_eq!(1, counts.initiates);
    assert_eq!(1, cluster.config().unwrap().members.len());

    Ok(())
}

/// A node joining a cluster whose set was initiated elsewhere never
/// issues an initiate, even on its very first pass.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn existing_cluster_config_suppresses_initiate() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config("x");
    let supervisor = MemSupervisor::new();
    let cluster = PseudoMongo::new();
    let req = request("10.0.0.2", tmp.path(), 37017);

    let existing = ReplicaSetConfig {
        name: REPL_SET_NAME.to_string(),
        version: 3,
        members: vec![Member {
            id: 1,
            address: "10.0.0.1:37017".to_string(),
        }],
    };
    cluster.set_config(existing.clone());

    let mut sup = supervisor.clone();
    let mut cl = cluster.clone();
    ensure_server(&config, &mut sup, &mut cl, &req).await?;

    assert_eq!(0, cluster.counts().initiates);
    assert_eq!(Some(existing), cluster.config());
    assert!(supervisor.service("x-v2").unwrap().running);

    Ok(())
}
