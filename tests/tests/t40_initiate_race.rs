#[allow(dead_code)]
mod fixtures;

use anyhow::Result;
use memsupervisor::MemSupervisor;
use mongoward::ensure_server;
use mongoward::errors::EnsureError;
use mongoward::errors::ReplSetError;
use pseudomongo::PseudoMongo;

use crate::fixtures::config;
use crate::fixtures::request;
use crate::fixtures::ut_harness;

/// Two nodes race to bootstrap the same replica set.
///
/// What does this test do?
///
/// - runs two concurrent convergence calls against one shared cluster;
/// - a barrier inside the cluster guarantees both calls observe
///   "no config" before either may initiate;
/// - asserts the cluster arbitration let exactly one initiate through:
///   one call succeeds, the other surfaces a fatal initiate error, and
///   the resulting set has a single seed member.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn concurrent_initiate_has_one_winner() -> Result<()> {
    let cluster = PseudoMongo::with_query_barrier(2);
    let config = config("x");

    let tmp1 = tempfile::tempdir()?;
    let tmp2 = tempfile::tempdir()?;
    let sup1 = MemSupervisor::new();
    let sup2 = MemSupervisor::new();

    let req1 = request("10.0.0.1", tmp1.path(), 37017);
    let req2 = request("10.0.0.2", tmp2.path(), 37017);

    let h1 = tokio::spawn({
        let config = config.clone();
        let mut sup = sup1.clone();
        let mut cl = cluster.clone();
        async move { ensure_server(&config, &mut sup, &mut cl, &req1).await }
    });
    let h2 = tokio::spawn({
        let config = config.clone();
        let mut sup = sup2.clone();
        let mut cl = cluster.clone();
        async move { ensure_server(&config, &mut sup, &mut cl, &req2).await }
    });

    let r1 = h1.await?;
    let r2 = h2.await?;

    // Exactly one winner, never both, never neither.
    assert_eq!(
        1,
        [r1.is_ok(), r2.is_ok()].iter().filter(|ok| **ok).count(),
        "results: {:?} / {:?}",
        r1,
        r2
    );

    let loser = if r1.is_err() { r1 } else { r2 };
    match loser.unwrap_err() {
        EnsureError::ReplSet(ReplSetError::Initiate { seed, .. }) => {
            assert!(seed == "10.0.0.1:37017" || seed == "10.0.0.2:37017");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let counts = cluster.counts();
    assert_eq!(2, counts.queries);
    assert_eq!(2, counts.initiates);

    // The set holds exactly the winner's seed member.
    let rs = cluster.config().unwrap();
    assert_eq!(1, rs.members.len());

    Ok(())
}
