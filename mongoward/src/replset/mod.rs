//! Replica-set bootstrap: converge cluster membership to "initiated with
//! this node as seed member", exactly once.

mod cluster;
#[allow(clippy::module_inception)]
mod replset;


pub use self::cluster::Cluster;
pub use self::cluster::DialParams;
pub use self::cluster::Session;
pub use self::replset::ensure_replica_set;
pub use self::replset::ConfigOutcome;
pub use self::replset::Member;
pub use self::replset::ReplicaSetConfig;
pub use self::replset::REPL_SET_NAME;
