#![doc = include_str!("lib_readme.md")]
#![allow(clippy::result_large_err)]
#![deny(unused_qualifications)]

mod config;

pub mod base;
pub mod ensure;
pub mod errors;
pub mod journal;
pub mod replset;
pub mod service;
pub mod supervisor;
pub mod testing;

pub use anyerror;
pub use anyerror::AnyError;
pub use openraft_macros::add_async_trait;

pub use crate::base::OptionalSend;
pub use crate::base::OptionalSync;
pub use crate::config::Config;
pub use crate::config::ConfigError;
pub use crate::ensure::ensure_server;
pub use crate::ensure::remove_server;
pub use crate::ensure::BootstrapRequest;
pub use crate::replset::Cluster;
pub use crate::replset::ConfigOutcome;
pub use crate::replset::DialParams;
pub use crate::replset::ReplicaSetConfig;
pub use crate::replset::Session;
pub use crate::replset::REPL_SET_NAME;
pub use crate::service::SCRIPT_VERSION;
pub use crate::supervisor::ServiceDefinition;
pub use crate::supervisor::Supervisor;
