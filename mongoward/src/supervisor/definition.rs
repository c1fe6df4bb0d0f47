use std::fmt::Display;
use std::fmt::Formatter;

/// Resource limits declared on a service definition.
///
/// Both are set far above default OS limits: the database opens one file
/// and several threads per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Limits {
    /// Maximum number of open files (`nofile`), soft and hard.
    pub max_open_files: u64,

    /// Maximum number of processes (`nproc`), soft and hard.
    pub max_processes: u64,
}

/// A supervisor-facing service definition: everything the external
/// supervisor needs to install and run one named service.
///
/// Built fresh on every convergence pass and owned by the supervisor once
/// installed. Two passes over the same inputs build identical definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ServiceDefinition {
    /// Versioned service name, `<base>-v<N>`.
    pub name: String,

    /// Human-readable description shown by the supervisor.
    pub description: String,

    /// Full command line to execute.
    pub cmd: String,

    /// Resource limits to apply to the service process.
    pub limits: Limits,
}

impl Display for ServiceDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.description, self.cmd)
    }
}
