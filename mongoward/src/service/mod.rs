//! Building the versioned service definition for the state database.

pub mod migrate;


use std::path::Path;

use crate::replset::REPL_SET_NAME;
use crate::supervisor::Limits;
use crate::supervisor::ServiceDefinition;

/// Version of the generated command line.
///
/// Bump this whenever the command line or the limits change; migration
/// then removes the definitions installed by every earlier version.
pub const SCRIPT_VERSION: u32 = 2;

const MAX_FILES: u64 = 65_000;
const MAX_PROCS: u64 = 20_000;

/// Path of the database executable. Resolving an alternative location is
/// the caller's concern; the generated definition always refers to the
/// installed binary.
const MONGOD_PATH: &str = "/usr/bin/mongod";

/// The versioned name for the service definition of `version`.
pub fn service_name(base: &str, version: u32) -> String {
    format!("{}-v{}", base, version)
}

/// Build the service definition for the current version.
///
/// Pure and deterministic: no I/O, and the same inputs always yield the
/// same definition. Assumes a `server.pem` keyfile is already provisioned
/// in `data_dir`.
pub fn service_definition(
    name: &str,
    data_dir: &Path,
    port: u16,
) -> ServiceDefinition {
    let db_dir = data_dir.join("db");
    let key_file = data_dir.join("server.pem");

    // --noprealloc: journal preallocation is done by `journal`, with
    // 1 MiB files instead of the 100 MiB ones mongod would create.
    let cmd = format!(
        "{mongod} --auth \
         --dbpath={db_dir} \
         --sslOnNormalPorts \
         --sslPEMKeyFile {key_file} \
         --sslPEMKeyPassword ignored \
         --bind_ip 0.0.0.0 \
         --port {port} \
         --noprealloc \
         --syslog \
         --smallfiles \
         --replSet {repl_set}",
        mongod = MONGOD_PATH,
        db_dir = db_dir.display(),
        key_file = sh_quote(&key_file.display().to_string()),
        port = port,
        repl_set = REPL_SET_NAME,
    );

    ServiceDefinition {
        name: name.to_string(),
        description: "mongoward state database".to_string(),
        cmd,
        limits: Limits {
            max_open_files: MAX_FILES,
            max_processes: MAX_PROCS,
        },
    }
}

/// Quote `s` for inclusion in a shell command line.
fn sh_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
