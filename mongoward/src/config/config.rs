//! mongoward runtime configuration.

use std::time::Duration;

use anyerror::AnyError;
use clap::Parser;

use crate::config::errors::ConfigError;

/// Settings for a convergence pass.
///
/// The defaults are what a production node runs with; tests override
/// `service_base` to keep scenarios independent of each other. Nothing
/// per-call lives here: bind address, data directory, port and dial
/// parameters travel in [`BootstrapRequest`](crate::BootstrapRequest)
/// instead.
#[derive(Clone, Debug, Parser)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// Base name for the state database service.
    ///
    /// The installed definition is named `<service_base>-v<N>` where `N`
    /// is the current command-line schema version; the bare base name is
    /// the pre-versioning legacy name that migration removes.
    #[clap(long, default_value = "mongoward-db")]
    pub service_base: String,

    /// Default timeout in milliseconds for dial, query and initiate
    /// operations against the database cluster.
    ///
    /// Used when building [`DialParams`](crate::DialParams) for a node
    /// that has no caller-supplied timeout.
    #[clap(long, default_value = "30000")]
    pub dial_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        <Self as Parser>::parse_from(Vec::<&'static str>::new())
    }
}

impl Config {
    /// The default network timeout as a [`Duration`].
    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    /// Build a `Config` instance from a series of command line arguments.
    ///
    /// The first element in `args` must be the application name.
    pub fn build(args: &[&str]) -> Result<Config, ConfigError> {
        let config = <Self as Parser>::try_parse_from(args).map_err(|e| {
            ConfigError::ParseError {
                source: AnyError::from(&e),
                args: args.iter().map(|x| x.to_string()).collect(),
            }
        })?;
        config.validate()
    }

    /// Validate the state of this config.
    pub fn validate(self) -> Result<Config, ConfigError> {
        if self.service_base.is_empty() {
            return Err(ConfigError::EmptyServiceBase);
        }

        // Service names become file names under the supervisor's conf dir.
        if self.service_base.contains(&['/', '\0'][..]) {
            return Err(ConfigError::InvalidServiceBase {
                base: self.service_base,
            });
        }

        if self.dial_timeout_ms == 0 {
            return Err(ConfigError::ZeroDialTimeout);
        }

        Ok(self)
    }
}
