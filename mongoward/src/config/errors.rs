use anyerror::AnyError;

/// Error variants related to configuration.
#[derive(Debug, thiserror::Error)]
#[derive(PartialEq, Eq)]
pub enum ConfigError {
    #[error("ParseError: {source} while parsing ({args:?})")]
    ParseError { source: AnyError, args: Vec<String> },

    #[error("service base name must not be empty")]
    EmptyServiceBase,

    /// The base name would escape the supervisor's configuration directory.
    #[error("service base name {base:?} contains characters not allowed in a service name")]
    InvalidServiceBase { base: String },

    #[error("dial timeout must be greater than zero")]
    ZeroDialTimeout,
}
