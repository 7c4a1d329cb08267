use thiserror::Error;

/// Failure while decoding configuration or constructing a sink from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("decode: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("destination {dst}: {reason}")]
    Destination { dst: String, reason: String },

    #[error(transparent)]
    Build(#[from] lumber_sinks::BuildError),
}
