use std::path::PathBuf;

/// Failure to accept an externally supplied configuration document.
///
/// This is the only error the library returns; malformed values inside a
/// well-shaped document degrade and are reported as diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("input must be an object")]
    NotAnObject,

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
