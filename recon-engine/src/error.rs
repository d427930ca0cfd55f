use thiserror::Error;

/// Failures surfaced to callers of the engine.
///
/// Aggregation itself never fails; bad records are coerced or reported via
/// the rejected side-channel. Errors here come from the upstream fetch
/// boundary and from environment configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Upstream fetch failed: {0}")]
    Upstream(anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),
}

impl EngineError {
    /// Wrap a collaborator failure as an upstream fetch error.
    pub fn upstream(err: impl Into<anyhow::Error>) -> Self {
        EngineError::Upstream(err.into())
    }
}
