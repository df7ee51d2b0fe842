use thiserror::Error;

/// Errors surfaced by fallible constructors and configuration loading.
///
/// Per-frame update paths never return errors: everything they touch was
/// validated when the owning object was built.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A construction parameter was malformed (non-positive duration,
    /// non-positive mass, unknown easing name, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration document failed to parse.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
