use thiserror::Error;

/// Errors which occur when interpreting a textual configuration of the search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The name does not correspond to any known policy of the given kind.
    #[error("Unknown {kind} '{name}', expected one of: {expected}")]
    UnknownPolicy {
        kind: &'static str,
        name: String,
        expected: &'static str,
    },
    /// The failure count decay should be in the range `[0, 1)`.
    #[error("The decay {0} is not in the range [0, 1)")]
    InvalidDecay(f64),
    #[error("The decay '{0}' is not a number")]
    MalformedDecay(String),
}
