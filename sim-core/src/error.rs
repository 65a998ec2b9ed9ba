use thiserror::Error;

/// Reasons a set of step parameters can be rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("{name} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("lifespan must be at least 1")]
    ZeroLifespan,
}
