use thiserror::Error;

/// Failures of the pure sizing/evaluation functions.
///
/// IRR non-convergence is deliberately NOT represented here: it resolves
/// to a 0 % result with `irr_converged = false` on the calculation result
/// so callers can tell it apart from a genuine 0 % rate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed caller input: empty catalog, duplicate panel counts,
    /// negative yields.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A formula precondition does not hold for otherwise well-formed
    /// input: non-positive capacity or lifespan, or a lifetime/payback
    /// divisor that resolves to zero or the wrong sign.
    #[error("domain error: {0}")]
    Domain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidInput("empty catalog".to_string());
        assert_eq!(err.to_string(), "invalid input: empty catalog");

        let err = EngineError::Domain("capacity must be positive".to_string());
        assert_eq!(err.to_string(), "domain error: capacity must be positive");
    }
}
