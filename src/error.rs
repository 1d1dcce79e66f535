use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("chart element is not available yet")]
    ElementUnavailable,

    #[error("chart adapter has been disposed")]
    Disposed,

    #[error("chart engine failure: {0}")]
    Engine(String),

    #[error("resize observer failure: {0}")]
    Observer(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// How adapter operations report contained failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Emit a `warn` event and report success to the caller.
    #[default]
    LogAndContinue,
    /// Return the failure to the caller.
    Propagate,
}

impl ErrorPolicy {
    /// Applies the policy to an operation result.
    ///
    /// Returns `true` alongside the settled result when a failure was
    /// swallowed, so callers can keep warning counters.
    pub(crate) fn settle(
        self,
        operation: &'static str,
        result: ChartResult<()>,
    ) -> (ChartResult<()>, bool) {
        match (self, result) {
            (_, Ok(())) => (Ok(()), false),
            (Self::Propagate, Err(err)) => (Err(err), false),
            (Self::LogAndContinue, Err(err)) => {
                warn!(operation, error = %err, "chart operation failed; continuing");
                (Ok(()), true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_policy_swallows_failures() {
        let (result, swallowed) =
            ErrorPolicy::LogAndContinue.settle("set_option", Err(ChartError::ElementUnavailable));
        assert_eq!(result, Ok(()));
        assert!(swallowed);
    }

    #[test]
    fn propagate_policy_returns_failures() {
        let (result, swallowed) =
            ErrorPolicy::Propagate.settle("set_option", Err(ChartError::Disposed));
        assert_eq!(result, Err(ChartError::Disposed));
        assert!(!swallowed);
    }
}
