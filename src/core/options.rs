use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Declarative chart configuration (axes, series, styling).
///
/// The adapter never inspects the payload; it is handed to the engine as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartOptions(serde_json::Value);

impl ChartOptions {
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map(Self)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart options: {e}")))
    }

    /// `false` for a JSON `null` payload, which carries nothing to apply.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        !self.0.is_null()
    }

    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for ChartOptions {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
