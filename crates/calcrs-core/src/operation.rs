//! Counted engine operations and the records observers receive for them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An engine primitive that advances the operation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Factorial,
}

impl Operation {
    /// Method name, as it appears in call traces.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Factorial => "factorial",
        }
    }

    /// Response label for a successful call.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
            Self::Divide => "division",
            Self::Factorial => "factorial",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One counted call, as seen by an [`OperationObserver`](crate::observer::OperationObserver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Counter value right after this call was counted.
    pub sequence: u64,
    /// Which primitive ran.
    pub operation: Operation,
    /// Operands, rendered for display.
    pub operands: String,
    /// Rendered result, or `error: <message>` when the call failed.
    pub outcome: String,
}

impl OperationRecord {
    /// Whether the call failed validation.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.outcome.starts_with("error: ")
    }
}

impl fmt::Display for OperationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {}({}) = {}",
            self.sequence, self.operation, self.operands, self.outcome
        )
    }
}
