//! Requests, their text form, and boundary validation.
//!
//! A request line is `<op> <int> [<int>]`, whitespace separated. Operands
//! are 32-bit signed integers. Batch scripts are one request per line;
//! blank lines and `#` comments are skipped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use calcrs_core::CalcError;

/// Error type for request handling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// The line held no operation.
    #[error("empty request")]
    Empty,

    /// The operation name is not recognised.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Wrong number of operands for the operation.
    #[error("{op} expects {expected} operand(s), got {got}")]
    Arity {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    /// An operand is not a 32-bit integer.
    #[error("invalid operand '{0}': expected a 32-bit integer")]
    InvalidOperand(String),

    /// The request is well formed but outside the accepted domain.
    #[error("invalid request: {0}")]
    Validation(String),

    /// A batch script line failed to parse.
    #[error("line {line}: {error}")]
    Line {
        line: usize,
        error: Box<RequestError>,
    },

    /// The request reads or resets shared state and cannot run unordered.
    #[error("'{0}' cannot run in a parallel batch")]
    OrderDependent(&'static str),

    /// The engine rejected the call.
    #[error(transparent)]
    Calculation(#[from] CalcError),
}

impl RequestError {
    /// Whether this error came from the engine rather than the request shape.
    #[must_use]
    pub fn is_calculation(&self) -> bool {
        matches!(self, Self::Calculation(_))
    }
}

/// One operation to run against the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Add { a: i32, b: i32 },
    Subtract { a: i32, b: i32 },
    Multiply { a: i32, b: i32 },
    Divide { a: i32, b: i32 },
    Factorial { n: i32 },
    Prime { n: i32 },
    Complex { a: i32, b: i32 },
    Count,
    Reset,
}

impl Request {
    /// Canonical operation name, as accepted by the parser.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Subtract { .. } => "subtract",
            Self::Multiply { .. } => "multiply",
            Self::Divide { .. } => "divide",
            Self::Factorial { .. } => "factorial",
            Self::Prime { .. } => "prime",
            Self::Complex { .. } => "complex",
            Self::Count => "count",
            Self::Reset => "reset",
        }
    }

    /// Whether the result depends on what ran before it.
    #[must_use]
    pub fn is_order_dependent(&self) -> bool {
        matches!(self, Self::Count | Self::Reset)
    }

    /// Boundary checks applied before the engine is called.
    ///
    /// Factorial needs `n >= 0` and prime checks need `n >= 1`. A rejected
    /// request never reaches the engine, so it is not counted.
    ///
    /// # Errors
    ///
    /// [`RequestError::Validation`] describing the violated bound.
    pub fn validate(&self) -> Result<(), RequestError> {
        match *self {
            Self::Factorial { n } if n < 0 => Err(RequestError::Validation(format!(
                "factorial input must be >= 0, got {n}"
            ))),
            Self::Prime { n } if n < 1 => Err(RequestError::Validation(format!(
                "prime check input must be >= 1, got {n}"
            ))),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Add { a, b }
            | Self::Subtract { a, b }
            | Self::Multiply { a, b }
            | Self::Divide { a, b }
            | Self::Complex { a, b } => write!(f, "{} {a} {b}", self.name()),
            Self::Factorial { n } | Self::Prime { n } => write!(f, "{} {n}", self.name()),
            Self::Count | Self::Reset => f.write_str(self.name()),
        }
    }
}

impl FromStr for Request {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let op = tokens.next().ok_or(RequestError::Empty)?;
        let operands = tokens.map(parse_operand).collect::<Result<Vec<_>, _>>()?;

        let op = op.to_ascii_lowercase();
        match op.as_str() {
            "add" => binary("add", &operands).map(|(a, b)| Self::Add { a, b }),
            "subtract" | "sub" => {
                binary("subtract", &operands).map(|(a, b)| Self::Subtract { a, b })
            }
            "multiply" | "mul" => {
                binary("multiply", &operands).map(|(a, b)| Self::Multiply { a, b })
            }
            "divide" | "div" => binary("divide", &operands).map(|(a, b)| Self::Divide { a, b }),
            "factorial" | "fact" => unary("factorial", &operands).map(|n| Self::Factorial { n }),
            "prime" => unary("prime", &operands).map(|n| Self::Prime { n }),
            "complex" => binary("complex", &operands).map(|(a, b)| Self::Complex { a, b }),
            "count" => nullary("count", &operands).map(|()| Self::Count),
            "reset" => nullary("reset", &operands).map(|()| Self::Reset),
            _ => Err(RequestError::UnknownOperation(op)),
        }
    }
}

fn parse_operand(token: &str) -> Result<i32, RequestError> {
    token
        .parse()
        .map_err(|_| RequestError::InvalidOperand(token.to_string()))
}

fn arity(op: &'static str, operands: &[i32], expected: usize) -> Result<(), RequestError> {
    if operands.len() == expected {
        Ok(())
    } else {
        Err(RequestError::Arity {
            op,
            expected,
            got: operands.len(),
        })
    }
}

fn binary(op: &'static str, operands: &[i32]) -> Result<(i32, i32), RequestError> {
    arity(op, operands, 2)?;
    Ok((operands[0], operands[1]))
}

fn unary(op: &'static str, operands: &[i32]) -> Result<i32, RequestError> {
    arity(op, operands, 1)?;
    Ok(operands[0])
}

fn nullary(op: &'static str, operands: &[i32]) -> Result<(), RequestError> {
    arity(op, operands, 0)
}

/// Parse a batch script into requests.
///
/// Parsing is all-or-nothing: the first bad line aborts with its 1-based
/// line number, and nothing is executed.
///
/// # Errors
///
/// [`RequestError::Line`] wrapping the parse or validation failure.
pub fn parse_script(text: &str) -> Result<Vec<Request>, RequestError> {
    let mut requests = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let request = line
            .parse::<Request>()
            .and_then(|r| r.validate().map(|()| r))
            .map_err(|e| RequestError::Line {
                line: idx + 1,
                error: Box::new(e),
            })?;
        requests.push(request);
    }
    Ok(requests)
}
