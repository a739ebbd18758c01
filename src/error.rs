use std::fmt;

/// The main error type for SIGIL conversion.
///
/// Every variant is terminal for a single conversion call: the converter
/// never produces partial output once one of these is raised.
#[derive(Debug, Clone, PartialEq)]
pub enum SigilError {
    /// Raised when a key or section name is not a valid identifier.
    InvalidName {
        name: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when an operator is applied with fewer than two stacked operands.
    InsufficientOperands {
        operator: String,
        expr: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    DivisionByZero {
        expr: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    ModuloByZero {
        expr: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when an expression does not reduce to exactly one value.
    MalformedExpression {
        message: String,
        expr: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for an operand that is neither numeric nor a known variable.
    InvalidOperand {
        token: String,
        expr: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string value carries an unbalanced quote.
    UnterminatedString {
        text: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for scalar kinds outside the supported set. Defensive: a
    /// conforming parser never produces one.
    UnsupportedValueType {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl fmt::Display for SigilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigilError::InvalidName { name, path, hint, code } =>
                write!(f, "[SIGIL] Invalid Name '{}' at '{}'{}{}",
                    name, path,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::InsufficientOperands { operator, expr, hint, code } =>
                write!(f, "[SIGIL] Insufficient operands for '{}' in '{}'{}{}",
                    operator, expr,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::DivisionByZero { expr, hint, code } =>
                write!(f, "[SIGIL] Division by zero in '{}'{}{}",
                    expr,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::ModuloByZero { expr, hint, code } =>
                write!(f, "[SIGIL] Modulo by zero in '{}'{}{}",
                    expr,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::MalformedExpression { message, expr, hint, code } =>
                write!(f, "[SIGIL] Malformed expression '{}': {}{}{}",
                    expr, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::InvalidOperand { token, expr, hint, code } =>
                write!(f, "[SIGIL] Invalid operand '{}' in '{}'{}{}",
                    token, expr,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::UnterminatedString { text, hint, code } =>
                write!(f, "[SIGIL] Unterminated string in value '{}'{}{}",
                    text,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            SigilError::UnsupportedValueType { message, hint, code } =>
                write!(f, "[SIGIL] Unsupported value type: {}{}{}",
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for SigilError {}
