use std::collections::HashMap;

use crate::ast::Node;
use crate::SigilError;

/// Variables visible to expression evaluation. Values are the literal
/// scalars collected from the document (strings, integers, floats).
pub type VarEnv = HashMap<String, Node>;

/// An operand on the evaluation stack. Tokens are pushed verbatim and only
/// resolved against the environment when an operator consumes them.
enum Operand {
    Raw(String),
    Value(f64),
}

/// True when the text uses the expression-call wrapper `?( ... )`.
pub fn is_expression(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with("?(") && trimmed.ends_with(')')
}

/// Evaluate a postfix expression of the form `?( <tokens> )`.
///
/// Returns `Ok(None)` when the text is not wrapped as an expression at all.
/// Tokens are whitespace-separated and consumed left to right: operators
/// (`+ - * \ max mod`) pop two operands, everything else is pushed as-is.
/// Whole-valued results come back as `Node::Integer`, the rest as
/// `Node::Float`.
pub fn evaluate(text: &str, vars: &VarEnv) -> Result<Option<Node>, SigilError> {
    let trimmed = text.trim();
    if !(trimmed.starts_with("?(") && trimmed.ends_with(')')) {
        return Ok(None);
    }
    let body = &trimmed[2..trimmed.len() - 1];
    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(malformed("an expression needs at least two operands and an operator", text));
    }

    let mut stack: Vec<Operand> = Vec::new();
    for token in tokens {
        if is_operator(token) {
            let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                return Err(SigilError::InsufficientOperands {
                    operator: token.to_string(),
                    expr: text.to_string(),
                    hint: Some("Each operator consumes two preceding values".into()),
                    code: Some(201),
                });
            };
            let b = resolve(b, vars, text)?;
            let a = resolve(a, vars, text)?;
            stack.push(Operand::Value(apply(token, a, b, text)?));
        } else {
            stack.push(Operand::Raw(token.to_string()));
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(result), true) => Ok(Some(number_node(resolve(result, vars, text)?))),
        _ => Err(malformed("operands left over without an operator", text)),
    }
}

fn is_operator(token: &str) -> bool {
    matches!(token, "+" | "-" | "*" | "\\" | "max" | "mod")
}

fn apply(operator: &str, a: f64, b: f64, expr: &str) -> Result<f64, SigilError> {
    match operator {
        "+" => Ok(a + b),
        "-" => Ok(a - b),
        "*" => Ok(a * b),
        "\\" => {
            if b == 0.0 {
                Err(SigilError::DivisionByZero {
                    expr: expr.to_string(),
                    hint: None,
                    code: Some(202),
                })
            } else {
                Ok(a / b)
            }
        }
        "max" => Ok(a.max(b)),
        "mod" => {
            if b == 0.0 {
                Err(SigilError::ModuloByZero {
                    expr: expr.to_string(),
                    hint: None,
                    code: Some(203),
                })
            } else {
                Ok(a % b)
            }
        }
        other => Err(malformed(&format!("unknown operator '{}'", other), expr)),
    }
}

/// Substitute a variable name with its value, or parse the token as a
/// number. Anything else is an invalid operand.
fn resolve(operand: Operand, vars: &VarEnv, expr: &str) -> Result<f64, SigilError> {
    let token = match operand {
        Operand::Value(value) => return Ok(value),
        Operand::Raw(token) => token,
    };
    if let Some(node) = vars.get(&token) {
        return match node {
            Node::Integer(i) => Ok(*i as f64),
            Node::Float(x) => Ok(*x),
            Node::String(s) => s.parse().map_err(|_| invalid_operand(&token, expr)),
            _ => Err(invalid_operand(&token, expr)),
        };
    }
    token.parse().map_err(|_| invalid_operand(&token, expr))
}

fn number_node(value: f64) -> Node {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        Node::Integer(value as i64)
    } else {
        Node::Float(value)
    }
}

fn malformed(message: &str, expr: &str) -> SigilError {
    SigilError::MalformedExpression {
        message: message.to_string(),
        expr: expr.to_string(),
        hint: Some("Expressions are postfix: ?(10 5 +)".into()),
        code: Some(204),
    }
}

fn invalid_operand(token: &str, expr: &str) -> SigilError {
    SigilError::InvalidOperand {
        token: token.to_string(),
        expr: expr.to_string(),
        hint: Some("Operands must be numbers or previously defined variables".into()),
        code: Some(205),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, Node)]) -> VarEnv {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_plain_string_is_not_an_expression() {
        assert_eq!(evaluate("hello", &VarEnv::new()).unwrap(), None);
        assert_eq!(evaluate("?unwrapped", &VarEnv::new()).unwrap(), None);
    }

    #[test]
    fn test_literal_arithmetic() {
        assert_eq!(evaluate("?(10 5 +)", &VarEnv::new()).unwrap(), Some(Node::Integer(15)));
        assert_eq!(evaluate("?(10 5 -)", &VarEnv::new()).unwrap(), Some(Node::Integer(5)));
        assert_eq!(evaluate("?(10 5 *)", &VarEnv::new()).unwrap(), Some(Node::Integer(50)));
        assert_eq!(evaluate("?(10 4 \\)", &VarEnv::new()).unwrap(), Some(Node::Float(2.5)));
        assert_eq!(evaluate("?(10 5 max)", &VarEnv::new()).unwrap(), Some(Node::Integer(10)));
        assert_eq!(evaluate("?(10 3 mod)", &VarEnv::new()).unwrap(), Some(Node::Integer(1)));
    }

    #[test]
    fn test_chained_operations() {
        // (2 + 3) * 4
        assert_eq!(
            evaluate("?(2 3 + 4 *)", &VarEnv::new()).unwrap(),
            Some(Node::Integer(20))
        );
    }

    #[test]
    fn test_variables_are_substituted() {
        let vars = env(&[("a", Node::Integer(7)), ("b", Node::Float(0.5))]);
        assert_eq!(evaluate("?(a b +)", &vars).unwrap(), Some(Node::Float(7.5)));
    }

    #[test]
    fn test_numeric_string_variable_coerces() {
        let vars = env(&[("a", Node::String("2.5".into()))]);
        assert_eq!(evaluate("?(a 2 *)", &vars).unwrap(), Some(Node::Integer(5)));
    }

    #[test]
    fn test_unknown_operand() {
        let err = evaluate("?(a 2 +)", &VarEnv::new()).unwrap_err();
        assert!(matches!(err, SigilError::InvalidOperand { .. }));
    }

    #[test]
    fn test_division_by_zero() {
        let vars = env(&[("a", Node::Integer(1)), ("b", Node::Integer(0))]);
        let err = evaluate("?(a b \\)", &vars).unwrap_err();
        assert!(matches!(err, SigilError::DivisionByZero { .. }));
    }

    #[test]
    fn test_modulo_by_zero() {
        let vars = env(&[("a", Node::Integer(1)), ("b", Node::Integer(0))]);
        let err = evaluate("?(a b mod)", &vars).unwrap_err();
        assert!(matches!(err, SigilError::ModuloByZero { .. }));
    }

    #[test]
    fn test_too_few_tokens() {
        let vars = env(&[("a", Node::Integer(1)), ("b", Node::Integer(2))]);
        let err = evaluate("?(a)", &vars).unwrap_err();
        assert!(matches!(err, SigilError::MalformedExpression { .. }));
        let err = evaluate("?(a b)", &vars).unwrap_err();
        assert!(matches!(err, SigilError::MalformedExpression { .. }));
    }

    #[test]
    fn test_leftover_operand() {
        let vars = env(&[
            ("a", Node::Integer(1)),
            ("b", Node::Integer(2)),
            ("c", Node::Integer(3)),
        ]);
        let err = evaluate("?(a b + c)", &vars).unwrap_err();
        assert!(matches!(err, SigilError::MalformedExpression { .. }));
    }

    #[test]
    fn test_operator_without_operands() {
        let err = evaluate("?(1 + +)", &VarEnv::new()).unwrap_err();
        assert!(matches!(err, SigilError::InsufficientOperands { .. }));
    }
}
