//! Inline expression evaluation for `<% ... %>` placeholders.
//!
//! Supports number, string and boolean literals, arithmetic (`+ - * / %`),
//! comparisons, `&&`, `||`, unary `-`/`!` and parentheses. `+` concatenates
//! when either operand is a string.

use std::fmt;

use thiserror::Error;

/// Failure to tokenize, parse or evaluate an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expression error: {0}")]
pub struct ExpressionError(String);

type EvalResult<T> = std::result::Result<T, ExpressionError>;

/// Result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprValue {
    /// A number; integral values display without a fraction.
    Number(f64),
    /// A string.
    Str(String),
    /// A boolean.
    Bool(bool),
}

impl fmt::Display for ExprValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl ExprValue {
    fn truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
        }
    }

    fn to_number(&self) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| ExpressionError(format!("'{s}' is not a number"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    Op(&'static str),
    LParen,
    RParen,
}

const OPERATORS: [&str; 15] = [
    "==", "!=", "<=", ">=", "&&", "||", "+", "-", "*", "/", "%", "<", ">", "!", "=",
];

fn tokenize(input: &str) -> EvalResult<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            let number = literal
                .parse()
                .map_err(|_| ExpressionError(format!("invalid number '{literal}'")))?;
            tokens.push(Token::Number(number));
        } else if c == '"' || c == '\'' {
            let start = i + 1;
            let end = chars[start..]
                .iter()
                .position(|&ch| ch == c)
                .map(|offset| start + offset)
                .ok_or_else(|| ExpressionError("unterminated string literal".to_string()))?;
            tokens.push(Token::Str(chars[start..end].iter().collect()));
            i = end + 1;
        } else if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else if c == '(' {
            tokens.push(Token::LParen);
            i += 1;
        } else if c == ')' {
            tokens.push(Token::RParen);
            i += 1;
        } else {
            let rest: String = chars[i..chars.len().min(i + 2)].iter().collect();
            let op = OPERATORS
                .iter()
                .find(|op| rest.starts_with(*op))
                .ok_or_else(|| ExpressionError(format!("unexpected character '{c}'")))?;
            if *op == "=" {
                return Err(ExpressionError("assignment is not supported".to_string()));
            }
            tokens.push(Token::Op(*op));
            i += op.len();
        }
    }

    Ok(tokens)
}

/// Deepest nesting of parentheses and unary operators accepted.
const MAX_DEPTH: usize = 64;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(ExpressionError("expression nested too deeply".to_string()));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn peek_op(&self, candidates: &[&str]) -> Option<&'static str> {
        match self.tokens.get(self.pos) {
            Some(Token::Op(op)) if candidates.contains(op) => Some(*op),
            _ => None,
        }
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn or(&mut self) -> EvalResult<ExprValue> {
        let mut left = self.and()?;
        while self.peek_op(&["||"]).is_some() {
            self.pos += 1;
            let right = self.and()?;
            left = if left.truthy() { left } else { right };
        }
        Ok(left)
    }

    fn and(&mut self) -> EvalResult<ExprValue> {
        let mut left = self.equality()?;
        while self.peek_op(&["&&"]).is_some() {
            self.pos += 1;
            let right = self.equality()?;
            left = if left.truthy() { right } else { left };
        }
        Ok(left)
    }

    fn equality(&mut self) -> EvalResult<ExprValue> {
        let mut left = self.comparison()?;
        while let Some(op) = self.peek_op(&["==", "!="]) {
            self.pos += 1;
            let right = self.comparison()?;
            let equal = loose_equals(&left, &right);
            left = ExprValue::Bool(if op == "==" { equal } else { !equal });
        }
        Ok(left)
    }

    fn comparison(&mut self) -> EvalResult<ExprValue> {
        let mut left = self.additive()?;
        while let Some(op) = self.peek_op(&["<", "<=", ">", ">="]) {
            self.pos += 1;
            let right = self.additive()?;
            let ordering = match (&left, &right) {
                (ExprValue::Str(l), ExprValue::Str(r)) => l.partial_cmp(r),
                _ => left.to_number()?.partial_cmp(&right.to_number()?),
            };
            let result = ordering.is_some_and(|ord| match op {
                "<" => ord.is_lt(),
                "<=" => ord.is_le(),
                ">" => ord.is_gt(),
                _ => ord.is_ge(),
            });
            left = ExprValue::Bool(result);
        }
        Ok(left)
    }

    fn additive(&mut self) -> EvalResult<ExprValue> {
        let mut left = self.multiplicative()?;
        while let Some(op) = self.peek_op(&["+", "-"]) {
            self.pos += 1;
            let right = self.multiplicative()?;
            left = match (op, &left, &right) {
                ("+", ExprValue::Str(_), _) | ("+", _, ExprValue::Str(_)) => {
                    ExprValue::Str(format!("{left}{right}"))
                }
                ("+", _, _) => ExprValue::Number(left.to_number()? + right.to_number()?),
                _ => ExprValue::Number(left.to_number()? - right.to_number()?),
            };
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> EvalResult<ExprValue> {
        let mut left = self.unary()?;
        while let Some(op) = self.peek_op(&["*", "/", "%"]) {
            self.pos += 1;
            let right = self.unary()?.to_number()?;
            let l = left.to_number()?;
            if op != "*" && right == 0.0 {
                return Err(ExpressionError("division by zero".to_string()));
            }
            left = ExprValue::Number(match op {
                "*" => l * right,
                "/" => l / right,
                _ => l % right,
            });
        }
        Ok(left)
    }

    fn unary(&mut self) -> EvalResult<ExprValue> {
        if let Some(op) = self.peek_op(&["-", "!"]) {
            self.pos += 1;
            let operand = self.nested(Self::unary)?;
            return Ok(if op == "-" {
                ExprValue::Number(-operand.to_number()?)
            } else {
                ExprValue::Bool(!operand.truthy())
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> EvalResult<ExprValue> {
        match self.next() {
            Some(Token::Number(n)) => Ok(ExprValue::Number(n)),
            Some(Token::Str(s)) => Ok(ExprValue::Str(s)),
            Some(Token::Ident(ident)) => match ident.as_str() {
                "true" => Ok(ExprValue::Bool(true)),
                "false" => Ok(ExprValue::Bool(false)),
                other => Err(ExpressionError(format!("unknown identifier '{other}'"))),
            },
            Some(Token::LParen) => {
                let inner = self.nested(Self::or)?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(ExpressionError("expected ')'".to_string())),
                }
            }
            Some(token) => Err(ExpressionError(format!("unexpected token {token:?}"))),
            None => Err(ExpressionError("unexpected end of expression".to_string())),
        }
    }
}

fn loose_equals(left: &ExprValue, right: &ExprValue) -> bool {
    match (left, right) {
        (ExprValue::Str(l), ExprValue::Str(r)) => l == r,
        (ExprValue::Bool(l), ExprValue::Bool(r)) => l == r,
        _ => match (left.to_number(), right.to_number()) {
            (Ok(l), Ok(r)) => l == r,
            _ => false,
        },
    }
}

/// Evaluate an expression.
///
/// # Errors
///
/// Returns an [`ExpressionError`] on syntax errors, unknown identifiers,
/// non-numeric arithmetic operands and division by zero.
///
/// # Examples
///
/// ```
/// use cfgtree::substitution::expression::evaluate;
///
/// assert_eq!(evaluate("4000 + 2").unwrap().to_string(), "4002");
/// assert_eq!(evaluate("'port-' + (8000 + 80)").unwrap().to_string(), "port-8080");
/// assert!(evaluate("4000 +").is_err());
/// ```
pub fn evaluate(input: &str) -> Result<ExprValue, ExpressionError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
        depth: 0,
    };
    let value = parser.or()?;
    if parser.pos < parser.tokens.len() {
        return Err(ExpressionError(format!(
            "unexpected trailing input in '{}'",
            input.trim()
        )));
    }
    Ok(value)
}
