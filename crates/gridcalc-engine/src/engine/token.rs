//! Formula tokenization.
//!
//! A formula is a whitespace-separated postfix sequence. Each token is a
//! numeric literal, one of the four binary operators, or a cell reference.

use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ArithmeticFault;

static LITERAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("literal pattern is valid")
});

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_token(token: &str) -> Option<Operator> {
        match token {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    /// Compute `lhs OP rhs`, where `rhs` is the operand pushed last.
    pub fn apply(self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ArithmeticFault> {
        let result = match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Sub => lhs.checked_sub(rhs),
            Operator::Mul => lhs.checked_mul(rhs),
            Operator::Div => {
                if rhs.is_zero() {
                    return Err(ArithmeticFault::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        result.ok_or(ArithmeticFault::Overflow)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        };
        f.write_str(symbol)
    }
}

/// A classified formula token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    Operator(Operator),
    Reference(&'a str),
    Unrecognized(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a raw token. Literals are checked first, so "-5" is a number
    /// while a bare "-" is subtraction.
    pub fn classify(raw: &'a str) -> Token<'a> {
        if is_numeric_literal(raw) {
            Token::Literal(raw)
        } else if let Some(op) = Operator::from_token(raw) {
            Token::Operator(op)
        } else if super::CellRef::looks_like_reference(raw) {
            Token::Reference(raw)
        } else {
            Token::Unrecognized(raw)
        }
    }
}

/// Iterate over the classified tokens of a formula.
pub fn tokenize(formula: &str) -> impl Iterator<Item = Token<'_>> {
    formula.split_whitespace().map(Token::classify)
}

/// True iff the token is a base-10 decimal: optional sign, digits, optional fraction.
pub fn is_numeric_literal(token: &str) -> bool {
    LITERAL_PATTERN.is_match(token)
}

/// Parse a numeric literal. Returns None when the token is not a literal or
/// does not fit in a `Decimal`.
pub fn parse_literal(token: &str) -> Option<Decimal> {
    if !is_numeric_literal(token) {
        return None;
    }

    let (negative, digits) = match token.as_bytes()[0] {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);

    let magnitude = if digits.starts_with('.') {
        Decimal::from_str(&format!("0{digits}"))
    } else {
        Decimal::from_str(digits)
    }
    .ok()?;

    Some(if negative { -magnitude } else { magnitude })
}
