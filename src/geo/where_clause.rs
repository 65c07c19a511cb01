//! Parsing of the restricted SQL-style where clauses accepted by
//! [`GeoDatabase::select`](crate::geo::GeoDatabase::select).
//!
//! Grammar: `condition (AND condition)*` where a condition is either
//! `column op literal` (ops `=`, `<>`, `!=`, `>`, `>=`, `<`, `<=`) or
//! `column IS [NOT] NULL`. String literals are single-quoted with `''` as
//! the escape; keywords are case-insensitive. The empty clause matches
//! every row.
use crate::datatypes::{AnyValue, BooleanArray};
use crate::error::{AvocetError, Result};
use crate::frame::DataFrame;
use crate::series::comparison::CompareOp;

/// A parsed where clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Always true.
    True,
    /// Compare a column to a literal.
    Compare {
        column: String,
        op: CompareOp,
        value: AnyValue,
    },
    /// `IS NULL` / `IS NOT NULL`.
    IsNull { column: String, negated: bool },
    /// AND combination.
    And(Vec<Predicate>),
}

impl Predicate {
    /// Parse a where clause.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Predicate::True);
        }
        let tokens = tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0 };
        let predicate = parser.clause()?;
        if parser.pos != parser.tokens.len() {
            return Err(parse_error(format!(
                "unexpected trailing input near {:?}",
                parser.tokens[parser.pos]
            )));
        }
        Ok(predicate)
    }

    /// Evaluate to a row mask over `df`. Null comparisons come out null and
    /// are dropped by `DataFrame::filter`, which gives SQL semantics.
    pub fn mask(&self, df: &DataFrame) -> Result<BooleanArray> {
        match self {
            Predicate::True => Ok(BooleanArray::new_from_slice(
                "mask",
                &vec![true; df.height()],
            )),
            Predicate::Compare { column, op, value } => df.column(column)?.compare(*op, value),
            Predicate::IsNull { column, negated } => {
                let series = df.column(column)?;
                Ok(if *negated {
                    series.is_not_null()
                } else {
                    series.is_null()
                })
            }
            Predicate::And(conditions) => {
                let mut out = BooleanArray::new_from_slice("mask", &vec![true; df.height()]);
                for condition in conditions {
                    out = &out & &condition.mask(df)?;
                }
                Ok(out)
            }
        }
    }
}

fn parse_error(msg: impl Into<String>) -> AvocetError {
    AvocetError::WhereClause(msg.into())
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Op(CompareOp),
    And,
    Is,
    Not,
    Null,
    True,
    False,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '\'' => {
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some('\'') => {
                            if chars.peek() == Some(&'\'') {
                                chars.next();
                                s.push('\'');
                            } else {
                                break;
                            }
                        }
                        Some(c) => s.push(c),
                        None => return Err(parse_error("unterminated string literal")),
                    }
                }
                tokens.push(Token::Str(s));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        word.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match word.to_ascii_uppercase().as_str() {
                    "AND" => Token::And,
                    "IS" => Token::Is,
                    "NOT" => Token::Not,
                    "NULL" => Token::Null,
                    "TRUE" => Token::True,
                    "FALSE" => Token::False,
                    _ => Token::Ident(word),
                });
            }
            c if c.is_ascii_digit() || c == '-' || c == '.' => {
                let mut number = String::new();
                number.push(c);
                chars.next();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '+' || c == '-'
                    {
                        number.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if let Ok(v) = number.parse::<i64>() {
                    tokens.push(Token::Int(v));
                } else if let Ok(v) = number.parse::<f64>() {
                    tokens.push(Token::Float(v));
                } else {
                    return Err(parse_error(format!("invalid number literal {:?}", number)));
                }
            }
            '=' => {
                chars.next();
                tokens.push(Token::Op(CompareOp::Equal));
            }
            '!' => {
                chars.next();
                if chars.next() != Some('=') {
                    return Err(parse_error("expected '=' after '!'"));
                }
                tokens.push(Token::Op(CompareOp::NotEqual));
            }
            '>' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Op(CompareOp::GreaterEqual));
                } else {
                    tokens.push(Token::Op(CompareOp::GreaterThan));
                }
            }
            '<' => {
                chars.next();
                match chars.peek() {
                    Some('=') => {
                        chars.next();
                        tokens.push(Token::Op(CompareOp::LessEqual));
                    }
                    Some('>') => {
                        chars.next();
                        tokens.push(Token::Op(CompareOp::NotEqual));
                    }
                    _ => tokens.push(Token::Op(CompareOp::LessThan)),
                }
            }
            c => return Err(parse_error(format!("unexpected character {:?}", c))),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn next(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| parse_error("unexpected end of input"))?;
        self.pos += 1;
        Ok(token)
    }

    fn clause(&mut self) -> Result<Predicate> {
        let mut conditions = vec![self.condition()?];
        while self.tokens.get(self.pos) == Some(&Token::And) {
            self.pos += 1;
            conditions.push(self.condition()?);
        }
        if conditions.len() == 1 {
            Ok(conditions.pop().unwrap_or(Predicate::True))
        } else {
            Ok(Predicate::And(conditions))
        }
    }

    fn condition(&mut self) -> Result<Predicate> {
        let column = match self.next()? {
            Token::Ident(name) => name,
            other => return Err(parse_error(format!("expected column name, got {:?}", other))),
        };
        match self.next()? {
            Token::Op(op) => {
                let value = match self.next()? {
                    Token::Str(s) => AnyValue::Utf8(s),
                    Token::Int(v) => AnyValue::Int64(v),
                    Token::Float(v) => AnyValue::Float64(v),
                    Token::True => AnyValue::Boolean(true),
                    Token::False => AnyValue::Boolean(false),
                    Token::Null => AnyValue::Null,
                    other => {
                        return Err(parse_error(format!("expected literal, got {:?}", other)))
                    }
                };
                Ok(Predicate::Compare { column, op, value })
            }
            Token::Is => {
                let negated = if self.tokens.get(self.pos) == Some(&Token::Not) {
                    self.pos += 1;
                    true
                } else {
                    false
                };
                match self.next()? {
                    Token::Null => Ok(Predicate::IsNull { column, negated }),
                    other => Err(parse_error(format!("expected NULL, got {:?}", other))),
                }
            }
            other => Err(parse_error(format!(
                "expected comparison or IS, got {:?}",
                other
            ))),
        }
    }
}
