//! Structured blobs logged by the backend.
//!
//! Request parameters and per-corpus hit counts are written to the log as
//! Python literals (`{'corpus': u'A,B', 'start': '0'}`). They are read back
//! with a small recursive-descent parser that only understands literal
//! syntax.

mod params;
mod parser;

pub use params::*;
pub use parser::parse_literal;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Scalars rendered the way they would appear in a query string.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Literal::Str(s) => Some(s.clone()),
            Literal::Int(i) => Some(i.to_string()),
            Literal::Float(f) => Some(f.to_string()),
            Literal::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
            Literal::None => Some(String::new()),
            Literal::List(_) | Literal::Tuple(_) | Literal::Dict(_) => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unexpected input after literal at offset {offset}")]
    TrailingInput { offset: usize },

    #[error("unknown name '{name}' at offset {offset}")]
    UnknownName { name: String, offset: usize },

    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("unterminated string")]
    UnterminatedString,

    #[error("literal nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("expected {expected}")]
    Shape { expected: &'static str },
}
