//! printf-style display templates for rendered values.
//!
//! Supported directives: `%f` (six decimals), `%.Nf` (N decimals), `%s`
//! (unit symbol) and `%%` (literal percent). A template holds exactly one
//! numeric directive and at most one symbol directive.

use crate::{UnitError, UnitResult};
use std::fmt::Write;

/// Template used when a unit does not specify its own.
pub const DEFAULT_TEMPLATE: &str = "%f %s";

const DEFAULT_PRECISION: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Value { precision: usize },
    Symbol,
}

/// Parsed display template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    /// Parse and validate a template string.
    pub fn parse(source: &str) -> UnitResult<Self> {
        let invalid = |reason| UnitError::InvalidTemplate {
            template: source.to_string(),
            reason,
        };

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut values = 0;
        let mut symbols = 0;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let piece = match chars.next() {
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some('f') => Piece::Value {
                    precision: DEFAULT_PRECISION,
                },
                Some('s') => Piece::Symbol,
                Some('.') => {
                    let mut digits = String::new();
                    while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                        digits.push(d);
                        chars.next();
                    }
                    if chars.next() != Some('f') {
                        return Err(invalid("precision must be followed by 'f'"));
                    }
                    let precision = digits
                        .parse()
                        .map_err(|_| invalid("precision is not a number"))?;
                    Piece::Value { precision }
                }
                Some(_) => return Err(invalid("unsupported directive")),
                None => return Err(invalid("dangling '%'")),
            };
            match piece {
                Piece::Value { .. } => values += 1,
                Piece::Symbol => symbols += 1,
                Piece::Literal(_) => {}
            }
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(piece);
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        if values != 1 {
            return Err(invalid("exactly one numeric directive is required"));
        }
        if symbols > 1 {
            return Err(invalid("at most one '%s' directive is allowed"));
        }

        Ok(Self {
            source: source.to_string(),
            pieces,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render `value` (already expressed in the unit) with its `symbol`.
    pub fn render(&self, value: f64, symbol: &str) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Value { precision } => {
                    let _ = write!(out, "{value:.precision$}");
                }
                Piece::Symbol => out.push_str(symbol),
            }
        }
        out
    }
}

impl Default for Template {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            pieces: vec![
                Piece::Value {
                    precision: DEFAULT_PRECISION,
                },
                Piece::Literal(" ".to_string()),
                Piece::Symbol,
            ],
        }
    }
}
