//! Loads the solver's output document and parses its serialized antichain.
//!
//! The `minimals` payload is a Python literal: a set of numeric tuples,
//! optionally wrapped in `frozenset(...)`, with numbers plain or wrapped in
//! `Decimal('...')`. A restricted recursive-descent parser accepts exactly
//! that grammar and nothing else; the payload is never evaluated.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::TradespaceError;

/// One point of the 3D non-dominated set, tuple order (cost, load, time).
/// Non-dominance is guaranteed by the upstream solver and not re-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParetoPoint {
    pub cost: f64,
    pub load: f64,
    pub time: f64,
}

/// Which result branch of the solver output to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Optimistic,
    Pessimistic,
}

impl ResultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultKind::Optimistic => "optimistic",
            ResultKind::Pessimistic => "pessimistic",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "optimistic" => Some(ResultKind::Optimistic),
            "pessimistic" => Some(ResultKind::Pessimistic),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResultBranch {
    minimals: String,
}

/// Load the antichain for one result branch, sorted by (load, cost, time)
/// for deterministic rendering order. Two-component tuples get time 0.
pub fn load_antichain(
    path: impl AsRef<Path>,
    which: ResultKind,
) -> Result<Vec<ParetoPoint>, TradespaceError> {
    let raw = fs::read_to_string(path).map_err(TradespaceError::Read)?;
    let document: HashMap<String, serde_yaml::Value> =
        serde_yaml::from_str(&raw).map_err(TradespaceError::Parse)?;
    let branch = document
        .get(which.as_str())
        .ok_or(TradespaceError::MissingBranch(which.as_str()))?;
    let branch: ResultBranch =
        serde_yaml::from_value(branch.clone()).map_err(TradespaceError::Parse)?;

    let tuples = parse_minimals(&branch.minimals).map_err(TradespaceError::Minimals)?;
    if tuples.is_empty() {
        return Err(TradespaceError::EmptyAntichain);
    }

    let mut points = Vec::with_capacity(tuples.len());
    for tuple in &tuples {
        if tuple.len() < 2 {
            return Err(TradespaceError::Minimals(format!(
                "expected (cost, load[, time]) tuples, got {} components",
                tuple.len()
            )));
        }
        points.push(ParetoPoint {
            cost: tuple[0],
            load: tuple[1],
            time: tuple.get(2).copied().unwrap_or(0.0),
        });
    }

    points.sort_by(|left, right| {
        left.load
            .total_cmp(&right.load)
            .then_with(|| left.cost.total_cmp(&right.cost))
            .then_with(|| left.time.total_cmp(&right.time))
    });

    Ok(points)
}

/// Parse the serialized antichain into raw tuples. Accepts a bare set
/// literal or a `frozenset(...)` wrapper around one.
pub fn parse_minimals(input: &str) -> Result<Vec<Vec<f64>>, String> {
    LiteralParser::new(input).parse_root()
}

struct LiteralParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn parse_root(&mut self) -> Result<Vec<Vec<f64>>, String> {
        self.skip_ws();
        let tuples = if self.eat_keyword("frozenset") {
            self.skip_ws();
            self.expect(b'(')?;
            self.skip_ws();
            // `frozenset()` is how Python renders the empty set
            let inner = if self.peek() == Some(b')') {
                Vec::new()
            } else {
                self.parse_set()?
            };
            self.skip_ws();
            self.expect(b')')?;
            inner
        } else {
            self.parse_set()?
        };
        self.skip_ws();
        if self.pos != self.bytes.len() {
            return Err(format!("trailing input at byte {}", self.pos));
        }
        Ok(tuples)
    }

    fn parse_set(&mut self) -> Result<Vec<Vec<f64>>, String> {
        self.expect(b'{')?;
        let mut tuples = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(tuples);
        }
        loop {
            self.skip_ws();
            tuples.push(self.parse_tuple()?);
            self.skip_ws();
            match self.bump() {
                Some(b',') => {
                    self.skip_ws();
                    if self.peek() == Some(b'}') {
                        self.pos += 1;
                        return Ok(tuples);
                    }
                }
                Some(b'}') => return Ok(tuples),
                other => return Err(unexpected(other, "',' or '}' in set")),
            }
        }
    }

    fn parse_tuple(&mut self) -> Result<Vec<f64>, String> {
        self.expect(b'(')?;
        let mut values = Vec::new();
        loop {
            self.skip_ws();
            values.push(self.parse_number()?);
            self.skip_ws();
            match self.bump() {
                Some(b',') => {
                    self.skip_ws();
                    if self.peek() == Some(b')') {
                        self.pos += 1;
                        return Ok(values);
                    }
                }
                Some(b')') => return Ok(values),
                other => return Err(unexpected(other, "',' or ')' in tuple")),
            }
        }
    }

    fn parse_number(&mut self) -> Result<f64, String> {
        if self.eat_keyword("Decimal") {
            self.skip_ws();
            self.expect(b'(')?;
            self.skip_ws();
            let quote = match self.bump() {
                Some(q @ (b'\'' | b'"')) => q,
                other => return Err(unexpected(other, "quoted Decimal argument")),
            };
            let start = self.pos;
            while let Some(byte) = self.peek() {
                if byte == quote {
                    break;
                }
                self.pos += 1;
            }
            let end = self.pos;
            self.expect(quote)?;
            self.skip_ws();
            self.expect(b')')?;
            return self.number_from(start, end);
        }

        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' | b'.' => self.pos += 1,
                b'e' | b'E' => {
                    self.pos += 1;
                    if matches!(self.peek(), Some(b'+' | b'-')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        self.number_from(start, self.pos)
    }

    fn number_from(&self, start: usize, end: usize) -> Result<f64, String> {
        let text = std::str::from_utf8(&self.bytes[start..end])
            .map_err(|_| "non-ASCII bytes in numeric literal".to_string())?;
        text.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid numeric literal {text:?}"))
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek();
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }

    fn expect(&mut self, expected: u8) -> Result<(), String> {
        match self.bump() {
            Some(byte) if byte == expected => Ok(()),
            other => Err(unexpected(other, &format!("'{}'", expected as char))),
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.bytes[self.pos..].starts_with(keyword.as_bytes()) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }
}

fn unexpected(found: Option<u8>, wanted: &str) -> String {
    match found {
        Some(byte) => format!("expected {wanted}, found '{}'", byte as char),
        None => format!("expected {wanted}, found end of input"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_set_of_tuples() {
        let tuples = parse_minimals("{(100.0, 50.0, 10.0), (90.0, 60.0, 5.0)}").unwrap();
        assert_eq!(tuples.len(), 2);
        assert_eq!(tuples[0], vec![100.0, 50.0, 10.0]);
    }

    #[test]
    fn parses_frozenset_wrapper_and_decimal_calls() {
        let raw = "frozenset({(Decimal('2000000'), Decimal('7000'), Decimal('6'))})";
        let tuples = parse_minimals(raw).unwrap();
        assert_eq!(tuples, vec![vec![2_000_000.0, 7_000.0, 6.0]]);
    }

    #[test]
    fn decimal_and_plain_literals_agree() {
        let plain = parse_minimals("{(12.5, 3e2)}").unwrap();
        let wrapped = parse_minimals("{(Decimal('12.5'), Decimal('3e2'))}").unwrap();
        assert_eq!(plain, wrapped);
    }

    #[test]
    fn empty_frozenset_parses_to_no_tuples() {
        assert!(parse_minimals("frozenset()").unwrap().is_empty());
        assert!(parse_minimals("frozenset({})").unwrap().is_empty());
    }

    #[test]
    fn trailing_commas_are_tolerated() {
        let tuples = parse_minimals("{(1.0, 2.0,), (3.0, 4.0),}").unwrap();
        assert_eq!(tuples.len(), 2);
    }

    #[test]
    fn rejects_anything_outside_the_grammar() {
        assert!(parse_minimals("__import__('os')").is_err());
        assert!(parse_minimals("{(1.0, open('x'))}").is_err());
        assert!(parse_minimals("{(1.0, 2.0)} extra").is_err());
        assert!(parse_minimals("{(1.0,, 2.0)}").is_err());
        assert!(parse_minimals("").is_err());
    }

    #[test]
    fn negative_and_signed_exponent_literals_parse() {
        let tuples = parse_minimals("{(-1.5, +2.0, 1e-3)}").unwrap();
        assert_eq!(tuples, vec![vec![-1.5, 2.0, 0.001]]);
    }
}
