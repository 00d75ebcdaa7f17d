/// Parser for the Lua table literal that holds a picoCAD document's meshes
///
/// Only the subset picoCAD writes is understood: tables, single-quoted
/// strings without escapes, and plain decimal numbers.
use std::collections::HashMap;

use nom::{
    bytes::complete::{take_till, take_while, take_while1},
    character::complete::{char, multispace0, satisfy},
    combinator::{cut, map, opt, recognize},
    error::{ErrorKind, ParseError as NomParseError},
    sequence::{pair, terminated},
    IResult,
};

use crate::error::{ParseError, ParseErrorKind};

/// A value in the parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LuaValue {
    Number(f64),
    String(String),
    Table(LuaTable),
}

impl LuaValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&LuaTable> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// A table literal: positional entries in order plus `key=value` entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LuaTable {
    pub array: Vec<LuaValue>,
    pub dict: HashMap<String, LuaValue>,
}

impl LuaTable {
    pub fn get(&self, key: &str) -> Option<&LuaValue> {
        self.dict.get(key)
    }
}

/// nom error carrying the input position where parsing stopped
#[derive(Debug)]
struct TableError<'a> {
    input: &'a str,
    kind: ParseErrorKind,
}

impl<'a> NomParseError<&'a str> for TableError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: ParseErrorKind::Syntax(kind),
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(input: &'a str, c: char) -> Self {
        Self {
            input,
            kind: ParseErrorKind::Expected(c),
        }
    }
}

type PResult<'a, T> = IResult<&'a str, T, TableError<'a>>;

fn fail<T>(input: &str, kind: ParseErrorKind) -> PResult<'_, T> {
    Err(nom::Err::Failure(TableError { input, kind }))
}

/// Parse a table literal. Offsets in errors are byte offsets into `text`.
pub fn parse_table(text: &str) -> Result<LuaTable, ParseError> {
    let offset = |rest: &str| text.len() - rest.len();

    match terminated(table, multispace0)(text) {
        Ok(("", table)) => Ok(table),
        Ok((rest, _)) => Err(ParseError::new(offset(rest), ParseErrorKind::TrailingInput)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(ParseError::new(offset(e.input), e.kind))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::new(
            text.len(),
            ParseErrorKind::UnknownValue(None),
        )),
    }
}

fn table(input: &str) -> PResult<'_, LuaTable> {
    let (mut input, _) = terminated(char('{'), multispace0)(input)?;
    let mut table = LuaTable::default();

    loop {
        if let Some(rest) = input.strip_prefix('}') {
            return Ok((rest, table));
        }

        let (rest, key) = opt(key)(input)?;
        let (rest, value) = value(rest)?;
        match key {
            Some(key) => {
                table.dict.insert(key.to_owned(), value);
            }
            None => table.array.push(value),
        }

        // The separating comma is optional, and so is a trailing one.
        let (rest, _) = multispace0(rest)?;
        let (rest, _) = opt(terminated(char(','), multispace0))(rest)?;
        input = rest;
    }
}

fn key(input: &str) -> PResult<'_, &str> {
    let (rest, name) = recognize(pair(
        satisfy(|c: char| c.is_ascii_lowercase()),
        take_while(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
    ))(input)?;
    let (rest, _) = cut(char('='))(rest)?;
    Ok((rest, name))
}

fn value(input: &str) -> PResult<'_, LuaValue> {
    match input.chars().next() {
        Some('{') => map(table, LuaValue::Table)(input),
        Some('\'') => map(string, LuaValue::String)(input),
        Some(c) if is_number_char(c) => map(number, LuaValue::Number)(input),
        found => fail(input, ParseErrorKind::UnknownValue(found)),
    }
}

fn string(input: &str) -> PResult<'_, String> {
    let (rest, _) = char('\'')(input)?;
    let (rest, body) = take_till(|c: char| c == '\'')(rest)?;
    let closing: PResult<'_, char> = char('\'')(rest);
    match closing {
        Ok((rest, _)) => Ok((rest, body.to_owned())),
        Err(_) => fail(input, ParseErrorKind::UnterminatedString),
    }
}

fn number(input: &str) -> PResult<'_, f64> {
    let (rest, token) = take_while1(is_number_char)(input)?;
    match token.parse::<f64>() {
        Ok(n) => Ok((rest, n)),
        Err(_) => fail(input, ParseErrorKind::MalformedNumber(token.to_owned())),
    }
}

fn is_number_char(c: char) -> bool {
    c == '-' || c == '.' || c.is_ascii_digit()
}
