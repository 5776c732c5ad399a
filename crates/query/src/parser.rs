//! A `nom`-based parser for path expressions.
//!
//! A segment is `key`, optionally followed by a filter group and then a map
//! group. Groups are recognised by their leading keyword; a group whose text
//! ends before all fields are present is consumed but dropped, so
//! `items(find id eq)` reads as `items`. A group with an invalid field is not a
//! group at all and stays part of the key.
use super::ast::{
    ComparisonRule, FilterClause, FindOp, Path, ProjectionClause, Segment, parse_literal,
};
use crate::error::QueryError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{alpha1, char, multispace1},
    combinator::{all_consuming, map_res, opt, peek},
    error::{Error, ErrorKind},
    sequence::{pair, preceded},
};

/// The child-access delimiter.
pub const DELIMITER: &str = "::";

// --- Main Public Parser ---

/// Parses a whole path. The empty string parses to a path with no segments.
pub fn parse_path(input: &str) -> Result<Path, QueryError> {
    if input.is_empty() {
        return Ok(Path::default());
    }
    let segments = input
        .split(DELIMITER)
        .enumerate()
        .map(|(index, raw)| {
            parse_segment(raw).ok_or_else(|| QueryError::MalformedSegment {
                path: input.to_string(),
                index,
                reason: "segment is empty".to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Path { segments })
}

/// Parses a single segment. Returns `None` for an empty segment.
///
/// The key is the shortest non-empty prefix after which the remainder parses as
/// clause groups; when there is none, the whole segment is the key.
pub fn parse_segment(raw: &str) -> Option<Segment> {
    if raw.is_empty() {
        return None;
    }
    for (pos, _) in raw.match_indices('(').filter(|(pos, _)| *pos > 0) {
        if let Ok((_, (filter, projection))) = all_consuming(clauses).parse(&raw[pos..]) {
            return Some(Segment {
                key: raw[..pos].to_string(),
                filter,
                projection,
            });
        }
    }
    Some(Segment::key(raw))
}

// --- Combinators ---

type Clauses = (Option<FilterClause>, Option<ProjectionClause>);

fn clauses(input: &str) -> IResult<&str, Clauses> {
    let (rest, (filter, projection)) = pair(opt(filter_group), opt(map_group)).parse(input)?;
    if filter.is_none() && projection.is_none() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((rest, (filter.flatten(), projection.flatten())))
}

/// `(findOp ...)`. Yields `None` when the group is recognised but incomplete.
fn filter_group(input: &str) -> IResult<&str, Option<FilterClause>> {
    let start = input;
    let (input, _) = char('(').parse(input)?;
    let (input, operation) = map_res(alpha1, str::parse::<FindOp>).parse(input)?;
    let (input, _) = peek(alt((multispace1, tag(")")))).parse(input)?;
    let (input, body) = group_body(input)?;

    let clause = match filter_fields(body) {
        Ok((literal, (property_key, rule))) => Some(FilterClause {
            operation,
            property_key: property_key.to_string(),
            rule,
            literal: parse_literal(&unescape(literal)),
        }),
        Err(e) if ran_out(&e) => {
            log::debug!("Dropping incomplete filter clause '({}{})'", operation, body);
            None
        }
        Err(_) => return Err(nom::Err::Error(Error::new(start, ErrorKind::Verify))),
    };
    Ok((input, clause))
}

/// `(map key)`. Yields `None` when the group is recognised but incomplete.
fn map_group(input: &str) -> IResult<&str, Option<ProjectionClause>> {
    let start = input;
    let (input, _) = char('(').parse(input)?;
    let (input, _) = tag_no_case("map").parse(input)?;
    let (input, _) = peek(alt((multispace1, tag(")")))).parse(input)?;
    let (input, body) = group_body(input)?;

    let clause = match all_consuming(preceded(multispace1, property_key)).parse(body) {
        Ok((_, key)) => Some(ProjectionClause {
            key: key.to_string(),
        }),
        Err(e) if ran_out(&e) => {
            log::debug!("Dropping incomplete map clause '(map{})'", body);
            None
        }
        Err(_) => return Err(nom::Err::Error(Error::new(start, ErrorKind::Verify))),
    };
    Ok((input, clause))
}

/// True when a field parser failed only because the group text ended.
fn ran_out(err: &nom::Err<Error<&str>>) -> bool {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.input.is_empty(),
        nom::Err::Incomplete(_) => true,
    }
}

/// Parses ` propertyKey rule ` and leaves the literal as the remainder.
fn filter_fields(body: &str) -> IResult<&str, (&str, ComparisonRule)> {
    let (body, property_key) = preceded(multispace1, property_key).parse(body)?;
    let (body, rule) = preceded(multispace1, rule).parse(body)?;
    let (literal, _) = multispace1(body)?;
    Ok((literal, (property_key, rule)))
}

fn property_key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

fn rule(input: &str) -> IResult<&str, ComparisonRule> {
    map_res(alpha1, str::parse::<ComparisonRule>).parse(input)
}

/// Takes everything up to the first unescaped `)` and consumes the parenthesis.
/// A backslash escapes the character after it; see [`unescape`].
fn group_body(input: &str) -> IResult<&str, &str> {
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        match c {
            ')' if !escaped => return Ok((&input[i + 1..], &input[..i])),
            '\\' => escaped = !escaped,
            _ => escaped = false,
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}

/// Collapses `\(`, `\)` and `\\` to the escaped character. Any other
/// backslash is kept as written.
fn unescape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek().filter(|n| matches!(n, '(' | ')' | '\\')) {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}
