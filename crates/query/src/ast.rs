//! Defines the parsed form of a path expression.
use ctxpath_value::Value;
use std::fmt;
use std::str::FromStr;

/// A whole path: the `::`-separated segments in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub segments: Vec<Segment>,
}

/// One `::`-delimited unit of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// The property looked up on the current value. Never empty.
    pub key: String,
    pub filter: Option<FilterClause>,
    pub projection: Option<ProjectionClause>,
}

impl Segment {
    /// A plain key lookup without clauses.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            filter: None,
            projection: None,
        }
    }
}

/// `(op propertyKey rule literal)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub operation: FindOp,
    pub property_key: String,
    pub rule: ComparisonRule,
    pub literal: Literal,
}

/// `(map key)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionClause {
    pub key: String,
}

/// The search operation of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindOp {
    /// The first matching element.
    Find,
    /// All matching elements, in order.
    Filter,
    /// The position of the first matching element, or -1.
    FindIndex,
}

/// The eight comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonRule {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Nin,
}

/// A filter literal after best-effort decoding.
#[derive(Debug, Clone)]
pub enum Literal {
    /// The raw text decoded as JSON.
    Structured(Value),
    /// The raw text did not decode and is used verbatim.
    Raw(String),
}

impl Literal {
    /// The value the literal compares as.
    pub fn value(&self) -> Value {
        match self {
            Literal::Structured(v) => v.clone(),
            Literal::Raw(s) => Value::String(s.clone()),
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Structured(a), Literal::Structured(b)) => a.serialize() == b.serialize(),
            (Literal::Raw(a), Literal::Raw(b)) => a == b,
            _ => false,
        }
    }
}

/// Decodes a literal as JSON, falling back to the raw text.
pub fn parse_literal(raw: &str) -> Literal {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Literal::Structured(Value::from(json)),
        Err(_) => Literal::Raw(raw.to_string()),
    }
}

impl FromStr for FindOp {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "find" => Ok(FindOp::Find),
            "filter" => Ok(FindOp::Filter),
            "findindex" => Ok(FindOp::FindIndex),
            _ => Err(()),
        }
    }
}

impl FromStr for ComparisonRule {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Ok(ComparisonRule::Eq),
            "neq" => Ok(ComparisonRule::Neq),
            "lt" => Ok(ComparisonRule::Lt),
            "lte" => Ok(ComparisonRule::Lte),
            "gt" => Ok(ComparisonRule::Gt),
            "gte" => Ok(ComparisonRule::Gte),
            "in" => Ok(ComparisonRule::In),
            "nin" => Ok(ComparisonRule::Nin),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FindOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FindOp::Find => "find",
            FindOp::Filter => "filter",
            FindOp::FindIndex => "findIndex",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for ComparisonRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComparisonRule::Eq => "eq",
            ComparisonRule::Neq => "neq",
            ComparisonRule::Lt => "lt",
            ComparisonRule::Lte => "lte",
            ComparisonRule::Gt => "gt",
            ComparisonRule::Gte => "gte",
            ComparisonRule::In => "in",
            ComparisonRule::Nin => "nin",
        };
        write!(f, "{}", name)
    }
}
