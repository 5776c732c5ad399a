//! Evaluates comparison rules between an element's property and a literal.
use crate::ast::ComparisonRule;
use ctxpath_value::Value;
use ctxpath_value::coerce::{js_compare, loose_eq, same_value_zero, to_js_string};
use std::cmp::Ordering;
use thiserror::Error;

/// A comparison that could not be carried out.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("'{rule}' needs a string or list on the right-hand side, found {found}")]
    NotAContainer {
        rule: ComparisonRule,
        found: &'static str,
    },
}

/// Applies `rule` to `a` (the element's property) and `b` (the literal).
///
/// Never fails: a comparison that cannot be carried out is a non-match.
pub fn apply_rule(a: &Value, b: &Value, rule: ComparisonRule) -> bool {
    try_apply_rule(a, b, rule).unwrap_or_else(|e| {
        log::trace!("Comparison treated as non-match: {}", e);
        false
    })
}

/// Applies `rule`, reporting comparisons that cannot be carried out.
pub fn try_apply_rule(a: &Value, b: &Value, rule: ComparisonRule) -> Result<bool, RuleError> {
    let ordering = || js_compare(a, b);
    Ok(match rule {
        ComparisonRule::Eq => loose_eq(a, b),
        ComparisonRule::Neq => !loose_eq(a, b),
        ComparisonRule::Lt => ordering() == Some(Ordering::Less),
        ComparisonRule::Lte => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
        ComparisonRule::Gt => ordering() == Some(Ordering::Greater),
        ComparisonRule::Gte => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
        ComparisonRule::In => includes(b, a, rule)?,
        ComparisonRule::Nin => !includes(b, a, rule)?,
    })
}

/// `haystack` contains `needle`: a substring test for text, membership for lists.
fn includes(haystack: &Value, needle: &Value, rule: ComparisonRule) -> Result<bool, RuleError> {
    match haystack {
        Value::String(s) => Ok(s.contains(to_js_string(needle).as_str())),
        Value::List(items) => Ok(items.iter().any(|item| same_value_zero(item, needle))),
        other => Err(RuleError::NotAContainer {
            rule,
            found: other.type_name(),
        }),
    }
}
