//! Free factory functions for building restrictions fluently.
//!
//! ```rust,ignore
//! use datakit_query::restrict;
//!
//! let r = restrict::all(vec![
//!     restrict::equal_to("status", "active"),
//!     restrict::starts_with("name", "Hib"),
//! ]);
//! ```

use crate::constraint::{Constraint, Like};
use crate::errors::Error;
use crate::expression::Expression;
use crate::pattern::Pattern;
use crate::restriction::{Combine, CompositeRestriction, Restriction};
use crate::value::Value;

/// The restriction that matches everything.
#[must_use]
pub fn unrestricted() -> Restriction {
    Restriction::Unrestricted
}

/// The restriction that matches nothing.
#[must_use]
pub fn unmatchable() -> Restriction {
    Restriction::Unmatchable
}

/// Require every listed restriction to match (AND semantics).
///
/// An empty list yields the [`unrestricted`] sentinel; this zero-argument
/// form is the only valid empty composite.
#[must_use]
pub fn all(restrictions: Vec<Restriction>) -> Restriction {
    combine(Combine::All, restrictions)
}

/// Allow any listed restriction to match (OR semantics).
///
/// An empty list yields the [`unrestricted`] sentinel, mirroring [`all`].
#[must_use]
pub fn any(restrictions: Vec<Restriction>) -> Restriction {
    combine(Combine::Any, restrictions)
}

/// Negate a restriction.
#[must_use]
pub fn not(restriction: Restriction) -> Restriction {
    restriction.negate()
}

/// `attribute = value`
#[must_use]
pub fn equal_to(attribute: &str, value: impl Into<Value>) -> Restriction {
    Expression::attribute(attribute).equal_to(value)
}

/// `attribute <> value`
#[must_use]
pub fn not_equal_to(attribute: &str, value: impl Into<Value>) -> Restriction {
    Expression::attribute(attribute).not_equal_to(value)
}

/// `attribute > value`
#[must_use]
pub fn greater_than(attribute: &str, value: impl Into<Value>) -> Restriction {
    Expression::attribute(attribute).greater_than(value)
}

/// `attribute >= value`
#[must_use]
pub fn at_least(attribute: &str, value: impl Into<Value>) -> Restriction {
    Expression::attribute(attribute).at_least(value)
}

/// `attribute < value`
#[must_use]
pub fn less_than(attribute: &str, value: impl Into<Value>) -> Restriction {
    Expression::attribute(attribute).less_than(value)
}

/// `attribute <= value`
#[must_use]
pub fn at_most(attribute: &str, value: impl Into<Value>) -> Restriction {
    Expression::attribute(attribute).at_most(value)
}

/// `attribute BETWEEN lower AND upper`
#[must_use]
pub fn between(
    attribute: &str,
    lower: impl Into<Value>,
    upper: impl Into<Value>,
) -> Restriction {
    Expression::attribute(attribute).between(lower, upper)
}

/// `attribute IN (values...)`
///
/// # Errors
///
/// Returns [`Error::EmptyValues`] when `values` is empty.
pub fn one_of<V: Into<Value>>(
    attribute: &str,
    values: impl IntoIterator<Item = V>,
) -> Result<Restriction, Error> {
    Expression::attribute(attribute).one_of(values)
}

/// `attribute LIKE pattern`
#[must_use]
pub fn like(attribute: &str, pattern: Pattern) -> Restriction {
    Expression::attribute(attribute).like(pattern)
}

/// `attribute LIKE 'text%'` with `text` fully escaped.
#[must_use]
pub fn starts_with(attribute: &str, text: &str) -> Restriction {
    Expression::attribute(attribute).like(Pattern::prefix(text))
}

/// `attribute LIKE '%text'` with `text` fully escaped.
#[must_use]
pub fn ends_with(attribute: &str, text: &str) -> Restriction {
    Expression::attribute(attribute).like(Pattern::suffix(text))
}

/// `attribute LIKE '%text%'` with `text` fully escaped.
#[must_use]
pub fn contains(attribute: &str, text: &str) -> Restriction {
    Expression::attribute(attribute).like(Pattern::substring(text))
}

/// Case-insensitive `attribute LIKE pattern`.
#[must_use]
pub fn like_ignoring_case(attribute: &str, pattern: Pattern) -> Restriction {
    Restriction::basic(
        Expression::attribute(attribute),
        Constraint::Like(Like::new(pattern).ignoring_case()),
    )
}

/// `attribute IS NULL`
#[must_use]
pub fn is_null(attribute: &str) -> Restriction {
    Expression::attribute(attribute).is_null()
}

/// `attribute IS NOT NULL`
#[must_use]
pub fn is_not_null(attribute: &str) -> Restriction {
    Expression::attribute(attribute).is_not_null()
}

fn combine(combine: Combine, restrictions: Vec<Restriction>) -> Restriction {
    if restrictions.is_empty() {
        return Restriction::Unrestricted;
    }
    // Non-empty, so the constructor cannot fail.
    match CompositeRestriction::new(combine, restrictions) {
        Ok(composite) => Restriction::Composite(composite),
        Err(_) => Restriction::Unrestricted,
    }
}
