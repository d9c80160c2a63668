//! The closed family of comparison constraints.
//!
//! Each variant knows its own negation partner, and negation is an
//! involution: `c.negate().negate() == c` for every variant. The
//! `ignore_case` flag carried by [`Like`] is orthogonal to negation and
//! survives it unchanged.

use std::fmt;

use crate::errors::Error;
use crate::expression::Expression;
use crate::pattern::Pattern;
use crate::value::Value;

/// A textual matching constraint: a [`Pattern`] plus case sensitivity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Like {
    pattern: Pattern,
    ignore_case: bool,
}

impl Like {
    /// Case-sensitive match against `pattern`.
    #[must_use]
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            ignore_case: false,
        }
    }

    /// Switch this match to ignore ASCII case.
    #[must_use]
    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Reference evaluation of this match against `text`.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.matches_folded(text, self.ignore_case)
    }
}

/// How a value compares to an expression.
///
/// A closed, exhaustively matchable set: providers translate these variants
/// into their native query language and cannot silently ignore a new one.
/// Operands are [`Expression`]s, typically literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    EqualTo(Expression),
    NotEqualTo(Expression),
    GreaterThan(Expression),
    GreaterThanOrEqual(Expression),
    LessThan(Expression),
    LessThanOrEqual(Expression),
    Between { lower: Expression, upper: Expression },
    NotBetween { lower: Expression, upper: Expression },
    In(Vec<Expression>),
    NotIn(Vec<Expression>),
    Like(Like),
    NotLike(Like),
    Null,
    NotNull,
}

impl Constraint {
    pub fn equal_to(value: impl Into<Value>) -> Self {
        Constraint::EqualTo(Expression::Literal(value.into()))
    }

    pub fn not_equal_to(value: impl Into<Value>) -> Self {
        Constraint::NotEqualTo(Expression::Literal(value.into()))
    }

    pub fn greater_than(value: impl Into<Value>) -> Self {
        Constraint::GreaterThan(Expression::Literal(value.into()))
    }

    /// Greater than or equal; the lower bound is included.
    pub fn at_least(value: impl Into<Value>) -> Self {
        Constraint::GreaterThanOrEqual(Expression::Literal(value.into()))
    }

    pub fn less_than(value: impl Into<Value>) -> Self {
        Constraint::LessThan(Expression::Literal(value.into()))
    }

    /// Less than or equal; the upper bound is included.
    pub fn at_most(value: impl Into<Value>) -> Self {
        Constraint::LessThanOrEqual(Expression::Literal(value.into()))
    }

    pub fn between(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Constraint::Between {
            lower: Expression::Literal(lower.into()),
            upper: Expression::Literal(upper.into()),
        }
    }

    pub fn not_between(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Constraint::NotBetween {
            lower: Expression::Literal(lower.into()),
            upper: Expression::Literal(upper.into()),
        }
    }

    /// Membership in a non-empty value list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyValues`] when `values` yields nothing.
    pub fn one_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Result<Self, Error> {
        Ok(Constraint::In(in_operands(values)?))
    }

    /// Exclusion from a non-empty value list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyValues`] when `values` yields nothing.
    pub fn not_one_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Result<Self, Error> {
        Ok(Constraint::NotIn(in_operands(values)?))
    }

    pub fn like(pattern: Pattern) -> Self {
        Constraint::Like(Like::new(pattern))
    }

    pub fn not_like(pattern: Pattern) -> Self {
        Constraint::NotLike(Like::new(pattern))
    }

    /// The exact logical complement under two-valued semantics.
    ///
    /// Strict and inclusive bounds swap across negation
    /// (`GreaterThan` ↔ `LessThanOrEqual`), and case sensitivity is
    /// preserved unchanged.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Constraint::EqualTo(v) => Constraint::NotEqualTo(v),
            Constraint::NotEqualTo(v) => Constraint::EqualTo(v),
            Constraint::GreaterThan(v) => Constraint::LessThanOrEqual(v),
            Constraint::LessThanOrEqual(v) => Constraint::GreaterThan(v),
            Constraint::GreaterThanOrEqual(v) => Constraint::LessThan(v),
            Constraint::LessThan(v) => Constraint::GreaterThanOrEqual(v),
            Constraint::Between { lower, upper } => Constraint::NotBetween { lower, upper },
            Constraint::NotBetween { lower, upper } => Constraint::Between { lower, upper },
            Constraint::In(values) => Constraint::NotIn(values),
            Constraint::NotIn(values) => Constraint::In(values),
            Constraint::Like(like) => Constraint::NotLike(like),
            Constraint::NotLike(like) => Constraint::Like(like),
            Constraint::Null => Constraint::NotNull,
            Constraint::NotNull => Constraint::Null,
        }
    }

    /// Number of operands carried by this variant.
    ///
    /// Fixed per variant: 0 for null checks, 2 for ranges, the list length
    /// for membership, 1 otherwise. Advertised for providers; not enforced
    /// beyond construction.
    #[must_use]
    pub fn operand_count(&self) -> usize {
        match self {
            Constraint::Null | Constraint::NotNull => 0,
            Constraint::Between { .. } | Constraint::NotBetween { .. } => 2,
            Constraint::In(values) | Constraint::NotIn(values) => values.len(),
            Constraint::EqualTo(_)
            | Constraint::NotEqualTo(_)
            | Constraint::GreaterThan(_)
            | Constraint::GreaterThanOrEqual(_)
            | Constraint::LessThan(_)
            | Constraint::LessThanOrEqual(_)
            | Constraint::Like(_)
            | Constraint::NotLike(_) => 1,
        }
    }
}

impl fmt::Display for Constraint {
    /// The operator-and-operand half of a rendered leaf restriction,
    /// e.g. `= 'Hibernate'` or `IS NOT NULL`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::EqualTo(v) => write!(f, "= {v}"),
            Constraint::NotEqualTo(v) => write!(f, "<> {v}"),
            Constraint::GreaterThan(v) => write!(f, "> {v}"),
            Constraint::GreaterThanOrEqual(v) => write!(f, ">= {v}"),
            Constraint::LessThan(v) => write!(f, "< {v}"),
            Constraint::LessThanOrEqual(v) => write!(f, "<= {v}"),
            Constraint::Between { lower, upper } => write!(f, "BETWEEN {lower} AND {upper}"),
            Constraint::NotBetween { lower, upper } => {
                write!(f, "NOT BETWEEN {lower} AND {upper}")
            }
            Constraint::In(values) => write!(f, "IN ({})", join(values)),
            Constraint::NotIn(values) => write!(f, "NOT IN ({})", join(values)),
            Constraint::Like(like) => write!(f, "LIKE {}", like.pattern()),
            Constraint::NotLike(like) => write!(f, "NOT LIKE {}", like.pattern()),
            Constraint::Null => f.write_str("IS NULL"),
            Constraint::NotNull => f.write_str("IS NOT NULL"),
        }
    }
}

fn join(values: &[Expression]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn in_operands<V: Into<Value>>(
    values: impl IntoIterator<Item = V>,
) -> Result<Vec<Expression>, Error> {
    let operands: Vec<Expression> = values
        .into_iter()
        .map(|v| Expression::Literal(v.into()))
        .collect();
    if operands.is_empty() {
        return Err(Error::EmptyValues);
    }
    Ok(operands)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn sample_variants() -> Vec<Constraint> {
        vec![
            Constraint::equal_to("x"),
            Constraint::not_equal_to("x"),
            Constraint::greater_than(3),
            Constraint::at_least(3),
            Constraint::less_than(3),
            Constraint::at_most(3),
            Constraint::between(1, 9),
            Constraint::not_between(1, 9),
            Constraint::one_of(["a", "b"]).unwrap(),
            Constraint::not_one_of(["a", "b"]).unwrap(),
            Constraint::like(Pattern::prefix("Hib")),
            Constraint::not_like(Pattern::prefix("Hib")),
            Constraint::Null,
            Constraint::NotNull,
        ]
    }

    #[test]
    fn negation_is_an_involution() {
        for c in sample_variants() {
            assert_eq!(c.clone().negate().negate(), c);
        }
    }

    #[test]
    fn strict_and_inclusive_bounds_swap_under_negation() {
        assert_eq!(
            Constraint::at_least(5).negate(),
            Constraint::less_than(5)
        );
        assert_eq!(
            Constraint::greater_than(5).negate(),
            Constraint::at_most(5)
        );
        assert_eq!(Constraint::Null.negate(), Constraint::NotNull);
    }

    #[test]
    fn ignore_case_survives_negation() {
        let like = Constraint::Like(Like::new(Pattern::prefix("hib")).ignoring_case());
        let negated = like.negate();
        let Constraint::NotLike(inner) = &negated else {
            panic!("expected NOT LIKE");
        };
        assert!(inner.is_ignore_case());
        assert_eq!(negated.negate(), {
            Constraint::Like(Like::new(Pattern::prefix("hib")).ignoring_case())
        });
    }

    #[test]
    fn empty_value_lists_are_rejected() {
        assert_eq!(
            Constraint::one_of(Vec::<Value>::new()).unwrap_err(),
            Error::EmptyValues
        );
        assert_eq!(
            Constraint::not_one_of(Vec::<Value>::new()).unwrap_err(),
            Error::EmptyValues
        );
    }

    #[test]
    fn operand_counts_are_fixed_per_variant() {
        assert_eq!(Constraint::Null.operand_count(), 0);
        assert_eq!(Constraint::equal_to(1).operand_count(), 1);
        assert_eq!(Constraint::between(1, 2).operand_count(), 2);
        assert_eq!(Constraint::one_of([1, 2, 3]).unwrap().operand_count(), 3);
    }

    #[test]
    fn rendering_matches_documented_forms() {
        assert_eq!(Constraint::equal_to("Hibernate").to_string(), "= 'Hibernate'");
        assert_eq!(Constraint::between(1, 9).to_string(), "BETWEEN 1 AND 9");
        assert_eq!(
            Constraint::one_of(["a", "b"]).unwrap().to_string(),
            "IN ('a', 'b')"
        );
        assert_eq!(
            Constraint::like(Pattern::prefix("Hibernate")).to_string(),
            "LIKE 'Hibernate%'"
        );
        assert_eq!(Constraint::NotNull.to_string(), "IS NOT NULL");
    }

    #[test]
    fn like_reference_match_honours_case_flag() {
        let like = Like::new(Pattern::substring("data")).ignoring_case();
        assert!(like.matches("big DATA primer"));
        assert!(!Like::new(Pattern::substring("data")).matches("big DATA primer"));
    }
}
