//! The restriction tree: leaf predicates composed into AND/OR/NOT trees.
//!
//! Two sentinels bound the algebra: [`Restriction::Unrestricted`] matches
//! everything and is the identity of AND-composition;
//! [`Restriction::Unmatchable`] matches nothing and is its annihilator (the
//! roles swap under OR). Negating one sentinel yields the other.
//!
//! Negating a composite flips only its `negated` flag — children keep their
//! stated polarity and no De Morgan expansion happens here; the provider
//! applies negation semantics when it evaluates the tree.

use std::fmt;
use std::ops;

use crate::constraint::Constraint;
use crate::errors::Error;
use crate::expression::Expression;

/// How a composite combines its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combine {
    /// All children must match (AND semantics).
    All,
    /// Any child may match (OR semantics).
    Any,
}

/// A leaf restriction: an expression paired with a constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicRestriction {
    expression: Expression,
    constraint: Constraint,
}

impl BasicRestriction {
    #[must_use]
    pub fn new(expression: Expression, constraint: Constraint) -> Self {
        Self {
            expression,
            constraint,
        }
    }

    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    #[must_use]
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Negate by negating the carried constraint.
    #[must_use]
    pub fn negate(self) -> Self {
        Self {
            expression: self.expression,
            constraint: self.constraint.negate(),
        }
    }
}

impl fmt::Display for BasicRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.expression, self.constraint)
    }
}

/// An AND/OR combination of child restrictions with an outer negation flag.
///
/// The child list is immutable once built and never empty; the empty case is
/// representable only through the [`Restriction::Unrestricted`] sentinel via
/// the zero-argument factories in [`crate::restrict`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeRestriction {
    combine: Combine,
    restrictions: Vec<Restriction>,
    negated: bool,
}

impl CompositeRestriction {
    /// Combine `restrictions` under `combine` semantics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRestrictions`] when `restrictions` is empty;
    /// the designated sentinel factories are the only valid empty forms.
    pub fn new(combine: Combine, restrictions: Vec<Restriction>) -> Result<Self, Error> {
        if restrictions.is_empty() {
            return Err(Error::EmptyRestrictions);
        }
        Ok(Self {
            combine,
            restrictions,
            negated: false,
        })
    }

    #[must_use]
    pub fn combine(&self) -> Combine {
        self.combine
    }

    #[must_use]
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Toggle the outer negation flag, leaving children untouched.
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }
}

impl fmt::Display for CompositeRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("NOT (")?;
        }
        let joiner = match self.combine {
            Combine::All => " AND ",
            Combine::Any => " OR ",
        };
        for (i, child) in self.restrictions.iter().enumerate() {
            if i > 0 {
                f.write_str(joiner)?;
            }
            write!(f, "({child})")?;
        }
        if self.negated {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A predicate attachable to a repository query: a sentinel, a leaf, or a
/// composite tree. Immutable once built; trees may be nested and reused
/// across calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Restriction {
    /// Matches everything; identity of AND-composition.
    Unrestricted,
    /// Matches nothing; annihilator of AND-composition.
    Unmatchable,
    Basic(BasicRestriction),
    Composite(CompositeRestriction),
}

impl Restriction {
    /// A leaf restriction from an expression and a constraint.
    #[must_use]
    pub fn basic(expression: Expression, constraint: Constraint) -> Self {
        Restriction::Basic(BasicRestriction::new(expression, constraint))
    }

    /// Whether this restriction narrows results at all.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Restriction::Unrestricted)
    }

    /// Logical complement.
    ///
    /// Sentinels swap, leaves negate their constraint, and composites flip
    /// their outer flag only.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Restriction::Unrestricted => Restriction::Unmatchable,
            Restriction::Unmatchable => Restriction::Unrestricted,
            Restriction::Basic(basic) => Restriction::Basic(basic.negate()),
            Restriction::Composite(composite) => Restriction::Composite(composite.negate()),
        }
    }

    /// `self AND other`.
    ///
    /// Sentinels short-circuit: `Unrestricted` is dropped, `Unmatchable`
    /// absorbs the whole conjunction.
    #[must_use]
    pub fn and(self, other: Restriction) -> Restriction {
        match (self, other) {
            (Restriction::Unmatchable, _) | (_, Restriction::Unmatchable) => {
                Restriction::Unmatchable
            }
            (Restriction::Unrestricted, r) | (r, Restriction::Unrestricted) => r,
            (a, b) => Restriction::Composite(CompositeRestriction {
                combine: Combine::All,
                restrictions: vec![a, b],
                negated: false,
            }),
        }
    }

    /// `self OR other`.
    ///
    /// Sentinels short-circuit dually to [`and`](Restriction::and):
    /// `Unmatchable` is dropped, `Unrestricted` absorbs the disjunction.
    #[must_use]
    pub fn or(self, other: Restriction) -> Restriction {
        match (self, other) {
            (Restriction::Unrestricted, _) | (_, Restriction::Unrestricted) => {
                Restriction::Unrestricted
            }
            (Restriction::Unmatchable, r) | (r, Restriction::Unmatchable) => r,
            (a, b) => Restriction::Composite(CompositeRestriction {
                combine: Combine::Any,
                restrictions: vec![a, b],
                negated: false,
            }),
        }
    }
}

impl ops::Not for Restriction {
    type Output = Restriction;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::Unrestricted => f.write_str("unrestricted"),
            Restriction::Unmatchable => f.write_str("unmatchable"),
            Restriction::Basic(basic) => basic.fmt(f),
            Restriction::Composite(composite) => composite.fmt(f),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn name_is(value: &str) -> Restriction {
        Expression::attribute("name").equal_to(value)
    }

    fn age_over(value: i64) -> Restriction {
        Expression::attribute("age").greater_than(value)
    }

    #[test]
    fn sentinels_swap_under_negation() {
        assert_eq!(Restriction::Unrestricted.negate(), Restriction::Unmatchable);
        assert_eq!(Restriction::Unmatchable.negate(), Restriction::Unrestricted);
    }

    #[test]
    fn composite_negation_flips_flag_only() {
        let composite =
            CompositeRestriction::new(Combine::All, vec![name_is("a"), age_over(1)]).unwrap();
        let children = composite.restrictions().to_vec();

        let negated = composite.negate();
        assert!(negated.is_negated());
        assert_eq!(negated.restrictions(), &children[..]);

        let back = negated.negate();
        assert!(!back.is_negated());
        assert_eq!(back.restrictions(), &children[..]);
    }

    #[test]
    fn double_negation_restores_a_tree() {
        let tree = name_is("a").and(age_over(1).or(name_is("b")));
        assert_eq!(tree.clone().negate().negate(), tree);
    }

    #[test]
    fn empty_composite_constructor_is_rejected() {
        assert_eq!(
            CompositeRestriction::new(Combine::All, Vec::new()).unwrap_err(),
            Error::EmptyRestrictions
        );
        assert_eq!(
            CompositeRestriction::new(Combine::Any, Vec::new()).unwrap_err(),
            Error::EmptyRestrictions
        );
    }

    #[test]
    fn and_observes_identity_and_annihilator() {
        let leaf = name_is("a");
        assert_eq!(Restriction::Unrestricted.and(leaf.clone()), leaf);
        assert_eq!(leaf.clone().and(Restriction::Unrestricted), leaf);
        assert_eq!(
            leaf.clone().and(Restriction::Unmatchable),
            Restriction::Unmatchable
        );
    }

    #[test]
    fn or_observes_dual_laws() {
        let leaf = name_is("a");
        assert_eq!(Restriction::Unmatchable.or(leaf.clone()), leaf);
        assert_eq!(
            leaf.or(Restriction::Unrestricted),
            Restriction::Unrestricted
        );
    }

    #[test]
    fn leaf_renders_attribute_operator_value() {
        assert_eq!(name_is("Domain Modeling").to_string(), "name = 'Domain Modeling'");
        assert_eq!(
            Expression::attribute("price").between(10, 20).to_string(),
            "price BETWEEN 10 AND 20"
        );
    }

    #[test]
    fn composite_renders_parenthesized_children() {
        let tree = name_is("a").and(age_over(21));
        assert_eq!(tree.to_string(), "(name = 'a') AND (age > 21)");

        let negated = tree.negate();
        assert_eq!(
            negated.to_string(),
            "NOT ((name = 'a') AND (age > 21))"
        );
    }

    #[test]
    fn not_operator_negates() {
        let r = !name_is("a");
        assert_eq!(r, Expression::attribute("name").not_equal_to("a"));
    }
}
