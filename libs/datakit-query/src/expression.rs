//! Operand expressions: attribute references, literals, and a small
//! function vocabulary.

use std::fmt;

use crate::constraint::{Constraint, Like};
use crate::errors::Error;
use crate::pattern::Pattern;
use crate::restriction::Restriction;
use crate::value::Value;

/// One side of a comparison: a named attribute, a literal value, or a
/// function applied to further expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// A named entity attribute, resolved by the provider.
    Attribute(String),
    /// A literal value.
    Literal(Value),
    /// A function application, e.g. `upper(name)`.
    Function(String, Vec<Expression>),
}

impl Expression {
    /// Reference a named entity attribute.
    pub fn attribute(name: impl Into<String>) -> Self {
        Expression::Attribute(name.into())
    }

    /// Wrap a literal value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// `upper(self)`
    #[must_use]
    pub fn upper(self) -> Self {
        Expression::Function("upper".to_owned(), vec![self])
    }

    /// `lower(self)`
    #[must_use]
    pub fn lower(self) -> Self {
        Expression::Function("lower".to_owned(), vec![self])
    }

    /// `length(self)`
    #[must_use]
    pub fn length(self) -> Self {
        Expression::Function("length".to_owned(), vec![self])
    }

    /// `self = value`
    #[must_use]
    pub fn equal_to(self, value: impl Into<Value>) -> Restriction {
        Restriction::basic(self, Constraint::equal_to(value))
    }

    /// `self <> value`
    #[must_use]
    pub fn not_equal_to(self, value: impl Into<Value>) -> Restriction {
        Restriction::basic(self, Constraint::not_equal_to(value))
    }

    /// `self > value`
    #[must_use]
    pub fn greater_than(self, value: impl Into<Value>) -> Restriction {
        Restriction::basic(self, Constraint::greater_than(value))
    }

    /// `self >= value`
    #[must_use]
    pub fn at_least(self, value: impl Into<Value>) -> Restriction {
        Restriction::basic(self, Constraint::at_least(value))
    }

    /// `self < value`
    #[must_use]
    pub fn less_than(self, value: impl Into<Value>) -> Restriction {
        Restriction::basic(self, Constraint::less_than(value))
    }

    /// `self <= value`
    #[must_use]
    pub fn at_most(self, value: impl Into<Value>) -> Restriction {
        Restriction::basic(self, Constraint::at_most(value))
    }

    /// `self BETWEEN lower AND upper`
    #[must_use]
    pub fn between(self, lower: impl Into<Value>, upper: impl Into<Value>) -> Restriction {
        Restriction::basic(self, Constraint::between(lower, upper))
    }

    /// `self NOT BETWEEN lower AND upper`
    #[must_use]
    pub fn not_between(self, lower: impl Into<Value>, upper: impl Into<Value>) -> Restriction {
        Restriction::basic(self, Constraint::not_between(lower, upper))
    }

    /// `self IN (values...)`
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyValues`] when `values` is empty.
    pub fn one_of<V: Into<Value>>(
        self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Restriction, Error> {
        Ok(Restriction::basic(self, Constraint::one_of(values)?))
    }

    /// `self NOT IN (values...)`
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyValues`] when `values` is empty.
    pub fn not_one_of<V: Into<Value>>(
        self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Restriction, Error> {
        Ok(Restriction::basic(self, Constraint::not_one_of(values)?))
    }

    /// `self LIKE pattern`
    #[must_use]
    pub fn like(self, pattern: Pattern) -> Restriction {
        Restriction::basic(self, Constraint::Like(Like::new(pattern)))
    }

    /// `self NOT LIKE pattern`
    #[must_use]
    pub fn not_like(self, pattern: Pattern) -> Restriction {
        Restriction::basic(self, Constraint::NotLike(Like::new(pattern)))
    }

    /// `self IS NULL`
    #[must_use]
    pub fn is_null(self) -> Restriction {
        Restriction::basic(self, Constraint::Null)
    }

    /// `self IS NOT NULL`
    #[must_use]
    pub fn is_not_null(self) -> Restriction {
        Restriction::basic(self, Constraint::NotNull)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Attribute(name) => f.write_str(name),
            Expression::Literal(value) => value.fmt(f),
            Expression::Function(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    arg.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}
