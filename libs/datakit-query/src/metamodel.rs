//! Static metamodel: typed attribute references for query building.
//!
//! A [`Metamodel`] maps an attribute enum to attribute names; an
//! [`AttributeRef`] binds one attribute to both its metamodel and its Rust
//! value type, so comparisons are checked at compile time. Registration is
//! explicit — descriptors are plain `const` values, with no deferred
//! provider-injected initialization step.
//!
//! ```rust,ignore
//! #[derive(Copy, Clone, Eq, PartialEq)]
//! enum BookAttr { Title, Pages }
//!
//! struct Book;
//!
//! impl Metamodel for Book {
//!     type Attribute = BookAttr;
//!     fn attribute_name(attr: Self::Attribute) -> &'static str {
//!         match attr {
//!             BookAttr::Title => "title",
//!             BookAttr::Pages => "pages",
//!         }
//!     }
//! }
//!
//! const TITLE: AttributeRef<Book, String> = AttributeRef::new(BookAttr::Title);
//! const PAGES: AttributeRef<Book, i64> = AttributeRef::new(BookAttr::Pages);
//!
//! let r = TITLE.starts_with("Hibernate").and(PAGES.at_least(100));
//! ```

use std::marker::PhantomData;

use crate::constraint::{Constraint, Like};
use crate::errors::Error;
use crate::expression::Expression;
use crate::pattern::Pattern;
use crate::restriction::Restriction;
use crate::sort::Sort;
use crate::value::Value;

/// Maps an entity's attribute enum to attribute names.
pub trait Metamodel {
    /// The attribute enum type.
    type Attribute: Copy + Eq;

    /// The persistent name of an attribute.
    fn attribute_name(attribute: Self::Attribute) -> &'static str;
}

/// A typed reference to one attribute of a metamodel.
///
/// Equality and hashing are based solely on the attribute key; the value
/// type parameter `T` is phantom and exists only to validate operations at
/// compile time.
pub struct AttributeRef<M: Metamodel, T> {
    attribute: M::Attribute,
    _marker: PhantomData<(M, T)>,
}

impl<M: Metamodel, T> AttributeRef<M, T> {
    /// Create a typed attribute reference.
    #[must_use]
    pub const fn new(attribute: M::Attribute) -> Self {
        Self {
            attribute,
            _marker: PhantomData,
        }
    }

    /// The attribute's persistent name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        M::attribute_name(self.attribute)
    }

    /// The attribute as an operand expression.
    #[must_use]
    pub fn expression(&self) -> Expression {
        Expression::Attribute(self.name().to_owned())
    }

    /// Ascending sort on this attribute.
    #[must_use]
    pub fn asc(&self) -> Sort {
        Sort::asc(self.name())
    }

    /// Descending sort on this attribute.
    #[must_use]
    pub fn desc(&self) -> Sort {
        Sort::desc(self.name())
    }

    /// `attribute = value`
    #[must_use]
    pub fn equal_to(&self, value: impl Into<Value>) -> Restriction {
        self.expression().equal_to(value)
    }

    /// `attribute <> value`
    #[must_use]
    pub fn not_equal_to(&self, value: impl Into<Value>) -> Restriction {
        self.expression().not_equal_to(value)
    }

    /// `attribute > value`
    #[must_use]
    pub fn greater_than(&self, value: impl Into<Value>) -> Restriction {
        self.expression().greater_than(value)
    }

    /// `attribute >= value`
    #[must_use]
    pub fn at_least(&self, value: impl Into<Value>) -> Restriction {
        self.expression().at_least(value)
    }

    /// `attribute < value`
    #[must_use]
    pub fn less_than(&self, value: impl Into<Value>) -> Restriction {
        self.expression().less_than(value)
    }

    /// `attribute <= value`
    #[must_use]
    pub fn at_most(&self, value: impl Into<Value>) -> Restriction {
        self.expression().at_most(value)
    }

    /// `attribute BETWEEN lower AND upper`
    #[must_use]
    pub fn between(&self, lower: impl Into<Value>, upper: impl Into<Value>) -> Restriction {
        self.expression().between(lower, upper)
    }

    /// `attribute IN (values...)`
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyValues`] when `values` is empty.
    pub fn one_of<V: Into<Value>>(
        &self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Restriction, Error> {
        self.expression().one_of(values)
    }

    /// `attribute IS NULL`
    #[must_use]
    pub fn is_null(&self) -> Restriction {
        self.expression().is_null()
    }

    /// `attribute IS NOT NULL`
    #[must_use]
    pub fn is_not_null(&self) -> Restriction {
        self.expression().is_not_null()
    }
}

/// Pattern operations, available only for string-typed attributes.
impl<M: Metamodel> AttributeRef<M, String> {
    /// `attribute LIKE pattern`
    #[must_use]
    pub fn like(&self, pattern: Pattern) -> Restriction {
        self.expression().like(pattern)
    }

    /// Case-insensitive `attribute LIKE pattern`.
    #[must_use]
    pub fn like_ignoring_case(&self, pattern: Pattern) -> Restriction {
        Restriction::basic(
            self.expression(),
            Constraint::Like(Like::new(pattern).ignoring_case()),
        )
    }

    /// Prefix match with full escaping of `text`.
    #[must_use]
    pub fn starts_with(&self, text: &str) -> Restriction {
        self.like(Pattern::prefix(text))
    }

    /// Suffix match with full escaping of `text`.
    #[must_use]
    pub fn ends_with(&self, text: &str) -> Restriction {
        self.like(Pattern::suffix(text))
    }

    /// Substring match with full escaping of `text`.
    #[must_use]
    pub fn contains(&self, text: &str) -> Restriction {
        self.like(Pattern::substring(text))
    }

    /// Case-insensitive equality on a string attribute.
    #[must_use]
    pub fn equal_to_ignoring_case(&self, text: &str) -> Restriction {
        Restriction::basic(
            self.expression(),
            Constraint::Like(Like::new(Pattern::literal(text)).ignoring_case()),
        )
    }
}

impl<M: Metamodel, T> Clone for AttributeRef<M, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Metamodel, T> Copy for AttributeRef<M, T> {}

impl<M: Metamodel, T> std::fmt::Debug for AttributeRef<M, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeRef")
            .field("attribute", &self.name())
            .finish()
    }
}

impl<M: Metamodel, T> PartialEq for AttributeRef<M, T> {
    fn eq(&self, other: &Self) -> bool {
        self.attribute == other.attribute
    }
}

impl<M: Metamodel, T> Eq for AttributeRef<M, T> {}

impl<M: Metamodel, T> std::hash::Hash for AttributeRef<M, T>
where
    M::Attribute: std::hash::Hash,
{
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.attribute.hash(state);
    }
}

/// Extracts a sortable attribute name; lets order-by accept attribute
/// references with heterogeneous value types.
#[doc(hidden)]
pub trait AsAttributeName {
    fn as_attribute_name(&self) -> &'static str;
}

impl<M: Metamodel, T> AsAttributeName for AttributeRef<M, T> {
    fn as_attribute_name(&self) -> &'static str {
        self.name()
    }
}

impl<A: AsAttributeName + ?Sized> AsAttributeName for &A {
    fn as_attribute_name(&self) -> &'static str {
        (*self).as_attribute_name()
    }
}
