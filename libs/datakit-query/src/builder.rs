//! Typed query assembly.
//!
//! [`QueryBuilder`] fluently assembles an immutable [`Query`]: a restriction
//! (defaulting to unrestricted), an order, an optional result limit, and the
//! restriction digest computed at [`build`](QueryBuilder::build).
//!
//! ```rust,ignore
//! let query = QueryBuilder::<Book>::new()
//!     .restrict(TITLE.starts_with("Hibernate").and(PAGES.at_least(100)))
//!     .order_by(TITLE, Direction::Asc)
//!     .max_results(50)
//!     .build();
//! ```

use std::marker::PhantomData;

use crate::digest::short_restriction_hash;
use crate::metamodel::{AsAttributeName, Metamodel};
use crate::restriction::Restriction;
use crate::sort::{Direction, Order, Sort};

/// An immutable, provider-ready query description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    restriction: Restriction,
    order: Order,
    max_results: Option<u64>,
    restriction_hash: Option<String>,
}

impl Query {
    #[must_use]
    pub fn restriction(&self) -> &Restriction {
        &self.restriction
    }

    #[must_use]
    pub fn order(&self) -> &Order {
        &self.order
    }

    #[must_use]
    pub fn max_results(&self) -> Option<u64> {
        self.max_results
    }

    /// The digest carried by cursor tokens minted for this query; absent
    /// when the query is unrestricted.
    #[must_use]
    pub fn restriction_hash(&self) -> Option<&str> {
        self.restriction_hash.as_deref()
    }

    #[must_use]
    pub fn is_restricted(&self) -> bool {
        !self.restriction.is_unrestricted()
    }
}

/// Fluent builder for [`Query`] values over a metamodel.
pub struct QueryBuilder<M: Metamodel> {
    restriction: Restriction,
    order: Vec<Sort>,
    max_results: Option<u64>,
    _marker: PhantomData<M>,
}

impl<M: Metamodel> QueryBuilder<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            restriction: Restriction::Unrestricted,
            order: Vec::new(),
            max_results: None,
            _marker: PhantomData,
        }
    }

    /// Set the restriction, replacing any previous one.
    #[must_use]
    pub fn restrict(mut self, restriction: Restriction) -> Self {
        self.restriction = restriction;
        self
    }

    /// Append a sort key; call repeatedly for multi-key ordering.
    #[must_use]
    pub fn order_by<A: AsAttributeName>(mut self, attribute: A, direction: Direction) -> Self {
        let sort = match direction {
            Direction::Asc => Sort::asc(attribute.as_attribute_name()),
            Direction::Desc => Sort::desc(attribute.as_attribute_name()),
        };
        self.order.push(sort);
        self
    }

    /// Append an explicit sort key (e.g. one ignoring case).
    #[must_use]
    pub fn order_by_sort(mut self, sort: Sort) -> Self {
        self.order.push(sort);
        self
    }

    /// Cap the number of results.
    #[must_use]
    pub fn max_results(mut self, max: u64) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Build the final immutable query with its restriction digest.
    #[must_use]
    pub fn build(self) -> Query {
        let restriction_hash = if self.restriction.is_unrestricted() {
            None
        } else {
            short_restriction_hash(Some(&self.restriction))
        };
        Query {
            restriction: self.restriction,
            order: Order::by(self.order),
            max_results: self.max_results,
            restriction_hash,
        }
    }
}

impl<M: Metamodel> Default for QueryBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}
