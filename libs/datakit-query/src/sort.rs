//! Ordering primitives and the signed-token order signature.

use std::fmt;

use crate::errors::Error;

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl Direction {
    /// Reverse the direction (Asc <-> Desc).
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// A single sort key: property, direction, and case sensitivity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    property: String,
    direction: Direction,
    ignore_case: bool,
}

impl Sort {
    /// Ascending, case-sensitive sort on `property`.
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
            ignore_case: false,
        }
    }

    /// Descending, case-sensitive sort on `property`.
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
            ignore_case: false,
        }
    }

    /// Ascending sort ignoring case.
    pub fn asc_ignore_case(property: impl Into<String>) -> Self {
        Self {
            ignore_case: true,
            ..Self::asc(property)
        }
    }

    /// Descending sort ignoring case.
    pub fn desc_ignore_case(property: impl Into<String>) -> Self {
        Self {
            ignore_case: true,
            ..Self::desc(property)
        }
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// The same sort key with the direction reversed.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.direction = self.direction.reverse();
        self
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{} {dir}", self.property)
    }
}

/// An ordered list of sort keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Order(Vec<Sort>);

impl Order {
    /// The empty order (provider default ordering).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// An order over the given sort keys.
    pub fn by(sorts: Vec<Sort>) -> Self {
        Self(sorts)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn sorts(&self) -> &[Sort] {
        &self.0
    }

    /// Append `sort` as the lowest-priority key.
    pub fn then(mut self, sort: Sort) -> Self {
        self.0.push(sort);
        self
    }

    /// Append a tiebreaker key unless the property is already present.
    ///
    /// Keyset pagination needs a total order; a unique tiebreaker column
    /// guarantees one.
    pub fn ensure_tiebreaker(mut self, property: &str, direction: Direction) -> Self {
        if !self.0.iter().any(|s| s.property() == property) {
            self.0.push(Sort {
                property: property.to_owned(),
                direction,
                ignore_case: false,
            });
        }
        self
    }

    /// Reverse every direction (backward traversal).
    pub fn reverse_directions(mut self) -> Self {
        for sort in &mut self.0 {
            sort.direction = sort.direction.reverse();
        }
        self
    }

    /// Render as signed tokens, e.g. `+name,-age`.
    ///
    /// Tokens capture property and direction only; this is the order
    /// signature carried by cursor tokens.
    #[must_use]
    pub fn to_signed_tokens(&self) -> String {
        self.0
            .iter()
            .map(|s| {
                let sign = match s.direction {
                    Direction::Asc => '+',
                    Direction::Desc => '-',
                };
                format!("{sign}{}", s.property)
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse signed tokens back into an order (e.g. `+a,-b`).
    ///
    /// A missing sign defaults to ascending. Parsed sorts are
    /// case-sensitive; the flag is not part of the token alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSortToken`] when the input is empty or a
    /// token has no property name.
    pub fn from_signed_tokens(signed: &str) -> Result<Self, Error> {
        let mut sorts = Vec::new();
        for segment in signed.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (direction, name) = match segment.as_bytes()[0] {
                b'+' => (Direction::Asc, &segment[1..]),
                b'-' => (Direction::Desc, &segment[1..]),
                _ => (Direction::Asc, segment),
            };
            if name.is_empty() {
                return Err(Error::InvalidSortToken(segment.to_owned()));
            }
            sorts.push(Sort {
                property: name.to_owned(),
                direction,
                ignore_case: false,
            });
        }
        if sorts.is_empty() {
            return Err(Error::InvalidSortToken("empty order".to_owned()));
        }
        Ok(Self(sorts))
    }

    /// Check equality against a signed token list.
    #[must_use]
    pub fn equals_signed_tokens(&self, signed: &str) -> bool {
        match Self::from_signed_tokens(signed) {
            Ok(other) => {
                self.0.len() == other.0.len()
                    && self
                        .0
                        .iter()
                        .zip(other.0.iter())
                        .all(|(a, b)| a.property == b.property && a.direction == b.direction)
            }
            Err(_) => false,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(none)");
        }
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(", "))
    }
}

impl<'a> IntoIterator for &'a Order {
    type Item = &'a Sort;
    type IntoIter = std::slice::Iter<'a, Sort>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
