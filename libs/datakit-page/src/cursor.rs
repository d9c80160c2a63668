//! Keyset cursors and their wire-token form.
//!
//! A [`PageCursor`] is the in-memory form: the sort-key values of one
//! boundary row, in sort-key order. A [`CursorToken`] is the wire form a
//! service hands to clients: version-tagged JSON, base64url without padding,
//! carrying the key texts plus the order signature and restriction digest of
//! the originating query so a stale or foreign token is rejected on resume.

use datakit_query::{Order, Value};

use crate::errors::Error;

/// Traversal direction recorded in a wire token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    Forward,
    Backward,
}

impl Traversal {
    fn as_wire(self) -> &'static str {
        match self {
            Traversal::Forward => "fwd",
            Traversal::Backward => "bwd",
        }
    }

    fn from_wire(s: &str) -> Result<Self, Error> {
        match s {
            "fwd" => Ok(Traversal::Forward),
            "bwd" => Ok(Traversal::Backward),
            _ => Err(Error::CursorInvalidDirection),
        }
    }
}

/// The keyset values of one boundary row, in sort-key order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageCursor {
    keys: Vec<Value>,
}

impl PageCursor {
    /// Build a cursor from sort-key values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCursor`] when `keys` is empty: a cursor with no
    /// key values cannot position a page.
    pub fn new(keys: Vec<Value>) -> Result<Self, Error> {
        if keys.is_empty() {
            return Err(Error::EmptyCursor);
        }
        Ok(Self { keys })
    }

    #[must_use]
    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        // A constructed cursor is never empty; kept for slice-like symmetry.
        self.keys.is_empty()
    }

    /// The canonical text of each key, in order (the wire representation).
    #[must_use]
    pub fn key_texts(&self) -> Vec<String> {
        self.keys.iter().map(Value::canonical_text).collect()
    }
}

/// Wire form of a cursor: keys plus the originating query's identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorToken {
    keys: Vec<String>,
    traversal: Traversal,
    order: String,
    restriction_hash: Option<String>,
}

/// Wire token version this module emits and accepts.
const TOKEN_VERSION: u8 = 1;

impl CursorToken {
    /// Build a token for `cursor` as minted by a query with the given order
    /// signature and restriction digest.
    #[must_use]
    pub fn new(
        cursor: &PageCursor,
        traversal: Traversal,
        order: &Order,
        restriction_hash: Option<String>,
    ) -> Self {
        Self {
            keys: cursor.key_texts(),
            traversal,
            order: order.to_signed_tokens(),
            restriction_hash,
        }
    }

    /// Key texts, in sort-key order. Decoded keys are textual; providers
    /// re-type them against their schema.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// The signed-token order signature (e.g. `+name,-age`).
    #[must_use]
    pub fn order_signature(&self) -> &str {
        &self.order
    }

    #[must_use]
    pub fn restriction_hash(&self) -> Option<&str> {
        self.restriction_hash.as_deref()
    }

    /// Encode to a base64url string (no padding).
    ///
    /// # Errors
    ///
    /// Returns a JSON serialization error if encoding fails.
    pub fn encode(&self) -> serde_json::Result<String> {
        #[derive(serde::Serialize)]
        struct Wire<'a> {
            v: u8,
            k: &'a [String],
            s: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            f: &'a Option<String>,
            d: &'a str,
        }
        let wire = Wire {
            v: TOKEN_VERSION,
            k: &self.keys,
            s: &self.order,
            f: &self.restriction_hash,
            d: self.traversal.as_wire(),
        };
        serde_json::to_vec(&wire).map(|bytes| base64_url::encode(&bytes))
    }

    /// Decode a base64url token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorInvalidBase64`] on a bad encoding,
    /// [`Error::CursorInvalidJson`] on malformed JSON,
    /// [`Error::CursorInvalidVersion`] on an unsupported version,
    /// [`Error::CursorInvalidKeys`] / [`Error::CursorInvalidOrder`] on empty
    /// fields, and [`Error::CursorInvalidDirection`] on an unknown traversal
    /// marker.
    pub fn decode(token: &str) -> Result<Self, Error> {
        #[derive(serde::Deserialize)]
        struct Wire {
            v: u8,
            k: Vec<String>,
            s: String,
            #[serde(default)]
            f: Option<String>,
            #[serde(default = "default_direction")]
            d: String,
        }

        fn default_direction() -> String {
            "fwd".to_owned()
        }

        let bytes = base64_url::decode(token).map_err(|_| Error::CursorInvalidBase64)?;
        let wire: Wire = serde_json::from_slice(&bytes).map_err(|_| Error::CursorInvalidJson)?;
        if wire.v != TOKEN_VERSION {
            return Err(Error::CursorInvalidVersion);
        }
        if wire.k.is_empty() {
            return Err(Error::CursorInvalidKeys);
        }
        if wire.s.trim().is_empty() {
            return Err(Error::CursorInvalidOrder);
        }
        let traversal = Traversal::from_wire(&wire.d)?;
        Ok(Self {
            keys: wire.k,
            traversal,
            order: wire.s,
            restriction_hash: wire.f,
        })
    }

    /// Check that this token belongs to the query it is being resumed
    /// against.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OrderMismatch`] when the token's order signature
    /// differs from the effective order, and [`Error::RestrictionMismatch`]
    /// when both sides carry a restriction digest and they differ.
    pub fn validate_against(
        &self,
        effective_order: &Order,
        effective_restriction_hash: Option<&str>,
    ) -> Result<(), Error> {
        if !effective_order.equals_signed_tokens(&self.order) {
            return Err(Error::OrderMismatch);
        }
        if let (Some(expected), Some(carried)) =
            (effective_restriction_hash, self.restriction_hash.as_deref())
        {
            if expected != carried {
                return Err(Error::RestrictionMismatch);
            }
        }
        Ok(())
    }

    /// Reconstruct an in-memory cursor from the token's key texts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCursor`] if the token somehow carries no keys
    /// (decoded tokens always carry at least one).
    pub fn to_cursor(&self) -> Result<PageCursor, Error> {
        PageCursor::new(self.keys.iter().cloned().map(Value::String).collect())
    }
}

// base64url helpers (no padding)
mod base64_url {
    use base64::Engine as _;

    pub fn encode(bytes: &[u8]) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(s)
    }
}
