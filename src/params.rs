//! # Path Parameter Bindings
//!
//! Values captured from `:name` segments of a matched route, plus the
//! percent-decoding applied to each captured segment.
//!
//! A [`Params`] set is built fresh for every matched request and moved into
//! that request's [`HandlerRequest`](crate::dispatcher::HandlerRequest); it is
//! never shared between requests.
//!
//! ## Decoding
//!
//! Captured segments are query-unescaped: `%XX` escapes are decoded and `+`
//! becomes a space. When the escape sequence is malformed, or the decoded
//! bytes are not valid UTF-8, the raw segment text is kept and the binding is
//! marked with a [`DecodeError`] so the degradation stays observable.

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum number of path parameters stored inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Reason a captured segment could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` at byte `index` is not followed by two hex digits.
    MalformedEscape {
        /// Byte offset of the offending `%` in the raw segment.
        index: usize,
    },
    /// The unescaped bytes are not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedEscape { index } => {
                write!(f, "malformed percent escape at byte {index}")
            }
            DecodeError::InvalidUtf8 => write!(f, "decoded segment is not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Outcome of decoding one captured path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The segment was unescaped successfully.
    Value(String),
    /// Decoding failed; `raw` is the segment exactly as received.
    Fallback {
        /// Undecoded segment text, used as the parameter value.
        raw: String,
        /// Why decoding was abandoned.
        error: DecodeError,
    },
}

impl Decoded {
    /// The string a handler observes for this segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Decoded::Value(v) => v,
            Decoded::Fallback { raw, .. } => raw,
        }
    }

    /// Returns true if the raw text was kept because decoding failed.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Decoded::Fallback { .. })
    }
}

/// Query-unescape a single path segment.
///
/// Never fails: a malformed escape or invalid UTF-8 yields
/// [`Decoded::Fallback`] carrying the raw text.
#[must_use]
pub fn decode_segment(raw: &str) -> Decoded {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Decoded::Fallback {
                    raw: raw.to_owned(),
                    error: DecodeError::MalformedEscape { index: i },
                };
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(value) => Decoded::Value(value.into_owned()),
        Err(_) => Decoded::Fallback {
            raw: raw.to_owned(),
            error: DecodeError::InvalidUtf8,
        },
    }
}

/// One captured `name → value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Parameter name from the route pattern (shared with the route table).
    pub name: Arc<str>,
    /// Decoded value, or the raw text on decode failure.
    pub value: Decoded,
}

type BindingVec = SmallVec<[Binding; MAX_INLINE_PARAMS]>;

/// Parameter bindings captured for one matched request.
///
/// Keys are unique: binding a name that is already present replaces the
/// earlier value, so for `/a/:k/:k` the right-most segment wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    bindings: BindingVec,
}

impl Params {
    /// An empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding of the same name.
    pub fn insert(&mut self, name: Arc<str>, value: Decoded) {
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.name == name) {
            existing.value = value;
        } else {
            self.bindings.push(Binding { name, value });
        }
    }

    /// Value bound to `name`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.binding(name).map(|b| b.value.as_str())
    }

    /// Full binding for `name`, including its decode outcome.
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name.as_ref() == name)
    }

    /// Number of distinct names bound.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in the order their names first appeared in the route.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|b| (b.name.as_ref(), b.value.as_str()))
    }

    /// Bindings whose value is the raw text because decoding failed.
    pub fn fallbacks(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(|b| b.value.is_fallback())
    }
}
