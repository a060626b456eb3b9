//! Query parameter bags and URL encoding.
//!
//! [`Params`] maps string keys to [`ParamValue`]s: either a single
//! [`Scalar`] or a sequence of scalars. [`encode_url`] merges a bag onto a
//! base URL, resolving an optional relative path first and canonicalizing
//! the resulting query string (keys sorted, values percent-encoded).
//!
//! The closed `Scalar`/`ParamValue` variants replace the runtime
//! classification a dynamically-typed bag would need: values that cannot
//! be stringified cannot be constructed in the first place.
//!
//! # Example
//!
//! ```
//! use remora_core::{Params, encode_url};
//!
//! let base = url::Url::parse("http://example.com/api/").expect("valid URL");
//! let mut params = Params::new();
//! params.insert("id", vec![1, 2, 3]);
//!
//! let url = encode_url(&base, "items", &params).expect("encode");
//! assert_eq!(url.as_str(), "http://example.com/api/items?id=1&id=2&id=3");
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;

use bytes::Bytes;
use derive_more::Display;
use url::Url;

use crate::Result;

/// A query parameter value with a canonical text representation.
///
/// The text form is the `Display` of the payload: integers in decimal,
/// floats in Rust's minimal round-trippable form, booleans as
/// `true`/`false`, strings as-is.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Scalar {
    /// Boolean value, rendered `true`/`false`.
    #[display("{_0}")]
    Bool(bool),
    /// Signed integer value.
    #[display("{_0}")]
    Int(i64),
    /// Unsigned integer value.
    #[display("{_0}")]
    Uint(u64),
    /// Floating-point value.
    #[display("{_0}")]
    Float(f64),
    /// String value.
    #[display("{_0}")]
    Str(String),
}

/// A parameter bag entry: a single scalar or an ordered sequence of scalars.
///
/// Nested maps and sequences-of-sequences are not representable.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A single value. Encodes with *set* semantics: it replaces any prior
    /// values for its key.
    Scalar(Scalar),
    /// An ordered sequence. Encodes one pair per element, preserving order;
    /// an empty sequence encodes as a single pair with an empty value.
    List(Vec<Scalar>),
}

impl From<Scalar> for ParamValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident via $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }

            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool via bool,
    i32 => Int via i64,
    i64 => Int via i64,
    u32 => Uint via u64,
    u64 => Uint via u64,
    f32 => Float via f64,
    f64 => Float via f64,
    String => Str via String,
    &str => Str via String,
}

impl<S: Into<Scalar>> From<Vec<S>> for ParamValue {
    fn from(values: Vec<S>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<Scalar>, const N: usize> From<[S; N]> for ParamValue {
    fn from(values: [S; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// A bag of query/form parameters, keyed by name.
///
/// Iteration order is key-sorted; the encoded output is canonicalized by
/// key anyway, so insertion order carries no meaning.
///
/// # Example
///
/// ```
/// use remora_core::Params;
///
/// let mut params = Params::new();
/// params.insert("q", "rust");
/// params.insert("page", 1);
/// params.insert("tags", vec!["http", "client"]);
///
/// assert_eq!(params.to_form_string(), "page=1&q=rust&tags=http&tags=client");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: BTreeMap<String, ParamValue>,
}

impl Params {
    /// Creates an empty parameter bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any prior value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Removes a parameter, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    /// Value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Number of keys in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encodes the bag as an `application/x-www-form-urlencoded` string.
    ///
    /// Same canonical encoding as the query string produced by
    /// [`encode_url`]: keys sorted, repeated pairs for sequences, one
    /// empty-valued pair for an empty sequence.
    #[must_use]
    pub fn to_form_string(&self) -> String {
        let mut pairs = QueryPairs::new();
        pairs.merge(self);
        pairs.encode()
    }

    /// Encodes the bag as form body bytes.
    #[must_use]
    pub fn to_form_bytes(&self) -> Bytes {
        Bytes::from(self.to_form_string().into_bytes())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Key-sorted multimap holding the pairs of a query string under
/// construction.
#[derive(Debug, Default)]
struct QueryPairs {
    pairs: BTreeMap<String, Vec<String>>,
}

impl QueryPairs {
    fn new() -> Self {
        Self::default()
    }

    /// Seeds the map from a URL's existing query string.
    fn extend_from_url(&mut self, url: &Url) {
        for (key, value) in url.query_pairs() {
            self.pairs
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
    }

    /// Merges a parameter bag: scalars replace, sequences append in order,
    /// empty sequences replace with a single empty value.
    fn merge(&mut self, params: &Params) {
        for (key, value) in params {
            match value {
                ParamValue::Scalar(scalar) => {
                    self.pairs.insert(key.clone(), vec![scalar.to_string()]);
                }
                ParamValue::List(items) if items.is_empty() => {
                    self.pairs.insert(key.clone(), vec![String::new()]);
                }
                ParamValue::List(items) => {
                    let slot = self.pairs.entry(key.clone()).or_default();
                    slot.extend(items.iter().map(ToString::to_string));
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Canonical percent-encoded rendering, keys sorted.
    fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.pairs {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

/// Merges a parameter bag onto a base URL, resolving `path` first.
///
/// An empty `path` leaves the base untouched; a non-empty one is resolved
/// with standard RFC 3986 relative-reference rules (`Url::join`), so a
/// relative segment replaces the last path segment of a base that does not
/// end in `/`. Any query string already on the resolved URL is preserved
/// and merged with the bag; the output query is canonical (keys sorted,
/// percent-encoded).
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if `path` does
/// not resolve against the base.
pub fn encode_url(base: &Url, path: &str, params: &Params) -> Result<Url> {
    let mut url = if path.is_empty() {
        base.clone()
    } else {
        base.join(path)?
    };

    let mut pairs = QueryPairs::new();
    pairs.extend_from_url(&url);
    pairs.merge(params);

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&pairs.encode()));
    }

    Ok(url)
}

/// Parses `base` and merges the bag onto it, with no relative path.
///
/// Equivalent to `encode_url(&base, "", params)` for an already-parsed
/// base.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if `base` is
/// not an absolute URL.
pub fn url_with_params(base: &str, params: &Params) -> Result<Url> {
    let base = Url::parse(base)?;
    encode_url(&base, "", params)
}
