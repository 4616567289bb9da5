//! Request parameter bag
//!
//! BingX signs the sorted `key=value` form of the request parameters, so the
//! bag is backed by an ordered map: two bags holding the same logical
//! parameters always render the same canonical string, whatever order they
//! were inserted in.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// A single request parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Free-form string
    Str(String),
    /// Signed integer (ids, limits)
    Int(i64),
    /// Unsigned integer (timestamps, windows)
    UInt(u64),
    /// Decimal amount (prices, quantities)
    Decimal(Decimal),
    /// Boolean flag
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::UInt(n) => write!(f, "{}", n),
            // 1.500 and 1.5 must sign identically
            Self::Decimal(d) => write!(f, "{}", d.normalize()),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        Self::UInt(n.into())
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        Self::UInt(n)
    }
}

impl From<Decimal> for ParamValue {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Ordered request parameters
///
/// # Example
///
/// ```
/// use bingx_types::Params;
///
/// let params = Params::new()
///     .with("symbol", "BTC-USDT")
///     .with("limit", 20u32)
///     .with_opt("orderId", None::<i64>);
///
/// assert_eq!(params.canonical(), "limit=20&symbol=BTC-USDT");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any previous value for the key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter only when a value is present
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Insert a parameter, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Check whether a parameter is set
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no parameters are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rendered `(key, value)` pairs in key order, ready for URL encoding
    pub fn to_pairs(&self) -> Vec<(&str, String)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.to_string())).collect()
    }

    /// Unencoded `k1=v1&k2=v2` string sorted by key
    ///
    /// This is the exact input of the request signature.
    pub fn canonical(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
