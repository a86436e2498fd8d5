use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;

/// Separates the dimension name from the value in an encoded key.
pub const KEY_SEPARATOR: char = ':';

/// A key of one nesting level of a data set.
///
/// On the wire a key is encoded as `dimension:value`, e.g. `fb.author.gender:female`.
/// Parsing splits at the first separator, so values may contain `:` themselves.
/// A string without a separator decodes to a key with an empty dimension.
///
/// Keys compare, hash and order by their encoded form, which is the raw key
/// order the chart generators sort by.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DimensionKey {
    dimension: String,
    value: String,
}

impl DimensionKey {
    pub fn new(dimension: impl Into<String>, value: impl Into<String>) -> DimensionKey {
        Self {
            dimension: dimension.into(),
            value: value.into(),
        }
    }

    pub fn parse(encoded: &str) -> DimensionKey {
        match encoded.split_once(KEY_SEPARATOR) {
            Some((dimension, value)) => Self::new(dimension, value),
            None => Self::new(String::new(), encoded),
        }
    }

    #[inline]
    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Removes the dimension prefix and returns the bare value.
    #[inline]
    pub fn strip(&self) -> &str {
        &self.value
    }

    fn encoded(&self) -> impl Iterator<Item = u8> + '_ {
        let separator: &[u8] = if self.dimension.is_empty() { b"" } else { b":" };

        self.dimension
            .bytes()
            .chain(separator.iter().copied())
            .chain(self.value.bytes())
    }
}

impl PartialEq for DimensionKey {
    fn eq(&self, other: &Self) -> bool {
        self.encoded().eq(other.encoded())
    }
}

impl Eq for DimensionKey {}

impl PartialOrd for DimensionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DimensionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encoded().cmp(other.encoded())
    }
}

impl Hash for DimensionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.encoded() {
            state.write_u8(byte);
        }
    }
}

impl Display for DimensionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.dimension.is_empty() {
            f.write_str(&self.value)
        } else {
            write!(f, "{}{KEY_SEPARATOR}{}", self.dimension, self.value)
        }
    }
}

impl From<&str> for DimensionKey {
    fn from(encoded: &str) -> Self {
        DimensionKey::parse(encoded)
    }
}

impl From<String> for DimensionKey {
    fn from(encoded: String) -> Self {
        DimensionKey::parse(&encoded)
    }
}

impl From<DimensionKey> for String {
    fn from(key: DimensionKey) -> Self {
        key.to_string()
    }
}
