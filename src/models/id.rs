use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a property or booking row.
///
/// The remote schema decides whether keys are integers or uuids/text; the
/// value is carried in the same JSON shape the remote returned it so responses
/// stay byte-for-byte stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl RowId {
    /// Parse a path segment. Numeric segments become integer keys.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => RowId::Int(n),
            Err(_) => RowId::Text(raw.to_string()),
        }
    }

    /// Whether a request body left this key blank
    pub fn is_blank(&self) -> bool {
        matches!(self, RowId::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Int(n)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}
