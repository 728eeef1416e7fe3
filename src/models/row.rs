use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::RowId;

/// A table row exactly as the remote returned it.
///
/// Columns are carried through untouched, in their original order and JSON
/// types. Only the key columns the ownership checks need are ever read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// A key column as a `RowId`. Null, missing and non-scalar values give `None`.
    pub fn key(&self, column: &str) -> Option<RowId> {
        match self.get(column)? {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => RowId::Int(i),
                None => RowId::Text(n.to_string()),
            }),
            Value::String(s) => Some(RowId::Text(s.clone())),
            _ => None,
        }
    }

    /// A uuid column; anything that does not parse as a uuid gives `None`
    pub fn uuid(&self, column: &str) -> Option<Uuid> {
        self.text(column).and_then(|s| Uuid::parse_str(s).ok())
    }
}

impl From<Map<String, Value>> for Row {
    fn from(columns: Map<String, Value>) -> Self {
        Row(columns)
    }
}

// Typed views over a row. Each wraps the raw columns and adds the key
// accessors for its table.
macro_rules! table_row {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name($crate::models::Row);

        impl std::ops::Deref for $name {
            type Target = $crate::models::Row;

            fn deref(&self) -> &$crate::models::Row {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $crate::models::Row {
                &mut self.0
            }
        }

        impl From<$crate::models::Row> for $name {
            fn from(row: $crate::models::Row) -> Self {
                $name(row)
            }
        }
    };
}

pub(crate) use table_row;
