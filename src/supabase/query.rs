use std::fmt::Display;

/// A PostgREST table request: target table, projected columns and
/// horizontal filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: &'static str,
    select: Option<String>,
    filters: Vec<(String, String)>,
}

impl Query {
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            select: None,
            filters: Vec::new(),
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn in_list<V: Display>(mut self, column: &str, values: &[V]) -> Self {
        let list = values
            .iter()
            .map(|v| quote_list_item(&v.to_string()))
            .collect::<Vec<_>>()
            .join(",");
        self.filters
            .push((column.to_string(), format!("in.({})", list)));
        self
    }

    /// Path relative to the project url
    pub fn path(&self) -> String {
        format!("rest/v1/{}", self.table)
    }

    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 1);
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        params.extend(self.filters.iter().cloned());
        params
    }
}

// Reserved characters inside in.(...) need double quotes
fn quote_list_item(raw: &str) -> String {
    if raw.chars().any(|c| matches!(c, ',' | '(' | ')' | '"' | '\\' | ' ')) {
        let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    } else {
        raw.to_string()
    }
}
