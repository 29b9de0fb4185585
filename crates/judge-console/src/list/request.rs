//! The canonical list request and its wire encodings.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FilterError;

/// Sort direction, serialized as `ASC` / `DESC`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[default]
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    /// The wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// The opposite direction, as used by clickable column headers.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource's filter set.
///
/// Filters serialize to a flat camelCase object; `None` fields should be
/// skipped so they never reach the wire.
pub trait ListFilters:
    Clone + PartialEq + Default + Serialize + fmt::Debug + Send + Sync + 'static
{
    /// Check the filter set before it becomes part of a request.
    fn validate(&self) -> Result<(), FilterError> {
        Ok(())
    }
}

/// A resource's sortable columns.
pub trait SortField: Copy + PartialEq + Eq + fmt::Debug + Send + Sync + 'static {
    /// The column name sent as `sortBy`.
    fn as_str(&self) -> &'static str;
}

/// Everything needed to ask the backend for one page of a list.
///
/// Requests are compared by value: a controller fetches only when a mutation
/// produces a request that differs from the current one.
#[derive(Clone, Debug, PartialEq)]
pub struct ListRequest<F, S> {
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    pub sort_field: S,
    pub sort_order: SortOrder,
    pub filters: F,
    /// Trimmed keyword, `None` when the search box is empty.
    pub search_text: Option<String>,
}

impl<F: ListFilters, S: SortField> ListRequest<F, S> {
    /// First page with default filters and no keyword.
    pub fn new(limit: u32, sort_field: S, sort_order: SortOrder) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            sort_field,
            sort_order,
            filters: F::default(),
            search_text: None,
        }
    }

    /// Same request on another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Replace the filters and go back to the first page.
    pub fn with_filters(&self, filters: F) -> Self {
        Self {
            page: 1,
            filters,
            ..self.clone()
        }
    }

    /// Replace the keyword and go back to the first page.
    pub fn with_search(&self, search_text: Option<String>) -> Self {
        Self {
            page: 1,
            search_text,
            ..self.clone()
        }
    }

    pub fn with_sort_field(&self, sort_field: S) -> Self {
        Self {
            page: 1,
            sort_field,
            ..self.clone()
        }
    }

    pub fn with_sort_order(&self, sort_order: SortOrder) -> Self {
        Self {
            page: 1,
            sort_order,
            ..self.clone()
        }
    }

    /// Change the page size and go back to the first page.
    pub fn with_limit(&self, limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            ..self.clone()
        }
    }

    /// Encode as query-string pairs for GET endpoints.
    ///
    /// Lists are joined with `,`; nested objects are sent as JSON text.
    pub fn to_query_pairs(&self) -> serde_json::Result<Vec<(String, String)>> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("sortBy".to_string(), self.sort_field.as_str().to_string()),
            ("sortOrder".to_string(), self.sort_order.as_str().to_string()),
        ];
        if let Some(search) = &self.search_text {
            pairs.push(("search".to_string(), search.clone()));
        }

        for (key, value) in self.filter_entries()? {
            if let Some(text) = query_text(&value) {
                pairs.push((key, text));
            }
        }
        Ok(pairs)
    }

    /// Encode as a JSON object for POST search endpoints.
    pub fn to_json_body(&self) -> serde_json::Result<Value> {
        let mut body = Map::new();
        body.insert("page".into(), self.page.into());
        body.insert("limit".into(), self.limit.into());
        body.insert("sortBy".into(), self.sort_field.as_str().into());
        body.insert("sortOrder".into(), self.sort_order.as_str().into());
        if let Some(search) = &self.search_text {
            body.insert("search".into(), search.clone().into());
        }

        for (key, value) in self.filter_entries()? {
            body.insert(key, value);
        }
        Ok(Value::Object(body))
    }

    fn filter_entries(&self) -> serde_json::Result<Vec<(String, Value)>> {
        let entries = match serde_json::to_value(&self.filters)? {
            Value::Object(map) => map
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .collect(),
            Value::Null => Vec::new(),
            other => {
                return Err(serde::ser::Error::custom(format!(
                    "filters must serialize to an object, got {other}"
                )));
            }
        };
        Ok(entries)
    }
}

fn query_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
