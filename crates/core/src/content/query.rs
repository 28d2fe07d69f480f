//! Typed document queries, rendered to GROQ for the CMS and evaluated
//! directly by the in-memory store.

use std::cmp::Ordering;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub field: String,
    pub descending: bool,
}

/// `*[_type == $type && field == $p0 ...] | order(...)` with an optional
/// projection.
///
/// Field names are code constants (dot paths such as `slug.current`); only
/// values travel as query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    doc_type: String,
    filters: Vec<(String, Value)>,
    order: Vec<Order>,
    limit: Option<usize>,
    projection: Option<&'static str>,
}

impl DocumentQuery {
    pub fn of_type(doc_type: &str) -> Self {
        Self {
            doc_type: doc_type.to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            projection: None,
        }
    }

    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        debug_assert!(is_field_path(field), "invalid field path: {field}");
        self.filters.push((field.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, field: &str, descending: bool) -> Self {
        debug_assert!(is_field_path(field), "invalid field path: {field}");
        self.order.push(Order {
            field: field.to_string(),
            descending,
        });
        self
    }

    /// Cap list results to the first `n` after ordering. Paged queries
    /// ignore it.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }

    /// GROQ projection body, including the braces.
    pub fn project(mut self, projection: &'static str) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    /// Query parameters: `type` plus one `pN` per filter.
    pub fn params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("type".into(), Value::String(self.doc_type.clone()));
        for (i, (_, value)) in self.filters.iter().enumerate() {
            params.insert(format!("p{i}"), value.clone());
        }
        params
    }

    fn filter_groq(&self) -> String {
        let mut clauses = vec!["_type == $type".to_string()];
        for (i, (field, _)) in self.filters.iter().enumerate() {
            clauses.push(format!("{field} == $p{i}"));
        }
        format!("*[{}]", clauses.join(" && "))
    }

    fn ordered_groq(&self) -> String {
        let mut out = self.filter_groq();
        if !self.order.is_empty() {
            let terms: Vec<String> = self
                .order
                .iter()
                .map(|o| format!("{} {}", o.field, if o.descending { "desc" } else { "asc" }))
                .collect();
            out.push_str(&format!(" | order({})", terms.join(", ")));
        }
        out
    }

    fn with_projection(&self, mut groq: String) -> String {
        if let Some(projection) = self.projection {
            groq.push(' ');
            groq.push_str(projection);
        }
        groq
    }

    /// All matching documents, or the first `limit` of them.
    pub fn list_groq(&self) -> String {
        let mut groq = self.ordered_groq();
        if let Some(n) = self.limit {
            groq.push_str(&format!("[0...{n}]"));
        }
        self.with_projection(groq)
    }

    /// The first matching document, or `null`.
    pub fn first_groq(&self) -> String {
        self.with_projection(format!("{}[0]", self.ordered_groq()))
    }

    /// `{items, total}` for a window given by the `$offset`/`$end` parameters.
    pub fn page_groq(&self) -> String {
        let items = self.with_projection(format!("{}[$offset...$end]", self.ordered_groq()));
        format!(
            "{{\"items\": {items}, \"total\": count({})}}",
            self.filter_groq()
        )
    }

    /// Evaluate the filter against a document.
    pub fn matches(&self, doc: &Value) -> bool {
        doc.get("_type").and_then(Value::as_str) == Some(self.doc_type.as_str())
            && self
                .filters
                .iter()
                .all(|(field, expected)| lookup(doc, field) == Some(expected))
    }

    /// Compare two documents by the query's order terms.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for term in &self.order {
            let ord = compare_values(lookup(a, &term.field), lookup(b, &term.field), term.descending);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

fn is_field_path(field: &str) -> bool {
    !field.is_empty()
        && field
            .split('.')
            .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

/// Resolve a dot path inside a JSON document.
fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |v, seg| v.get(seg))
}

// Missing and null sort after everything else in either direction.
fn compare_values(a: Option<&Value>, b: Option<&Value>, descending: bool) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let ord = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    };
    if descending {
        ord.reverse()
    } else {
        ord
    }
}
