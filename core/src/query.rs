//! Query-string arguments for collection routes.

use std::fmt::Display;

use crate::context::Context;

/// Percent-encode `segment` so it stays a single path segment of a route.
pub fn path_segment(segment: &str) -> String {
    // `byte_serialize` targets form bodies: it writes spaces as `+` and
    // escapes a literal `+` as `%2B`, so the swap below is unambiguous.
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Ordered `key=value` pairs, encoded when the URL is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: Context) -> Self {
        let mut query = Self::new();
        query.push("context", context);
        query
    }

    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<T: Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Comma-separated list, the form WordPress accepts for array arguments.
    /// Empty lists are omitted.
    pub fn push_list<T: Display>(&mut self, key: &str, values: &[T]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            self.push(key, joined);
        }
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sort direction for collection routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        })
    }
}

/// Paging arguments shared by every collection route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paging {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Paging {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub(crate) fn apply(&self, query: &mut Query) {
        query
            .push_opt("page", self.page)
            .push_opt("per_page", self.per_page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_escape_reserved_characters() {
        assert_eq!(path_segment("genre"), "genre");
        assert_eq!(path_segment("my-tax_2"), "my-tax_2");
        assert_eq!(path_segment("a?b#c/d"), "a%3Fb%23c%2Fd");
        assert_eq!(path_segment("a b+c"), "a%20b%2Bc");
    }

    #[test]
    fn optional_and_empty_values_are_skipped() {
        let mut query = Query::with_context(Context::Edit);
        query
            .push_opt::<u32>("page", None)
            .push_list::<u64>("tags", &[])
            .push_list("categories", &[3, 9])
            .push("order", Order::Asc);
        assert_eq!(
            query.pairs(),
            &[
                ("context".to_string(), "edit".to_string()),
                ("categories".to_string(), "3,9".to_string()),
                ("order".to_string(), "asc".to_string()),
            ]
        );
    }

    #[test]
    fn paging_adds_both_arguments() {
        let mut query = Query::new();
        Paging::page(2, 50).apply(&mut query);
        assert_eq!(query.pairs().len(), 2);
        assert_eq!(query.pairs()[1], ("per_page".to_string(), "50".to_string()));
    }
}
