//! PostgREST query descriptions

use std::fmt;

pub const PROVIDERS_TABLE: &str = "service_providers";
pub const PROFILES_TABLE: &str = "profiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "asc"),
            Direction::Descending => write!(f, "desc"),
        }
    }
}

/// A table read: filters and ordering expressed as PostgREST query params.
/// Encoding is left to the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
    single: bool,
}

impl Query {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            params: vec![],
            single: false,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    /// Expect exactly one row; zero rows becomes a `PGRST116` error.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Unencoded path, for logs
    pub fn to_path(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.table, params)
    }
}

/// Every available provider, best rated first.
pub fn available_providers() -> Query {
    Query::new(PROVIDERS_TABLE)
        .select("*")
        .eq("is_available", true)
        .order("rating", Direction::Descending)
}

/// The profile row owned by `owner_id`.
pub fn profile_for(owner_id: &str) -> Query {
    Query::new(PROFILES_TABLE)
        .select("*")
        .eq("user_id", owner_id)
        .single()
}
