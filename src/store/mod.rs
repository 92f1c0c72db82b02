pub mod memory;
pub mod query;
pub mod types;

pub use memory::{Dataset, InMemoryStore};
pub use query::CategoryQuery;
pub use types::{Category, FieldValue, ResultRow};

use anyhow::Result;

/// Structured read access to the travel knowledge graph.
///
/// Implementations answer one fixed-shape query per category and return rows
/// of optional scalar fields. Failures are reported to the caller as-is.
pub trait KnowledgeStore {
    fn query(&self, query: &CategoryQuery) -> Result<Vec<ResultRow>>;
}

impl<T: KnowledgeStore + ?Sized> KnowledgeStore for &T {
    fn query(&self, query: &CategoryQuery) -> Result<Vec<ResultRow>> {
        (**self).query(query)
    }
}
