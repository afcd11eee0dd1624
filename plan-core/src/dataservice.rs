//! The Data-Service protocol — the downstream search index / SQL
//! collaborator (spec.md §1, §6).
//!
//! Modeled on `layer0::state::StateStore`: a minimal, object-safe,
//! async trait. The core does not define the query language — queries and
//! results are opaque `serde_json::Value` documents that pass through
//! unchanged.
use crate::error::DataServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Hit-count summary shared by `search` and `aggregate` responses
/// (spec.md §6: `{hits: {total: {value}, hits: []}}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitsTotal {
    /// Total number of matching documents.
    pub value: u64,
}

/// Response from a plain search (spec.md §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total hit count plus the returned page of documents.
    pub hits: Hits,
}

/// The `hits` object: total count plus the page of documents returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hits {
    /// Total matching document count.
    pub total: HitsTotal,
    /// The page of matching documents, as opaque JSON.
    #[serde(default)]
    pub hits: Vec<serde_json::Value>,
}

/// Response from an aggregation query (spec.md §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationResponse {
    /// Total hit count plus the returned page of documents.
    pub hits: Hits,
    /// Opaque aggregation buckets, as returned by the backend.
    pub aggregations: serde_json::Value,
}

/// Protocol — the Data Service.
///
/// Two operations: a search and an aggregation, plus a paginated variant
/// of search that takes an explicit page size and offset (spec.md §6).
/// The core passes query documents through opaque — it never inspects or
/// constructs query syntax itself.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Run a search query, returning all matching hits the backend chooses
    /// to return.
    async fn search(&self, query: serde_json::Value) -> Result<SearchResponse, DataServiceError>;

    /// Run an aggregation query.
    async fn aggregate(
        &self,
        query: serde_json::Value,
    ) -> Result<AggregationResponse, DataServiceError>;

    /// Run a paginated search: `size` documents starting at offset `from_`.
    async fn paginate(
        &self,
        query: serde_json::Value,
        size: u32,
        from_: u32,
    ) -> Result<SearchResponse, DataServiceError>;
}
