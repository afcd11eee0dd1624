//! A deterministic in-memory `DataService` for scenario tests (spec.md §6,
//! §8 S2/S3).

use async_trait::async_trait;
use plan_core::{AggregationResponse, DataService, DataServiceError, Hits, HitsTotal, SearchResponse};
use serde_json::{json, Value};

/// Always reports the same total hit count and synthesizes placeholder
/// documents for whatever page is requested.
pub struct MockDataService {
    total: u64,
}

impl MockDataService {
    /// Build a mock backend reporting `total` matching documents.
    pub fn new(total: u64) -> Self {
        Self { total }
    }
}

impl Default for MockDataService {
    fn default() -> Self {
        Self::new(137)
    }
}

#[async_trait]
impl DataService for MockDataService {
    async fn search(&self, query: Value) -> Result<SearchResponse, DataServiceError> {
        self.paginate(query, 10, 0).await
    }

    async fn aggregate(&self, _query: Value) -> Result<AggregationResponse, DataServiceError> {
        Ok(AggregationResponse {
            hits: Hits {
                total: HitsTotal { value: self.total },
                hits: vec![],
            },
            aggregations: json!({}),
        })
    }

    async fn paginate(
        &self,
        query: Value,
        size: u32,
        from_: u32,
    ) -> Result<SearchResponse, DataServiceError> {
        let remaining = self.total.saturating_sub(u64::from(from_));
        let n = remaining.min(u64::from(size));
        let hits = (0..n)
            .map(|i| json!({"id": u64::from(from_) + i, "matched_query": query.clone()}))
            .collect();
        Ok(SearchResponse {
            hits: Hits {
                total: HitsTotal { value: self.total },
                hits,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn paginate_respects_total_and_page_size() {
        let service = MockDataService::new(25);
        let page = service.paginate(json!({}), 20, 20).await.unwrap();
        assert_eq!(page.hits.total.value, 25);
        assert_eq!(page.hits.hits.len(), 5);
    }
}
